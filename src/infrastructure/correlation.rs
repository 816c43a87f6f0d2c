use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Builds a synthetic identifier such as `PP-1718000000000-000042`.
///
/// The timestamp keeps ids readable; the process-wide sequence keeps them unique
/// when two charges land in the same millisecond.
pub fn next_id(prefix: &str) -> String {
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{}-{sequence:06}", Utc::now().timestamp_millis())
}
