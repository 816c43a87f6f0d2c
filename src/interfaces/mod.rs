//! Request surface: the in-process API plus the CSV/JSON-lines adapters used
//! by the batch binary.

pub mod api;
pub mod csv;
pub mod json;
