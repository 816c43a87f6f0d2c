use crate::error::{PaymentError, Result};
use crate::interfaces::api::ApiResponse;
use std::io::Write;

/// Writes API responses as JSON lines, one response per line.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &ApiResponse) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response)
            .map_err(|e| PaymentError::IoError(e.into()))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
