use crate::error::{PaymentError, Result};
use crate::interfaces::api::Request;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Process,
    SetDefault,
    Status,
    Order,
}

/// One raw CSV row: `action, amount, method`.
///
/// The amount stays textual until validation so its scale survives
/// (`100.00` is not read back as `100`).
#[derive(Debug, Deserialize, PartialEq, Clone)]
struct RequestRecord {
    action: Action,
    amount: Option<String>,
    method: Option<String>,
}

impl RequestRecord {
    fn amount(&self) -> Result<Decimal> {
        let raw = self.amount.as_deref().ok_or_else(|| {
            PaymentError::InvalidRequest(format!("{:?} requires an amount", self.action))
        })?;
        Decimal::from_str(raw)
            .map_err(|e| PaymentError::InvalidRequest(format!("invalid amount '{raw}': {e}")))
    }
}

impl TryFrom<RequestRecord> for Request {
    type Error = PaymentError;

    fn try_from(record: RequestRecord) -> Result<Self> {
        match record.action {
            Action::Process => Ok(Request::Process {
                amount: record.amount()?,
                method: record.method,
            }),
            Action::SetDefault => Ok(Request::SetDefault {
                method: record.method.ok_or_else(|| {
                    PaymentError::InvalidRequest("SetDefault requires a method".to_string())
                })?,
            }),
            Action::Status => Ok(Request::Status),
            Action::Order => Ok(Request::Order {
                amount: record.amount()?,
            }),
        }
    }
}

/// Reads API requests from a CSV source with header `action,amount,method`.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one request per row. Bad rows yield an error and do not
    /// stop the stream.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader.into_deserialize::<RequestRecord>().map(|row| {
            let record = row.map_err(PaymentError::from)?;
            Request::try_from(record)
        })
    }
}
