//! Error types for each boundary of the ledger: report rendering, the
//! persistence gateway, and the session that couples the two with order
//! mutations.

use std::path::PathBuf;

use delivery_order::OrderError;
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Spreadsheet writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Amount {0} cannot be stored as a spreadsheet number")]
    NumberOutOfRange(Decimal),
}

/// Failures of a single row while reading a report back.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Column '{column}' is not a number: {value}")]
    NotANumber { column: &'static str, value: String },
    #[error("Column '{column}' amount {value} exceeds {max}", max = delivery_order::MAX_AMOUNT)]
    AmountOutOfRange { column: &'static str, value: String },
    #[error("Column 'ID' is not a positive whole number: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Status(#[from] delivery_order::ParseOrderStatusError),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// No report exists yet for this day. A normal startup condition.
    #[error("Report file {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read report file: {0}")]
    Read(#[from] calamine::XlsxError),
    #[error("Report file has no '{0}' sheet")]
    MissingSheet(&'static str),
    #[error("Invalid order in report row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: RowError,
    },
    #[error("Failed to render report: {0}")]
    Render(#[from] RenderError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a session operation. `Persistence` is returned after the
/// in-memory mutation was applied; the mutation is not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Change applied but not saved: {0}")]
    Persistence(#[from] PersistenceError),
}
