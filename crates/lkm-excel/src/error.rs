/// Errors produced while opening a downtime workbook.
use thiserror::Error;

/// Fatal ingestion failures.
///
/// Only failures to open the workbook or list its sheets abort a run.
/// Everything below sheet level recovers locally: an unreadable sheet is
/// skipped with a diagnostic, and an unconvertible cell falls back to its
/// normalizer's default.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source bytes are not a readable `.xlsx` workbook.
    #[error("cannot open workbook: {detail}")]
    Workbook {
        /// Human-readable description from the spreadsheet reader.
        detail: String,
    },
}
