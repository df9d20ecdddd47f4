//! Subcommand implementations.
use std::io::Cursor;

use lkm_core::record::CrewSchema;
use lkm_excel::IngestReport;

use crate::error::CliError;
use crate::source;

pub mod ingest;
pub mod inspect;

/// Resolves a source argument, retrieves the workbook bytes, and runs the
/// ingestion pipeline over them.
pub(crate) fn load_report(raw_source: &str, crew: CrewSchema) -> Result<IngestReport, CliError> {
    let source = source::parse_source(raw_source)?;
    let bytes = source::load(&source)?;
    lkm_excel::ingest_workbook(Cursor::new(bytes), crew)
        .map_err(|e| CliError::ParseFailed {
            detail: e.to_string(),
        })
}

/// Prints every per-sheet diagnostic to stderr.
pub(crate) fn report_skipped(report: &IngestReport) {
    for skipped in &report.skipped {
        eprintln!(
            "warning: sheet {:?} ({}) skipped: {}",
            skipped.sheet, skipped.area, skipped.reason
        );
    }
}
