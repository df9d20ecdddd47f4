/// Implementation of `lkm ingest`.
///
/// Ingests one workbook, applies the requested view (area filter, date
/// range, sort), and writes the result as CSV or JSON to stdout or a
/// file.
///
/// Exit codes:
/// - 0 = success
/// - 1 = ingestion completed but produced no records
/// - 2 = source could not be resolved, fetched, or parsed
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use chrono::NaiveDate;

use lkm_core::export::csv_string;
use lkm_core::record::{Area, CrewSchema};
use lkm_core::table::{filter_records, sort_by_downtime_desc};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Runs the `ingest` command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    source: &str,
    format: OutputFormat,
    out: Option<&Path>,
    crew: CrewSchema,
    areas: &[Area],
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    sort: bool,
) -> Result<(), CliError> {
    let report = super::load_report(source, crew)?;
    super::report_skipped(&report);

    if report.table.is_empty() {
        return Err(CliError::NoRecords);
    }

    let area_filter = if areas.is_empty() { None } else { Some(areas) };
    let mut view = filter_records(report.table.records(), area_filter, since, until);
    if sort {
        sort_by_downtime_desc(&mut view);
    }

    let rendered = match format {
        OutputFormat::Csv => csv_string(view).map_err(|e| CliError::IoError {
            source: "csv output".to_owned(),
            detail: e.to_string(),
        })?,
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&view).map_err(|e| CliError::IoError {
                    source: "json output".to_owned(),
                    detail: e.to_string(),
                })?;
            json.push('\n');
            json
        }
    };

    write_output(&rendered, out)
}

fn write_output(rendered: &str, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) => fs::write(path, rendered.as_bytes()).map_err(|e| CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .map_err(|e| CliError::IoError {
                    source: "stdout".to_owned(),
                    detail: e.to_string(),
                })
        }
    }
}
