/// Implementation of `lkm inspect`.
///
/// Prints summary statistics for one workbook: record and minute totals,
/// per-area subtotals, the most critical machine type, and any skipped
/// sheets. Shares exit codes with `lkm ingest`.
use std::collections::HashMap;

use lkm_core::record::{CrewSchema, DowntimeRecord};
use lkm_core::table::filter_records;

use crate::error::CliError;

/// Runs the `inspect` command.
pub fn run(source: &str, crew: CrewSchema) -> Result<(), CliError> {
    let report = super::load_report(source, crew)?;
    super::report_skipped(&report);

    if report.table.is_empty() {
        return Err(CliError::NoRecords);
    }

    let table = &report.table;
    println!("records: {}", table.len());
    println!("total downtime: {:.0} min", table.total_minutes());

    for area in table.areas_present() {
        let view = filter_records(table.records(), Some(&[area]), None, None);
        let minutes: f64 = view.iter().map(|r| r.downtime_minutes).sum();
        println!("  {area}: {} records, {minutes:.0} min", view.len());
    }

    if let Some((machine_type, minutes)) = most_critical_type(table.records()) {
        println!("most critical machine type: {machine_type} ({minutes:.0} min)");
    }

    if !report.skipped.is_empty() {
        println!("skipped sheets: {}", report.skipped.len());
    }

    Ok(())
}

/// The machine type with the largest summed downtime.
fn most_critical_type(records: &[DowntimeRecord]) -> Option<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.machine_type.as_str()).or_insert(0.0) +=
            record.downtime_minutes;
    }
    totals
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(machine_type, minutes)| (machine_type.to_owned(), minutes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
