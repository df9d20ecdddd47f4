//! CSV serialization of record views for download.

use std::io::Write;

use crate::record::DowntimeRecord;

/// Column labels for exported CSV, in record-field order.
pub const DISPLAY_HEADERS: [&str; 18] = [
    "Area",
    "Start Date",
    "Start Downtime",
    "Machine Name",
    "Machine Type",
    "Machine Brand",
    "Shift",
    "Cause",
    "Tindakan",
    "Total Downtime (Min)",
    "Stop Date",
    "Start Repair",
    "Stop Repair",
    "Start Production",
    "Level 3",
    "Respon Time",
    "Technical Downtime",
    "PIC",
];

/// Renders minutes the way the table displays them: whole values without
/// a fractional part.
fn fmt_minutes(minutes: f64) -> String {
    if minutes == minutes.floor() && minutes.abs() < 1e15 {
        format!("{}", minutes as i64)
    } else {
        minutes.to_string()
    }
}

fn record_row(r: &DowntimeRecord) -> [String; 18] {
    [
        r.area.label().to_owned(),
        r.date.clone(),
        r.time.clone(),
        r.machine.clone(),
        r.machine_type.clone(),
        r.machine_brand.clone(),
        r.crew.clone(),
        r.cause.clone(),
        r.action.clone(),
        fmt_minutes(r.downtime_minutes),
        r.stop_date.clone(),
        r.start_repair.clone(),
        r.stop_repair.clone(),
        r.start_production.clone(),
        r.subcause.clone(),
        fmt_minutes(r.response_minutes),
        fmt_minutes(r.technical_minutes),
        r.pic.clone(),
    ]
}

/// Writes a record view as UTF-8 CSV: one header row, one row per record.
pub fn write_csv<'a, W: Write>(
    records: impl IntoIterator<Item = &'a DowntimeRecord>,
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DISPLAY_HEADERS)?;
    for record in records {
        wtr.write_record(record_row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders a record view as a CSV string.
pub fn csv_string<'a>(
    records: impl IntoIterator<Item = &'a DowntimeRecord>,
) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
