//! Tagged cell values and the total normalizers applied to them.
//!
//! Source cells arrive as numbers, strings, times, datetimes, or durations
//! interchangeably; the same "Total Downtime" column holds `90`, `"90"`,
//! `01:30:00`, and `"-"` across files. [`CellValue`] captures that variance
//! once, at the ingestion boundary; every normalizer here matches
//! exhaustively over it and always returns a value, so a malformed cell can
//! never abort a sheet.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// A raw spreadsheet cell, decoupled from any spreadsheet library.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// An empty, blank, or error cell.
    Missing,
    /// A numeric cell (integers are widened to `f64`).
    Number(f64),
    /// A textual cell. Never empty after trimming; blank strings are
    /// [`CellValue::Missing`].
    Text(String),
    /// A time-of-day cell with no date component.
    Time(NaiveTime),
    /// A date or date+time cell.
    DateTime(NaiveDateTime),
    /// An elapsed-duration cell.
    Duration(TimeDelta),
}

impl CellValue {
    /// Returns the raw display string for this cell.
    ///
    /// Whole floats render without a fractional part (`2.0` → `"2"`), the
    /// same way header labels and machine codes appear in the source files.
    pub fn display(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Number(f) => {
                if *f == f.floor() && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            Self::Text(s) => s.trim().to_owned(),
            Self::Time(t) => t.format("%H:%M:%S").to_string(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Duration(d) => {
                let total_secs = d.num_seconds();
                let hours = total_secs / 3600;
                let mins = (total_secs % 3600) / 60;
                let secs = total_secs % 60;
                format!("{hours}:{mins:02}:{secs:02}")
            }
        }
    }

    /// Returns true for [`CellValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Converts a downtime-like cell into non-negative minutes.
///
/// Already-numeric input passes through unchanged, so the function is
/// idempotent over its own output. Time-of-day cells are read as an
/// elapsed span (`02:30:00` → 150 minutes) because the source files enter
/// durations in a time-formatted column. Everything unparseable is 0.
pub fn duration_minutes(value: &CellValue) -> f64 {
    match value {
        CellValue::Missing => 0.0,
        CellValue::Number(n) => *n,
        CellValue::Time(t) => {
            f64::from(t.hour() * 60 + t.minute()) + f64::from(t.second()) / 60.0
        }
        CellValue::Duration(d) => d.num_milliseconds() as f64 / 60_000.0,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "-" {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        // A datetime's string form never parses as a float.
        CellValue::DateTime(_) => 0.0,
    }
}

/// Formats a start/stop time cell as zero-padded 24-hour `HH:MM`.
///
/// Missing cells become `"-"`; cells that are neither times nor datetimes
/// keep their display string unchanged.
pub fn format_time(value: &CellValue) -> String {
    match value {
        CellValue::Missing => "-".to_owned(),
        CellValue::Time(t) => t.format("%H:%M").to_string(),
        CellValue::DateTime(dt) => dt.format("%H:%M").to_string(),
        CellValue::Number(_) | CellValue::Text(_) | CellValue::Duration(_) => value.display(),
    }
}

/// Formats a date cell as `DD-Mon-YY` (`07-Mar-24`).
///
/// Missing cells become `"-"`; non-datetime cells keep their display
/// string unchanged.
pub fn format_date(value: &CellValue) -> String {
    match value {
        CellValue::Missing => "-".to_owned(),
        CellValue::DateTime(dt) => dt.format("%d-%b-%y").to_string(),
        CellValue::Number(_) | CellValue::Text(_) | CellValue::Time(_) | CellValue::Duration(_) => {
            value.display()
        }
    }
}

/// Extracts the calendar date from a datetime cell, for range filtering.
pub fn date_of(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Missing
        | CellValue::Number(_)
        | CellValue::Text(_)
        | CellValue::Time(_)
        | CellValue::Duration(_) => None,
    }
}

/// Cleans a crew/shift cell into a canonical label.
///
/// Numeric shift codes round-trip through floats in the source files, so a
/// trailing `".0"` is stripped before matching. Codes `1`–`3` become
/// `"Shift {n}"`; anything else is returned trimmed and unchanged. Missing
/// cells are `"Unknown"`.
pub fn clean_crew_label(value: &CellValue) -> String {
    if value.is_missing() {
        return "Unknown".to_owned();
    }
    let display = value.display();
    let trimmed = display.trim();
    let code = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    match code {
        "1" | "2" | "3" => format!("Shift {code}"),
        other => other.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
