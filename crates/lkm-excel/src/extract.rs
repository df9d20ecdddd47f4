/// Row extraction: resolved columns through the value normalizers.
///
/// Also owns the only conversion from `calamine::Data` into the core
/// [`CellValue`] type, so the rest of the pipeline never sees a raw
/// spreadsheet cell. Extraction is total: once a header row resolves,
/// every remaining row either becomes a record or is dropped for lacking
/// a machine identity.
use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use lkm_core::record::{Area, CrewSchema, DowntimeRecord};
use lkm_core::schema::{ColumnMap, Field};
use lkm_core::value::{
    CellValue, date_of, duration_minutes, format_date, format_time,
};

/// Converts one raw cell into the core tagged value.
///
/// Excel stores times, dates, and durations as formatted serial numbers;
/// a serial below 1.0 with no duration format is a pure time-of-day.
/// Blank and error cells are both missing.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                dt.as_duration()
                    .map_or(CellValue::Missing, CellValue::Duration)
            } else if dt.as_f64() < 1.0 {
                dt.as_datetime()
                    .map_or(CellValue::Missing, |ndt| CellValue::Time(ndt.time()))
            } else {
                dt.as_datetime()
                    .map_or(CellValue::Missing, CellValue::DateTime)
            }
        }
        Data::DateTimeIso(s) => parse_iso(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Parses an ISO-formatted datetime/date/time string cell.
fn parse_iso(s: &str) -> CellValue {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        CellValue::DateTime(dt)
    } else if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        CellValue::DateTime(d.and_time(NaiveTime::MIN))
    } else if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S%.f") {
        CellValue::Time(t)
    } else {
        CellValue::Text(s.to_owned())
    }
}

/// Reads the mapped cell for `col`, or missing when the sheet has no such
/// column or the row is short.
fn cell_at(row: &[Data], col: Option<usize>) -> CellValue {
    col.and_then(|idx| row.get(idx))
        .map_or(CellValue::Missing, cell_value)
}

/// Optional text fields default to the `"-"` placeholder.
fn text_or_dash(value: &CellValue) -> String {
    let s = value.display();
    if s.is_empty() { "-".to_owned() } else { s }
}

/// Crew label: schema-dependent normalization, `"Unknown"` when the sheet
/// has no crew column at all.
fn crew_label(row: &[Data], map: &ColumnMap, crew: CrewSchema) -> String {
    match map.get(Field::Crew) {
        Some(idx) => crew.normalize(&cell_at(row, Some(idx))),
        None => "Unknown".to_owned(),
    }
}

/// Builds one record per data row below the header, dropping rows whose
/// machine-identity cell is missing.
pub fn extract_rows(
    range: &Range<Data>,
    header_idx: usize,
    map: &ColumnMap,
    area: Area,
    crew: CrewSchema,
) -> Vec<DowntimeRecord> {
    let mut records = Vec::new();

    for row in range.rows().skip(header_idx + 1) {
        let machine = cell_at(row, Some(map.machine())).display();
        if machine.is_empty() {
            continue;
        }

        let date_cell = cell_at(row, map.get(Field::Date));
        // Category/subcategory join with a fixed separator; missing parts
        // are empty strings, never the "-" placeholder.
        let category = cell_at(row, map.get(Field::Category)).display();
        let subcause = cell_at(row, map.get(Field::Cause)).display();

        records.push(DowntimeRecord {
            area,
            date: format_date(&date_cell),
            date_value: date_of(&date_cell),
            time: format_time(&cell_at(row, map.get(Field::Time))),
            machine,
            machine_type: text_or_dash(&cell_at(row, map.get(Field::MachineType))),
            machine_brand: text_or_dash(&cell_at(row, map.get(Field::Brand))),
            crew: crew_label(row, map, crew),
            cause: format!("{category} - {subcause}"),
            action: text_or_dash(&cell_at(row, map.get(Field::Action))),
            downtime_minutes: duration_minutes(&cell_at(row, Some(map.downtime()))),
            stop_date: format_date(&cell_at(row, map.get(Field::StopDate))),
            start_repair: format_time(&cell_at(row, map.get(Field::StartRepair))),
            stop_repair: format_time(&cell_at(row, map.get(Field::StopRepair))),
            start_production: format_time(&cell_at(row, map.get(Field::StartProduction))),
            subcause,
            response_minutes: duration_minutes(&cell_at(row, map.get(Field::ResponseTime))),
            technical_minutes: duration_minutes(&cell_at(row, map.get(Field::TechnicalDowntime))),
            pic: text_or_dash(&cell_at(row, map.get(Field::Pic))),
        });
    }

    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── cell_value ───────────────────────────────────────────────────────────

    #[test]
    fn empty_and_error_cells_are_missing() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Missing);
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::Value)),
            CellValue::Missing
        );
    }

    #[test]
    fn blank_strings_are_missing() {
        assert_eq!(cell_value(&Data::String("   ".to_owned())), CellValue::Missing);
    }

    #[test]
    fn ints_widen_to_numbers() {
        assert_eq!(cell_value(&Data::Int(90)), CellValue::Number(90.0));
    }

    #[test]
    fn floats_stay_numbers() {
        assert_eq!(cell_value(&Data::Float(12.5)), CellValue::Number(12.5));
    }

    #[test]
    fn text_is_preserved() {
        assert_eq!(
            cell_value(&Data::String("INJ-01".to_owned())),
            CellValue::Text("INJ-01".to_owned())
        );
    }

    #[test]
    fn iso_datetime_string_parses() {
        let v = cell_value(&Data::DateTimeIso("2024-03-07T08:15:00".to_owned()));
        assert_eq!(format_date(&v), "07-Mar-24");
        assert_eq!(format_time(&v), "08:15");
    }

    #[test]
    fn iso_date_string_parses_at_midnight() {
        let v = cell_value(&Data::DateTimeIso("2024-03-07".to_owned()));
        assert_eq!(format_date(&v), "07-Mar-24");
    }

    #[test]
    fn iso_time_string_parses_as_time_of_day() {
        let v = cell_value(&Data::DateTimeIso("02:30:00".to_owned()));
        assert_eq!(duration_minutes(&v), 150.0);
    }

    #[test]
    fn unparseable_iso_falls_back_to_text() {
        let v = cell_value(&Data::DateTimeIso("yesterday".to_owned()));
        assert_eq!(v, CellValue::Text("yesterday".to_owned()));
    }
}
