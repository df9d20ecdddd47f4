/// Header-row probing.
///
/// Source files place the column-label row at varying offsets with no
/// reliable marker, usually sheet row 3 or 4 below a title block. Each
/// candidate offset is tried in order until the column resolver accepts
/// the row; a sheet where no candidate resolves is not a downtime table.
use calamine::{Data, Range};

use lkm_core::record::{Area, CrewSchema, DowntimeRecord};
use lkm_core::schema::resolve_columns;

use crate::HEADER_ROW_CANDIDATES;
use crate::extract::{cell_value, extract_rows};

/// Probes one matched sheet and extracts its records.
///
/// Returns `None` when every candidate header offset fails resolution;
/// the caller skips the sheet and reports it, without aborting the run.
pub fn probe_sheet(
    range: &Range<Data>,
    area: Area,
    crew: CrewSchema,
) -> Option<Vec<DowntimeRecord>> {
    for &offset in HEADER_ROW_CANDIDATES {
        let Some(header_idx) = relative_row_index(range, offset) else {
            continue;
        };
        let labels = header_labels(range, header_idx);
        let Some(map) = resolve_columns(&labels, crew) else {
            continue;
        };
        return Some(extract_rows(range, header_idx, &map, area, crew));
    }
    None
}

/// Maps an absolute sheet-row offset into an index within the worksheet
/// range, which calamine starts at the first non-empty cell.
fn relative_row_index(range: &Range<Data>, sheet_row: usize) -> Option<usize> {
    let (start_row, _) = range.start()?;
    let rel = sheet_row.checked_sub(start_row as usize)?;
    if rel < range.height() { Some(rel) } else { None }
}

/// Raw label strings for one candidate header row.
fn header_labels(range: &Range<Data>, header_idx: usize) -> Vec<String> {
    range
        .rows()
        .nth(header_idx)
        .map(|row| row.iter().map(|cell| cell_value(cell).display()).collect())
        .unwrap_or_default()
}
