#![deny(clippy::print_stdout, clippy::print_stderr)]

/// Excel ingestion for LKM downtime workbooks.
///
/// Reads a multi-sheet `.xlsx` workbook of machine-breakdown reports and
/// produces one unified [`DowntimeTable`]. The `calamine` dependency is
/// confined to this crate and does not bleed into `lkm-core` or the CLI.
///
/// # Pipeline
///
/// | Stage | Behavior |
/// |---|---|
/// | Sheet selection | Area-token substring match on the sheet name |
/// | Header probing | Candidate offsets 3 then 4, first resolved wins |
/// | Column resolution | Ordered substring rules over cleaned labels |
/// | Row extraction | Total normalizers; rows without a machine dropped |
/// | Assembly | Batches concatenated in sheet encounter order |
///
/// A sheet that matches an area but fails every header candidate is
/// skipped and reported in [`IngestReport::skipped`]; only a workbook
/// that cannot be opened at all aborts the run.
use std::io::{Read, Seek};

use calamine::{Reader, Xlsx, open_workbook_from_rs};

use lkm_core::record::{Area, CrewSchema};
use lkm_core::table::DowntimeTable;

mod error;
mod extract;
mod probe;

pub use error::IngestError;
pub use extract::cell_value;

/// Candidate header-row offsets (zero-indexed sheet rows), tried in order.
pub const HEADER_ROW_CANDIDATES: &[usize] = &[3, 4];

/// A matched sheet that could not be parsed as a downtime table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedSheet {
    /// The raw sheet name.
    pub sheet: String,
    /// The area the sheet name matched.
    pub area: Area,
    /// Why the sheet was skipped.
    pub reason: String,
}

/// The outcome of one ingestion run: the assembled table plus per-sheet
/// diagnostics for everything that was skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestReport {
    /// The unified table. May be empty, which is a defined terminal
    /// state the caller reports as "no data", not an error.
    pub table: DowntimeTable,
    /// Matched sheets that failed every header-row candidate.
    pub skipped: Vec<SkippedSheet>,
}

/// Ingests a downtime workbook into one unified table.
///
/// The reader must be positioned at the start of a valid `.xlsx` file.
/// Sheets are visited in workbook order; only sheets whose name contains
/// an area token are considered.
///
/// # Errors
///
/// Returns [`IngestError::Workbook`] only when the workbook itself cannot
/// be opened. Per-sheet failures are collected in the report instead.
pub fn ingest_workbook<R: Read + Seek>(
    reader: R,
    crew: CrewSchema,
) -> Result<IngestReport, IngestError> {
    let mut workbook: Xlsx<R> =
        open_workbook_from_rs(reader).map_err(|e: calamine::XlsxError| IngestError::Workbook {
            detail: e.to_string(),
        })?;

    let sheet_names: Vec<String> = workbook.sheet_names().clone();

    let mut batches = Vec::new();
    let mut skipped = Vec::new();

    for sheet_name in &sheet_names {
        let Some(area) = Area::match_sheet(sheet_name) else {
            continue;
        };

        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("sheet {sheet_name:?} skipped: {e}");
                skipped.push(SkippedSheet {
                    sheet: sheet_name.clone(),
                    area,
                    reason: format!("sheet could not be read: {e}"),
                });
                continue;
            }
        };

        match probe::probe_sheet(&range, area, crew) {
            Some(batch) => {
                if !batch.is_empty() {
                    batches.push(batch);
                }
            }
            None => {
                log::warn!("sheet {sheet_name:?} skipped: no header row candidate matched");
                skipped.push(SkippedSheet {
                    sheet: sheet_name.clone(),
                    area,
                    reason: format!(
                        "no header row found at offsets {HEADER_ROW_CANDIDATES:?}"
                    ),
                });
            }
        }
    }

    Ok(IngestReport {
        table: DowntimeTable::from_batches(batches),
        skipped,
    })
}
