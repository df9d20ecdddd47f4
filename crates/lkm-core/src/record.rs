//! Production areas, crew-schema revisions, and the normalized downtime
//! event record.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::value::{CellValue, clean_crew_label};

/// One of the four fixed production areas a sheet is classified into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Area {
    Injection,
    Filling,
    Cutting,
    Packing,
}

impl Area {
    /// All areas, in the fixed iteration order used for sheet matching.
    pub const ALL: [Area; 4] = [Area::Injection, Area::Filling, Area::Cutting, Area::Packing];

    /// The lowercase token matched against sheet names.
    pub fn token(self) -> &'static str {
        match self {
            Self::Injection => "injection",
            Self::Filling => "filling",
            Self::Cutting => "cutting",
            Self::Packing => "packing",
        }
    }

    /// The display label (`"Injection"` etc.).
    pub fn label(self) -> &'static str {
        match self {
            Self::Injection => "Injection",
            Self::Filling => "Filling",
            Self::Cutting => "Cutting",
            Self::Packing => "Packing",
        }
    }

    /// Classifies a sheet name by case-insensitive substring containment.
    ///
    /// The first token in [`Area::ALL`] order wins when a name contains
    /// several; a name containing none is not a downtime sheet.
    pub fn match_sheet(sheet_name: &str) -> Option<Area> {
        let lower = sheet_name.to_lowercase();
        Self::ALL.into_iter().find(|area| lower.contains(area.token()))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which schema revision names the crew/shift column.
///
/// Older workbooks label the column `Shift` and store numeric shift codes;
/// newer revisions renamed it `Regu` and stopped cleaning the value. Both
/// behaviors are kept; callers pick one explicitly instead of guessing
/// which revision a file belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrewSchema {
    /// Match `"shift"` labels and clean the value (`1` → `"Shift 1"`).
    #[default]
    Shift,
    /// Match `"regu"` labels and cast the value raw, with no cleanup.
    Regu,
}

impl CrewSchema {
    /// The header-label substring that selects the crew column.
    pub fn label_token(self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Regu => "regu",
        }
    }

    /// Normalizes a crew cell under this schema revision.
    pub fn normalize(self, cell: &CellValue) -> String {
        match self {
            Self::Shift => clean_crew_label(cell),
            Self::Regu => cell.display(),
        }
    }
}

/// One normalized downtime event.
///
/// Text fields hold `"-"` when the source column was absent; numeric
/// fields hold non-negative minutes, never a raw spreadsheet value. The
/// machine name is never empty: rows without one are dropped before a
/// record is built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DowntimeRecord {
    /// Production area the source sheet was classified into.
    pub area: Area,
    /// Event date, formatted `DD-Mon-YY`, or `"-"`.
    pub date: String,
    /// Parsed event date, retained for range filtering.
    pub date_value: Option<NaiveDate>,
    /// Downtime start time, formatted `HH:MM`, or `"-"`.
    pub time: String,
    /// Machine name or code. Never empty.
    pub machine: String,
    /// Machine type, or `"-"`.
    pub machine_type: String,
    /// Machine brand, or `"-"`.
    pub machine_brand: String,
    /// Crew/shift label per the active [`CrewSchema`].
    pub crew: String,
    /// Composite cause: `"{category} - {subcategory}"`, missing parts
    /// rendered as empty strings.
    pub cause: String,
    /// Corrective action text, or `"-"`.
    pub action: String,
    /// Total downtime in minutes.
    pub downtime_minutes: f64,
    /// Stop date, formatted `DD-Mon-YY`, or `"-"`.
    pub stop_date: String,
    /// Repair start time, formatted `HH:MM`, or `"-"`.
    pub start_repair: String,
    /// Repair stop time, formatted `HH:MM`, or `"-"`.
    pub stop_repair: String,
    /// Production-resume time, formatted `HH:MM`, or `"-"`.
    pub start_production: String,
    /// Raw subcategory (level 3) text, empty when absent.
    pub subcause: String,
    /// Response time in minutes.
    pub response_minutes: f64,
    /// Technical downtime in minutes.
    pub technical_minutes: f64,
    /// Person in charge of the corrective action, or `"-"`.
    pub pic: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
