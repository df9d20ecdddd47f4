//! Header-label cleaning and heuristic column resolution.
//!
//! Source workbooks never agree on column labels: `"Machine Name"`,
//! `"KODE MESIN"`, `"Total\nDowntime (Min)"` all mean the same thing.
//! Labels are cleaned, then tested against an ordered chain of substring
//! rules; the first matching rule claims the label. Two fields are
//! mandatory, the machine identity and the total downtime, and a header
//! row that cannot produce both is rejected outright. That rejection is
//! how the header-row prober tells a real header from a title row.

use std::collections::HashMap;

use crate::record::CrewSchema;

/// Canonical semantic fields a raw column label can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Machine identity. Mandatory.
    Machine,
    /// Total downtime. Mandatory.
    Downtime,
    Date,
    Time,
    Category,
    Cause,
    Action,
    Crew,
    MachineType,
    Brand,
    StopDate,
    StartRepair,
    StopRepair,
    StartProduction,
    ResponseTime,
    TechnicalDowntime,
    Pic,
}

/// Cleans one raw header label for rule matching.
///
/// Lowercases, drops carriage returns, folds newlines into spaces,
/// collapses doubled spaces, and trims.
pub fn clean_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace('\n', " ")
        .replace('\r', "")
        .replace("  ", " ")
        .trim()
        .to_owned()
}

/// True when a cleaned label names the machine-identity column.
pub fn is_machine_label(label: &str) -> bool {
    label.contains("machine name") || label.contains("kode mesin")
}

/// True when a cleaned label names the total-downtime column.
pub fn is_downtime_label(label: &str) -> bool {
    label.contains("total") && label.contains("downtime")
}

/// The ordered rule chain: first matching rule wins per label.
///
/// Order is significant. The generic total-downtime rule precedes the
/// technical-downtime rule so a label like `"total technical downtime"`
/// resolves to [`Field::Downtime`], and `"start downtime"` is only reached
/// by labels that lack `"total"`.
fn match_field(label: &str, crew: CrewSchema) -> Option<Field> {
    if is_machine_label(label) {
        Some(Field::Machine)
    } else if is_downtime_label(label) {
        Some(Field::Downtime)
    } else if label.contains("start date") {
        Some(Field::Date)
    } else if label.contains("start downtime") {
        Some(Field::Time)
    } else if label.contains("level 2") {
        Some(Field::Category)
    } else if label.contains("level 3") {
        Some(Field::Cause)
    } else if label.contains("tindakan") {
        Some(Field::Action)
    } else if label.contains(crew.label_token()) {
        Some(Field::Crew)
    } else if label.contains("machine type") {
        Some(Field::MachineType)
    } else if label.contains("brand") {
        Some(Field::Brand)
    } else if label.contains("stop date") {
        Some(Field::StopDate)
    } else if label.contains("start repair") {
        Some(Field::StartRepair)
    } else if label.contains("stop repair") {
        Some(Field::StopRepair)
    } else if label.contains("start production") {
        Some(Field::StartProduction)
    } else if label.contains("respon time") {
        Some(Field::ResponseTime)
    } else if label.contains("technical downtime") {
        Some(Field::TechnicalDowntime)
    } else if label.contains("pic") {
        Some(Field::Pic)
    } else {
        None
    }
}

/// Resolved columns for one sheet's header row.
///
/// The mandatory machine and downtime indices are structural fields, so a
/// `ColumnMap` without them cannot exist; everything else is optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    machine: usize,
    downtime: usize,
    optional: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Column index of the machine-identity column.
    pub fn machine(&self) -> usize {
        self.machine
    }

    /// Column index of the total-downtime column.
    pub fn downtime(&self) -> usize {
        self.downtime
    }

    /// Column index for any field, if the header row carried it.
    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::Machine => Some(self.machine),
            Field::Downtime => Some(self.downtime),
            Field::Date
            | Field::Time
            | Field::Category
            | Field::Cause
            | Field::Action
            | Field::Crew
            | Field::MachineType
            | Field::Brand
            | Field::StopDate
            | Field::StartRepair
            | Field::StopRepair
            | Field::StartProduction
            | Field::ResponseTime
            | Field::TechnicalDowntime
            | Field::Pic => self.optional.get(&field).copied(),
        }
    }
}

/// Resolves a raw header row into a [`ColumnMap`].
///
/// Returns `None` unless both mandatory fields resolve; the caller treats
/// that as "this row is not the header" and probes the next candidate.
/// When several labels claim the same field the last one wins, matching
/// the source system's behavior for duplicated columns.
pub fn resolve_columns(raw_labels: &[String], crew: CrewSchema) -> Option<ColumnMap> {
    let mut machine = None;
    let mut downtime = None;
    let mut optional = HashMap::new();

    for (idx, raw) in raw_labels.iter().enumerate() {
        let label = clean_label(raw);
        match match_field(&label, crew) {
            Some(Field::Machine) => machine = Some(idx),
            Some(Field::Downtime) => downtime = Some(idx),
            Some(field) => {
                optional.insert(field, idx);
            }
            None => {}
        }
    }

    match (machine, downtime) {
        (Some(machine), Some(downtime)) => Some(ColumnMap {
            machine,
            downtime,
            optional,
        }),
        (Some(_), None) | (None, Some(_)) | (None, None) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
