//! The unified downtime table and its derived views.
//!
//! The table is assembled once per ingestion run and handed to the caller
//! by value; views borrow from it, so presentation-side filtering can
//! never mutate the assembled records.

use chrono::NaiveDate;

use crate::record::{Area, DowntimeRecord};

/// The ordered concatenation of every sheet's surviving records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DowntimeTable {
    records: Vec<DowntimeRecord>,
}

impl DowntimeTable {
    /// The empty table: the defined terminal state for a workbook that
    /// yielded no records. Not an error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenates per-sheet batches, preserving each batch's internal
    /// row order and the batch encounter order.
    pub fn from_batches(batches: Vec<Vec<DowntimeRecord>>) -> Self {
        let records = batches.into_iter().flatten().collect();
        Self { records }
    }

    /// All records, in assembly order.
    pub fn records(&self) -> &[DowntimeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of downtime minutes over the whole table.
    pub fn total_minutes(&self) -> f64 {
        self.records.iter().map(|r| r.downtime_minutes).sum()
    }

    /// The distinct areas present, in fixed area order.
    pub fn areas_present(&self) -> Vec<Area> {
        Area::ALL
            .into_iter()
            .filter(|area| self.records.iter().any(|r| r.area == *area))
            .collect()
    }
}

/// Filters a record view by area set and inclusive date range.
///
/// `areas = None` keeps every area. Records without a parsed date are
/// excluded only when a date bound is given, since they cannot satisfy it.
pub fn filter_records<'a>(
    records: impl IntoIterator<Item = &'a DowntimeRecord>,
    areas: Option<&[Area]>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Vec<&'a DowntimeRecord> {
    records
        .into_iter()
        .filter(|r| areas.is_none_or(|set| set.contains(&r.area)))
        .filter(|r| match (since, until) {
            (None, None) => true,
            (lo, hi) => r.date_value.is_some_and(|d| {
                lo.is_none_or(|lo| d >= lo) && hi.is_none_or(|hi| d <= hi)
            }),
        })
        .collect()
}

/// Sorts a view by total downtime, largest first. Stable, so equal
/// durations keep their assembly order.
pub fn sort_by_downtime_desc(records: &mut [&DowntimeRecord]) {
    records.sort_by(|a, b| b.downtime_minutes.total_cmp(&a.downtime_minutes));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(area: Area, machine: &str, minutes: f64) -> DowntimeRecord {
        DowntimeRecord {
            area,
            date: "-".to_owned(),
            date_value: None,
            time: "-".to_owned(),
            machine: machine.to_owned(),
            machine_type: "-".to_owned(),
            machine_brand: "-".to_owned(),
            crew: "Unknown".to_owned(),
            cause: " - ".to_owned(),
            action: "-".to_owned(),
            downtime_minutes: minutes,
            stop_date: "-".to_owned(),
            start_repair: "-".to_owned(),
            stop_repair: "-".to_owned(),
            start_production: "-".to_owned(),
            subcause: String::new(),
            response_minutes: 0.0,
            technical_minutes: 0.0,
            pic: "-".to_owned(),
        }
    }

    fn dated(area: Area, machine: &str, y: i32, m: u32, d: u32) -> DowntimeRecord {
        DowntimeRecord {
            date_value: NaiveDate::from_ymd_opt(y, m, d),
            ..record(area, machine, 10.0)
        }
    }

    // ── assembly ─────────────────────────────────────────────────────────────

    #[test]
    fn from_batches_concatenates_in_order() {
        let a = vec![
            record(Area::Injection, "INJ-01", 5.0),
            record(Area::Injection, "INJ-02", 6.0),
        ];
        let b = vec![record(Area::Filling, "FIL-01", 7.0)];
        let table = DowntimeTable::from_batches(vec![a, b]);
        let machines: Vec<&str> = table.records().iter().map(|r| r.machine.as_str()).collect();
        assert_eq!(machines, ["INJ-01", "INJ-02", "FIL-01"]);
    }

    #[test]
    fn concatenation_length_is_sum_of_batch_lengths() {
        let a = vec![record(Area::Cutting, "CUT-01", 1.0); 3];
        let b = vec![record(Area::Packing, "PAC-01", 2.0); 4];
        let table = DowntimeTable::from_batches(vec![a, b]);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn empty_batches_contribute_nothing() {
        let table = DowntimeTable::from_batches(vec![
            vec![],
            vec![record(Area::Injection, "INJ-01", 5.0)],
            vec![],
        ]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn no_batches_is_the_empty_terminal_state() {
        let table = DowntimeTable::from_batches(vec![]);
        assert!(table.is_empty());
        assert_eq!(table, DowntimeTable::empty());
    }

    #[test]
    fn total_minutes_sums_the_table() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Injection, "a", 30.0),
            record(Area::Injection, "b", 12.5),
        ]]);
        assert_eq!(table.total_minutes(), 42.5);
    }

    #[test]
    fn areas_present_lists_fixed_order_unique() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Packing, "p", 1.0),
            record(Area::Injection, "i", 1.0),
            record(Area::Packing, "p2", 1.0),
        ]]);
        assert_eq!(table.areas_present(), [Area::Injection, Area::Packing]);
    }

    // ── views ────────────────────────────────────────────────────────────────

    #[test]
    fn area_filter_keeps_only_selected_areas() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Injection, "i", 1.0),
            record(Area::Filling, "f", 2.0),
        ]]);
        let view = filter_records(table.records(), Some(&[Area::Filling]), None, None);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].machine, "f");
    }

    #[test]
    fn no_area_filter_keeps_everything() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Injection, "i", 1.0),
            record(Area::Filling, "f", 2.0),
        ]]);
        assert_eq!(filter_records(table.records(), None, None, None).len(), 2);
    }

    #[test]
    fn date_range_is_inclusive() {
        let table = DowntimeTable::from_batches(vec![vec![
            dated(Area::Injection, "jan", 2024, 1, 15),
            dated(Area::Injection, "feb", 2024, 2, 15),
            dated(Area::Injection, "mar", 2024, 3, 15),
        ]]);
        let view = filter_records(
            table.records(),
            None,
            NaiveDate::from_ymd_opt(2024, 1, 15),
            NaiveDate::from_ymd_opt(2024, 2, 15),
        );
        let machines: Vec<&str> = view.iter().map(|r| r.machine.as_str()).collect();
        assert_eq!(machines, ["jan", "feb"]);
    }

    #[test]
    fn undated_records_are_excluded_by_date_bounds_only() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Injection, "undated", 1.0),
            dated(Area::Injection, "dated", 2024, 1, 1),
        ]]);
        assert_eq!(filter_records(table.records(), None, None, None).len(), 2);
        let bounded = filter_records(
            table.records(),
            None,
            NaiveDate::from_ymd_opt(2023, 1, 1),
            None,
        );
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].machine, "dated");
    }

    #[test]
    fn sorting_a_view_does_not_touch_the_table() {
        let table = DowntimeTable::from_batches(vec![vec![
            record(Area::Injection, "small", 1.0),
            record(Area::Injection, "big", 100.0),
        ]]);
        let mut view = filter_records(table.records(), None, None, None);
        sort_by_downtime_desc(&mut view);
        assert_eq!(view[0].machine, "big");
        // Assembly order survives underneath.
        assert_eq!(table.records()[0].machine, "small");
    }

    #[test]
    fn zero_downtime_rows_are_kept() {
        let table =
            DowntimeTable::from_batches(vec![vec![record(Area::Injection, "idle", 0.0)]]);
        assert_eq!(table.len(), 1);
    }
}
