#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Core data model for LKM downtime analysis.
//!
//! "LKM" workbooks are machine-breakdown reports for four production areas
//! (Injection, Filling, Cutting, Packing), authored by hand with variable
//! header rows, noisy column labels, and mixed cell types. This crate holds
//! everything about them that does not require a spreadsheet library:
//!
//! - [`value`]: the tagged [`CellValue`] input type and the four total
//!   normalizers (duration minutes, time/date formatting, crew labels).
//! - [`schema`]: header-label cleaning and the ordered substring rules
//!   that resolve noisy labels into canonical fields.
//! - [`record`]: production areas, crew-schema revisions, and the
//!   normalized downtime event record.
//! - [`table`]: the unified table plus non-mutating derived views.
//! - [`cache`]: the source-keyed, TTL-bounded ingest cache.
//! - [`export`]: CSV serialization of any record view.
//!
//! Reading `.xlsx` workbooks lives in `lkm-excel`; this crate never sees a
//! raw spreadsheet cell, only [`CellValue`].

pub mod cache;
pub mod export;
pub mod record;
pub mod schema;
pub mod table;
pub mod value;

pub use cache::{DEFAULT_TTL, TableCache};
pub use export::{DISPLAY_HEADERS, csv_string, write_csv};
pub use record::{Area, CrewSchema, DowntimeRecord};
pub use schema::{ColumnMap, Field, clean_label, resolve_columns};
pub use table::{DowntimeTable, filter_records, sort_by_downtime_desc};
pub use value::{
    CellValue, clean_crew_label, date_of, duration_minutes, format_date, format_time,
};

/// Returns the current version of the lkm-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
    }
}
