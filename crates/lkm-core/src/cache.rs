//! Source-keyed memoization of ingestion results.
//!
//! Re-processing the same workbook within a few minutes is common (the
//! consumer re-renders on every filter change), so callers may park the
//! assembled table here keyed by its source identifier (a file path or a
//! resolved export URL). Entries expire after a fixed TTL on read;
//! invalidation is otherwise explicit ("change data" / "refresh"), never
//! implicit.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::table::DowntimeTable;

/// Default entry lifetime: ten minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct Entry {
    table: DowntimeTable,
    fetched_at: Instant,
}

/// A TTL-bounded cache of ingestion results.
#[derive(Debug)]
pub struct TableCache {
    ttl: Duration,
    entries: HashMap<String, Entry>,
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The configured entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached table for `source` if it is still fresh.
    ///
    /// An expired entry is treated as absent; it is overwritten by the
    /// next [`TableCache::insert`] for the same source.
    pub fn get(&self, source: &str) -> Option<&DowntimeTable> {
        self.entries
            .get(source)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| &entry.table)
    }

    /// Stores a freshly assembled table, stamping it now.
    pub fn insert(&mut self, source: impl Into<String>, table: DowntimeTable) {
        self.entries.insert(
            source.into(),
            Entry {
                table,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drops one source's entry. Returns whether one was present.
    pub fn invalidate(&mut self, source: &str) -> bool {
        self.entries.remove(source).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Area, DowntimeRecord};

    fn one_record_table() -> DowntimeTable {
        DowntimeTable::from_batches(vec![vec![DowntimeRecord {
            area: Area::Injection,
            date: "-".to_owned(),
            date_value: None,
            time: "-".to_owned(),
            machine: "INJ-01".to_owned(),
            machine_type: "-".to_owned(),
            machine_brand: "-".to_owned(),
            crew: "Unknown".to_owned(),
            cause: " - ".to_owned(),
            action: "-".to_owned(),
            downtime_minutes: 15.0,
            stop_date: "-".to_owned(),
            start_repair: "-".to_owned(),
            stop_repair: "-".to_owned(),
            start_production: "-".to_owned(),
            subcause: String::new(),
            response_minutes: 0.0,
            technical_minutes: 0.0,
            pic: "-".to_owned(),
        }]])
    }

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache = TableCache::new(Duration::from_secs(60));
        cache.insert("lkm.xlsx", one_record_table());
        assert_eq!(cache.get("lkm.xlsx").map(DowntimeTable::len), Some(1));
    }

    #[test]
    fn unknown_source_is_a_miss() {
        let cache = TableCache::default();
        assert!(cache.get("never-ingested.xlsx").is_none());
    }

    #[test]
    fn zero_ttl_entries_are_always_expired() {
        let mut cache = TableCache::new(Duration::ZERO);
        cache.insert("lkm.xlsx", one_record_table());
        assert!(cache.get("lkm.xlsx").is_none());
    }

    #[test]
    fn invalidate_drops_only_that_source() {
        let mut cache = TableCache::new(Duration::from_secs(60));
        cache.insert("a.xlsx", one_record_table());
        cache.insert("b.xlsx", one_record_table());
        assert!(cache.invalidate("a.xlsx"));
        assert!(cache.get("a.xlsx").is_none());
        assert!(cache.get("b.xlsx").is_some());
    }

    #[test]
    fn invalidate_missing_source_reports_false() {
        let mut cache = TableCache::default();
        assert!(!cache.invalidate("nope.xlsx"));
    }

    #[test]
    fn clear_drops_everything() {
        let mut cache = TableCache::new(Duration::from_secs(60));
        cache.insert("a.xlsx", one_record_table());
        cache.insert("b.xlsx", one_record_table());
        cache.clear();
        assert!(cache.get("a.xlsx").is_none());
        assert!(cache.get("b.xlsx").is_none());
    }

    #[test]
    fn insert_overwrites_and_refreshes() {
        let mut cache = TableCache::new(Duration::from_secs(60));
        cache.insert("a.xlsx", DowntimeTable::empty());
        cache.insert("a.xlsx", one_record_table());
        assert_eq!(cache.get("a.xlsx").map(DowntimeTable::len), Some(1));
    }

    #[test]
    fn default_ttl_is_ten_minutes() {
        assert_eq!(TableCache::default().ttl(), Duration::from_secs(600));
    }
}
