//! In-memory accumulation of `index.json`.
//!
//! The builder is owned by the pipeline for the duration of one run and is
//! only ever handed out by `&mut` to the per-file step.

use crate::domain::{DateRange, IndexDocument, IndexEntry, PartitionStrategy, Record, SourceDescriptor};

/// Build the entry describing one processed source.
///
/// The date range is the time of the first and last record in source order,
/// which need not be the chronological min/max.
pub fn build_entry(
    records: &[Record],
    files: Vec<String>,
    strategy: PartitionStrategy,
    last_updated: String,
) -> IndexEntry {
    IndexEntry {
        files,
        strategy,
        record_count: records.len(),
        date_range: DateRange {
            start: records.first().and_then(|r| r.time.clone()),
            end: records.last().and_then(|r| r.time.clone()),
        },
        last_updated,
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    document: IndexDocument,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry for `(source.symbol, source.interval)`, replacing (not
    /// merging) any earlier entry. Returns the replaced entry.
    pub fn insert(&mut self, source: &SourceDescriptor, entry: IndexEntry) -> Option<IndexEntry> {
        self.document
            .entry(source.symbol.clone())
            .or_default()
            .insert(source.interval.clone(), entry)
    }

    pub fn get(&self, symbol: &str, interval: &str) -> Option<&IndexEntry> {
        self.document.get(symbol)?.get(interval)
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn into_document(self) -> IndexDocument {
        self.document
    }
}
