//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built by the record parser and grouped by the partition planner
//! - written verbatim into partition documents and `index.json`
//! - read back by tests to check what a run produced

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Time granularity of one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl SamplingUnit {
    /// Map the unit suffix of an interval label (`s`, `m`, `h`, `d`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Second),
            'm' => Some(Self::Minute),
            'h' => Some(Self::Hour),
            'd' => Some(Self::Day),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Second => 's',
            Self::Minute => 'm',
            Self::Hour => 'h',
            Self::Day => 'd',
        }
    }
}

/// Metadata parsed from a source file name such as
/// `BTCUSDT-1h-2024-05-01_to_2024-06-01.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Uppercase ticker, e.g. `BTCUSDT`.
    pub symbol: String,
    /// `<N><unit>`, e.g. `1h`.
    pub interval: String,
    pub unit: SamplingUnit,
    /// Opaque date-range label; only ever part of the file name.
    pub date_range: String,
    pub file_name: String,
}

/// Canonical value of a record's `time` column.
///
/// A cell that could not be parsed keeps its original text (`Raw`) instead of
/// dropping the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordTime {
    /// Seconds since the Unix epoch (UTC).
    Epoch(i64),
    Raw(String),
}

impl RecordTime {
    pub fn epoch_seconds(&self) -> Option<i64> {
        match self {
            RecordTime::Epoch(secs) => Some(*secs),
            RecordTime::Raw(_) => None,
        }
    }
}

impl fmt::Display for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordTime::Epoch(secs) => write!(f, "{secs}"),
            RecordTime::Raw(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// One market-data row.
///
/// A field is `None` when its column is absent from the source header and is
/// then left out of the written document. Numeric cells that fail to parse
/// hold `f64::NAN` (serialized as `null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<RecordTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Name of the partitioning strategy, as recorded in `index.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStrategy {
    All,
    Month,
    Quarter,
}

impl PartitionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            PartitionStrategy::All => "all",
            PartitionStrategy::Month => "month",
            PartitionStrategy::Quarter => "quarter",
        }
    }
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time of the first and last record, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RecordTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RecordTime>,
}

/// Everything the front end needs to know about one (symbol, interval) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Partition file names inside `<symbol>/<interval>/`.
    pub files: Vec<String>,
    pub strategy: PartitionStrategy,
    pub record_count: usize,
    pub date_range: DateRange,
    /// RFC 3339, UTC, millisecond precision.
    pub last_updated: String,
}

/// symbol → interval label → entry.
///
/// Ordered maps keep `index.json` byte-stable across runs.
pub type IndexDocument = BTreeMap<String, BTreeMap<String, IndexEntry>>;
