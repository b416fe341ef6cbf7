//! Partition strategy selection.
//!
//! Fine-grained sources get split once they grow past what a chart can load in
//! one request:
//!
//! | unit        | split when rows exceed | split by |
//! |-------------|------------------------|----------|
//! | `s`         | 1,300,000              | month    |
//! | `m`         | 130,000                | quarter  |
//! | `h`, `d`    | never                  | -        |
//!
//! Unknown units follow the `h`/`d` row.

use crate::domain::{PartitionStrategy, SamplingUnit};

pub const SECOND_SPLIT_THRESHOLD: usize = 1_300_000;
pub const MINUTE_SPLIT_THRESHOLD: usize = 130_000;

/// How one source file is split into partition documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPlan {
    /// One `all.json`.
    All,
    /// One `YYYY-MM.json` per calendar month.
    Month,
    /// One `YYYY-Q#.json` per calendar quarter.
    Quarter,
}

impl PartitionPlan {
    pub fn strategy(self) -> PartitionStrategy {
        match self {
            PartitionPlan::All => PartitionStrategy::All,
            PartitionPlan::Month => PartitionStrategy::Month,
            PartitionPlan::Quarter => PartitionStrategy::Quarter,
        }
    }
}

/// Row-count thresholds above which a unit is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionPolicy {
    pub second_threshold: usize,
    pub minute_threshold: usize,
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        Self {
            second_threshold: SECOND_SPLIT_THRESHOLD,
            minute_threshold: MINUTE_SPLIT_THRESHOLD,
        }
    }
}

impl PartitionPolicy {
    /// Largest row count kept in a single partition, and the split used above it.
    /// `None` means the unit is never split.
    fn split_rule(&self, unit: Option<SamplingUnit>) -> Option<(usize, PartitionPlan)> {
        match unit {
            Some(SamplingUnit::Second) => Some((self.second_threshold, PartitionPlan::Month)),
            Some(SamplingUnit::Minute) => Some((self.minute_threshold, PartitionPlan::Quarter)),
            Some(SamplingUnit::Hour) | Some(SamplingUnit::Day) | None => None,
        }
    }

    pub fn plan(&self, unit: Option<SamplingUnit>, row_count: usize) -> PartitionPlan {
        match self.split_rule(unit) {
            Some((threshold, split)) if row_count > threshold => split,
            _ => PartitionPlan::All,
        }
    }

    /// Plan from a raw unit character; unrecognized characters are never split.
    pub fn plan_for_unit_char(&self, unit: char, row_count: usize) -> PartitionPlan {
        self.plan(SamplingUnit::from_char(unit), row_count)
    }
}

/// Plan with the default thresholds.
pub fn plan_partitions(unit: char, row_count: usize) -> PartitionPlan {
    PartitionPolicy::default().plan_for_unit_char(unit, row_count)
}
