//! Splitting a record sequence into partitions.
//!
//! Every record lands in exactly one partition and each partition keeps the
//! relative source order of its records. Partitions come back in ascending key
//! order, which is also chronological for `YYYY-MM` and `YYYY-Q#` keys.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::Record;
use crate::domain::time::year_month;

use super::planner::PartitionPlan;

/// Key of one partition; its `Display` form is the document's file stem.
///
/// Ordering is chronological within a plan, with `Unknown` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartitionKey {
    /// `all`
    All,
    /// `YYYY-MM`
    Month { year: i32, month: u32 },
    /// `YYYY-Q#`
    Quarter { year: i32, quarter: u32 },
    /// `unknown`: time missing or not parsable.
    Unknown,
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::All => f.write_str("all"),
            PartitionKey::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            PartitionKey::Quarter { year, quarter } => write!(f, "{year:04}-Q{quarter}"),
            PartitionKey::Unknown => f.write_str("unknown"),
        }
    }
}

/// Partition key of one record under `plan`.
pub fn partition_key(plan: PartitionPlan, record: &Record) -> PartitionKey {
    if plan == PartitionPlan::All {
        return PartitionKey::All;
    }

    let calendar = record
        .time
        .as_ref()
        .and_then(|t| t.epoch_seconds())
        .and_then(year_month);

    match (plan, calendar) {
        (PartitionPlan::Month, Some((year, month))) => PartitionKey::Month { year, month },
        (PartitionPlan::Quarter, Some((year, month))) => PartitionKey::Quarter {
            year,
            quarter: (month - 1) / 3 + 1,
        },
        _ => PartitionKey::Unknown,
    }
}

/// Group `records` by partition key.
pub fn group_records(plan: PartitionPlan, records: &[Record]) -> BTreeMap<PartitionKey, Vec<&Record>> {
    let mut groups: BTreeMap<PartitionKey, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(partition_key(plan, record)).or_default().push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordTime;

    fn at(secs: i64, close: f64) -> Record {
        Record {
            time: Some(RecordTime::Epoch(secs)),
            close: Some(close),
            ..Record::default()
        }
    }

    fn closes(records: &[&Record]) -> Vec<f64> {
        records.iter().filter_map(|r| r.close).collect()
    }

    // 2024-03-31T23:59:59Z, 2024-04-01T00:00:00Z, 2024-07-01T00:00:00Z
    const MAR_END: i64 = 1_711_929_599;
    const APR_START: i64 = 1_711_929_600;
    const JUL_START: i64 = 1_719_792_000;

    fn key(plan: PartitionPlan, secs: i64) -> String {
        partition_key(plan, &at(secs, 0.0)).to_string()
    }

    fn key_names(groups: &BTreeMap<PartitionKey, Vec<&Record>>) -> Vec<String> {
        groups.keys().map(PartitionKey::to_string).collect()
    }

    #[test]
    fn keys_follow_calendar_boundaries() {
        assert_eq!(key(PartitionPlan::Month, MAR_END), "2024-03");
        assert_eq!(key(PartitionPlan::Month, APR_START), "2024-04");
        assert_eq!(key(PartitionPlan::Quarter, MAR_END), "2024-Q1");
        assert_eq!(key(PartitionPlan::Quarter, APR_START), "2024-Q2");
        assert_eq!(key(PartitionPlan::Quarter, JUL_START), "2024-Q3");
        assert_eq!(key(PartitionPlan::All, JUL_START), "all");
    }

    #[test]
    fn quarter_key_covers_every_month() {
        let quarters: Vec<String> = (1..=12)
            .map(|month| {
                let secs = chrono::NaiveDate::from_ymd_opt(2023, month, 15)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
                    .and_utc()
                    .timestamp();
                key(PartitionPlan::Quarter, secs)
            })
            .collect();
        assert_eq!(&quarters[0..3], ["2023-Q1", "2023-Q1", "2023-Q1"]);
        assert_eq!(quarters[3], "2023-Q2");
        assert_eq!(quarters[8], "2023-Q3");
        assert_eq!(quarters[11], "2023-Q4");
    }

    #[test]
    fn keys_order_chronologically_with_unknown_last() {
        let mut keys = vec![
            PartitionKey::Unknown,
            PartitionKey::Month { year: 2024, month: 10 },
            PartitionKey::Month { year: 2023, month: 12 },
            PartitionKey::Month { year: 2024, month: 2 },
        ];
        keys.sort();
        let names: Vec<String> = keys.iter().map(PartitionKey::to_string).collect();
        assert_eq!(names, ["2023-12", "2024-02", "2024-10", "unknown"]);
    }

    #[test]
    fn grouping_partitions_input_and_keeps_source_order() {
        // Deliberately out of chronological order.
        let records = vec![
            at(APR_START + 60, 1.0),
            at(MAR_END, 2.0),
            at(APR_START, 3.0),
            at(MAR_END - 60, 4.0),
            at(JUL_START, 5.0),
        ];
        let groups = group_records(PartitionPlan::Month, &records);

        assert_eq!(key_names(&groups), ["2024-03", "2024-04", "2024-07"]);
        let month = |month| &groups[&PartitionKey::Month { year: 2024, month }];
        assert_eq!(closes(month(3)), [2.0, 4.0]);
        assert_eq!(closes(month(4)), [1.0, 3.0]);
        assert_eq!(closes(month(7)), [5.0]);
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), 5);
    }

    #[test]
    fn degraded_times_go_to_unknown_partition() {
        let records = vec![
            at(APR_START, 1.0),
            Record {
                time: Some(RecordTime::Raw("garbage".to_string())),
                close: Some(2.0),
                ..Record::default()
            },
            Record {
                close: Some(3.0),
                ..Record::default()
            },
        ];
        let groups = group_records(PartitionPlan::Quarter, &records);
        assert_eq!(key_names(&groups), ["2024-Q2", "unknown"]);
        assert_eq!(closes(&groups[&PartitionKey::Unknown]), [2.0, 3.0]);
    }

    #[test]
    fn all_plan_yields_one_group() {
        let records = vec![at(MAR_END, 1.0), at(JUL_START, 2.0)];
        let groups = group_records(PartitionPlan::All, &records);
        assert_eq!(groups.len(), 1);
        assert_eq!(closes(&groups[&PartitionKey::All]), [1.0, 2.0]);
    }
}
