//! Partition document writer.
//!
//! Layout under the output root:
//!
//! ```text
//! <SYMBOL>/<interval>/all.json        plan = all
//! <SYMBOL>/<interval>/YYYY-MM.json    plan = month
//! <SYMBOL>/<interval>/YYYY-Q#.json    plan = quarter
//! ```
//!
//! Each document is a JSON array of records in source order.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{Record, SourceDescriptor};
use crate::error::ConvertError;
use crate::io::output::{ensure_dir, write_json_pretty};
use crate::partition::{PartitionPlan, group_records};

/// One document written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPartition {
    pub file_name: String,
    pub record_count: usize,
}

/// Everything written for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutput {
    /// In ascending key order.
    pub partitions: Vec<WrittenPartition>,
}

impl PartitionOutput {
    pub fn file_names(&self) -> Vec<String> {
        self.partitions.iter().map(|p| p.file_name.clone()).collect()
    }
}

/// `<output_root>/<symbol>/<interval>`.
pub fn interval_dir(output_root: &Path, source: &SourceDescriptor) -> PathBuf {
    output_root.join(&source.symbol).join(&source.interval)
}

/// Write `records` under `plan`.
///
/// Returns `Ok(None)` without touching the filesystem when there are no
/// records. Any I/O failure aborts the run.
pub fn write_partitions(
    output_root: &Path,
    source: &SourceDescriptor,
    records: &[Record],
    plan: PartitionPlan,
) -> Result<Option<PartitionOutput>, ConvertError> {
    if records.is_empty() {
        return Ok(None);
    }

    let dir = interval_dir(output_root, source);
    ensure_dir(&dir)?;

    let mut partitions = Vec::new();
    for (key, group) in group_records(plan, records) {
        let file_name = format!("{key}.json");
        let path = dir.join(&file_name);
        write_json_pretty(&path, &group)?;
        info!(file = %path.display(), records = group.len(), "partition written");
        partitions.push(WrittenPartition {
            file_name,
            record_count: group.len(),
        });
    }

    Ok(Some(PartitionOutput { partitions }))
}
