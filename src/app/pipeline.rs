//! The conversion run.
//!
//! scan -> reset output -> (parse -> plan -> write -> index entry) per source
//! -> write `index.json`
//!
//! Sources are processed one at a time, in scan order. A source that vanished
//! after the scan or has no data rows is skipped; any other failure aborts the
//! run and leaves already-written partitions on disk.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::ConvertConfig;
use crate::domain::time::now_rfc3339;
use crate::domain::{IndexDocument, SourceDescriptor};
use crate::error::ConvertError;
use crate::index::{IndexBuilder, build_entry};
use crate::io::{read_source, reset_output_root, scan_sources, write_index, write_partitions};

/// Per-run source counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub matched: usize,
    pub converted: usize,
    pub missing: usize,
    pub empty: usize,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub index: IndexDocument,
    pub stats: RunStats,
}

/// What happened to one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    Converted { records: usize, partitions: usize },
    /// Listed by the scan but gone by the time it was read.
    Missing,
    /// Header only.
    Empty,
}

/// Execute one full conversion run.
pub fn run_conversion(config: &ConvertConfig) -> Result<RunOutput, ConvertError> {
    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        "starting conversion"
    );

    // Scan first: a missing input directory must fail before the output is touched.
    let sources = scan_sources(&config.input_dir)?;
    reset_output_root(&config.output_dir)?;

    if sources.is_empty() {
        warn!(input = %config.input_dir.display(), "no matching source files found");
    } else {
        info!(count = sources.len(), "matched source files");
    }

    let mut index = IndexBuilder::new();
    let mut stats = RunStats {
        matched: sources.len(),
        ..RunStats::default()
    };

    for source in &sources {
        match process_source(config, source, &mut index)? {
            SourceOutcome::Converted { .. } => stats.converted += 1,
            SourceOutcome::Missing => stats.missing += 1,
            SourceOutcome::Empty => stats.empty += 1,
        }
    }

    let index = index.into_document();
    let index_path = write_index(&config.output_dir, &index)?;
    info!(
        converted = stats.converted,
        missing = stats.missing,
        empty = stats.empty,
        "conversion finished"
    );

    Ok(RunOutput {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        index_path,
        index,
        stats,
    })
}

/// Convert a single source and record its index entry.
pub fn process_source(
    config: &ConvertConfig,
    source: &SourceDescriptor,
    index: &mut IndexBuilder,
) -> Result<SourceOutcome, ConvertError> {
    let path = config.input_dir.join(&source.file_name);
    info!(file = %source.file_name, "processing source");

    let records = match read_source(&path) {
        Ok(ingested) => ingested.records,
        Err(ConvertError::SourceFileMissing { path }) => {
            warn!(file = %path.display(), "source file disappeared; skipped");
            return Ok(SourceOutcome::Missing);
        }
        Err(err) => return Err(err),
    };

    let plan = config.policy.plan(Some(source.unit), records.len());
    let Some(output) = write_partitions(&config.output_dir, source, &records, plan)? else {
        warn!(file = %source.file_name, "no data rows; skipped");
        return Ok(SourceOutcome::Empty);
    };

    info!(
        symbol = %source.symbol,
        interval = %source.interval,
        strategy = %plan.strategy(),
        records = records.len(),
        partitions = output.partitions.len(),
        "source converted"
    );

    let partitions = output.partitions.len();
    let entry = build_entry(&records, output.file_names(), plan.strategy(), now_rfc3339());
    if index.insert(source, entry).is_some() {
        warn!(
            symbol = %source.symbol,
            interval = %source.interval,
            file = %source.file_name,
            "replaced index entry from an earlier source"
        );
    }

    Ok(SourceOutcome::Converted {
        records: records.len(),
        partitions,
    })
}
