//! Source discovery.
//!
//! The input directory is flat. A file takes part in a run only if its name
//! looks like `<SYMBOL>-<N><unit>-<dateRangeLabel>.csv`; anything else is
//! treated as unrelated and skipped without a warning.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{SamplingUnit, SourceDescriptor};
use crate::error::ConvertError;

/// Recognized tabular-file extension.
pub const SOURCE_EXTENSION: &str = ".csv";

fn source_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]+)-([0-9]+)([smhd])-(.+)\.csv$").expect("source name pattern is valid")
    })
}

/// Parse a file name into a descriptor; `None` when it does not match.
pub fn parse_source_name(file_name: &str) -> Option<SourceDescriptor> {
    let caps = source_name_pattern().captures(file_name)?;
    let unit_str = &caps[3];
    let unit = unit_str.chars().next().and_then(SamplingUnit::from_char)?;

    Some(SourceDescriptor {
        symbol: caps[1].to_string(),
        interval: format!("{}{}", &caps[2], unit_str),
        unit,
        date_range: caps[4].to_string(),
        file_name: file_name.to_string(),
    })
}

/// List `input_dir` and return descriptors for every recognized source file,
/// sorted by file name.
pub fn scan_sources(input_dir: &Path) -> Result<Vec<SourceDescriptor>, ConvertError> {
    if !input_dir.is_dir() {
        return Err(ConvertError::InputDirectoryMissing {
            path: input_dir.to_path_buf(),
        });
    }

    let list_err = |source| ConvertError::ListInput {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(input_dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        // Follows symlinks; directories, sockets, and dangling links are skipped.
        let metadata = match std::fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(list_err(err)),
        };
        if !metadata.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.ends_with(SOURCE_EXTENSION) {
            continue;
        }
        if let Some(descriptor) = parse_source_name(&name) {
            sources.push(descriptor);
        }
    }

    sources.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(sources)
}
