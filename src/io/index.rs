//! Read/write `index.json`.
//!
//! The index is the front end's entry point: symbol → interval → entry
//! (see `domain::IndexEntry`). It is written once, as the last step of a run.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::IndexDocument;
use crate::error::ConvertError;
use crate::io::output::write_json_pretty;

/// File name of the index document inside the output root.
pub const INDEX_FILE_NAME: &str = "index.json";

pub fn index_path(output_root: &Path) -> PathBuf {
    output_root.join(INDEX_FILE_NAME)
}

/// Write the index document to `<output_root>/index.json`.
pub fn write_index(output_root: &Path, index: &IndexDocument) -> Result<PathBuf, ConvertError> {
    let path = index_path(output_root);
    write_json_pretty(&path, index)?;
    info!(file = %path.display(), symbols = index.len(), "index written");
    Ok(path)
}

/// Read an index document back, e.g. for reporting.
pub fn read_index(path: &Path) -> Result<IndexDocument, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(file).map_err(|source| ConvertError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}
