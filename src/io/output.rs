//! Output-root housekeeping and the shared JSON document writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ConvertError;

/// Delete `output_root` (if present) and recreate it empty.
///
/// Destructive: the output root is owned by the converter and anything else
/// stored there is lost.
pub fn reset_output_root(output_root: &Path) -> Result<(), ConvertError> {
    let reset_err = |source| ConvertError::ResetOutput {
        path: output_root.to_path_buf(),
        source,
    };

    if output_root.exists() {
        warn!(path = %output_root.display(), "removing previous output directory");
        std::fs::remove_dir_all(output_root).map_err(reset_err)?;
    }
    std::fs::create_dir_all(output_root).map_err(reset_err)?;
    info!(path = %output_root.display(), "output directory ready");
    Ok(())
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), ConvertError> {
    std::fs::create_dir_all(dir).map_err(|source| ConvertError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty-printed JSON (two-space indent), replacing `path`.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ConvertError> {
    let write_err = |source| ConvertError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        if source.is_io() {
            ConvertError::WriteFile {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            ConvertError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    writer.flush().map_err(write_err)?;
    Ok(())
}
