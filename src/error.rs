use std::path::PathBuf;

/// Failures of a conversion run.
///
/// Only [`ConvertError::SourceFileMissing`] is recoverable: the pipeline skips
/// that source and keeps going. Everything else aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    // ── Input ──
    #[error("Input directory does not exist: {}", path.display())]
    InputDirectoryMissing { path: PathBuf },

    #[error("Source file disappeared before it could be read: {}", path.display())]
    SourceFileMissing { path: PathBuf },

    #[error("Failed to list input directory '{}': {source}", path.display())]
    ListInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source '{}': {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // ── Output ──
    #[error("Failed to reset output directory '{}': {source}", path.display())]
    ResetOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{}': {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// Process exit code reported to the orchestration wrapper.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InputDirectoryMissing { .. }
            | ConvertError::SourceFileMissing { .. }
            | ConvertError::ListInput { .. }
            | ConvertError::ReadSource { .. }
            | ConvertError::Csv { .. } => 2,
            ConvertError::ResetOutput { .. }
            | ConvertError::CreateDir { .. }
            | ConvertError::WriteFile { .. }
            | ConvertError::Serialize { .. } => 3,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        AppError::new(err.exit_code(), format!("Conversion failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
