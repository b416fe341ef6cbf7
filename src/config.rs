//! Run configuration.
//!
//! Paths resolve as: command-line flag, then environment (a `.env` file in the
//! working directory is loaded first), then the defaults below.

use std::path::PathBuf;

use crate::partition::PartitionPolicy;

pub const INPUT_DIR_ENV: &str = "CHARTPART_INPUT_DIR";
pub const OUTPUT_DIR_ENV: &str = "CHARTPART_OUTPUT_DIR";

pub const DEFAULT_INPUT_DIR: &str = "data/csv";
pub const DEFAULT_OUTPUT_DIR: &str = "public/data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Flat directory of `<SYMBOL>-<N><unit>-<label>.csv` files.
    pub input_dir: PathBuf,
    /// Owned by the converter; wiped at the start of every run.
    pub output_dir: PathBuf,
    pub policy: PartitionPolicy,
}

impl ConvertConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            policy: PartitionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PartitionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}
