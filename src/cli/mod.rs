//! Command-line parsing.
//!
//! `chartpart` with no arguments runs once with the configured paths. The
//! flags only exist so a caller can override the environment.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    ConvertConfig, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, INPUT_DIR_ENV, OUTPUT_DIR_ENV,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "chartpart",
    version,
    about = "Convert OHLCV CSV files into partitioned JSON documents for charting"
)]
pub struct Cli {
    /// Directory of `<SYMBOL>-<N><unit>-<label>.csv` source files.
    #[arg(long, env = INPUT_DIR_ENV, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Output root. Deleted and recreated on every run.
    #[arg(long, env = OUTPUT_DIR_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> ConvertConfig {
        ConvertConfig::new(self.input_dir, self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_set_both_paths() {
        let cli = Cli::try_parse_from(["chartpart", "--input-dir", "in", "--output-dir", "out"]).unwrap();
        let config = cli.into_config();
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["chartpart", "extra"]).is_err());
    }
}
