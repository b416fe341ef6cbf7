//! Reporting utilities: human-readable run summaries.

pub mod format;

pub use format::{format_index_summary, format_run_summary};
