//! Terminal formatting of a finished run.
//!
//! Kept apart from the pipeline so output changes stay localized.

use crate::app::pipeline::RunOutput;
use crate::domain::IndexDocument;

/// Per-symbol, per-interval record and file counts.
pub fn format_index_summary(index: &IndexDocument) -> String {
    if index.is_empty() {
        return "No data produced.\n".to_string();
    }

    let mut out = String::from("Available data:\n");
    for (symbol, intervals) in index {
        out.push_str(&format!("  {symbol}:\n"));
        for (interval, entry) in intervals {
            out.push_str(&format!(
                "    {interval}: {} records ({} files, {})\n",
                entry.record_count,
                entry.files.len(),
                entry.strategy,
            ));
        }
    }
    out
}

/// Full run summary: counters followed by the index listing.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();
    out.push_str("=== chartpart - CSV to chart partitions ===\n");
    out.push_str(&format!("Input: {}\n", run.input_dir.display()));
    out.push_str(&format!("Output: {}\n", run.output_dir.display()));
    out.push_str(&format!(
        "Sources: {} matched | {} converted | {} missing | {} empty\n",
        run.stats.matched, run.stats.converted, run.stats.missing, run.stats.empty,
    ));
    out.push_str(&format!("Index: {}\n\n", run.index_path.display()));
    out.push_str(&format_index_summary(&run.index));
    out
}
