//! `chart-partitions` library crate.
//!
//! Converts OHLCV CSV files into per-symbol, per-interval JSON partition
//! documents plus an `index.json` manifest for a charting front end.
//!
//! The binary (`chartpart`) is a thin wrapper around this library so the
//! conversion can be tested without spawning processes.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod index;
pub mod io;
pub mod partition;
pub mod report;
