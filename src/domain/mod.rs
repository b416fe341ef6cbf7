//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - source metadata parsed from file names (`SourceDescriptor`, `SamplingUnit`)
//! - parsed market-data rows (`Record`, `RecordTime`)
//! - the published index model (`IndexEntry`, `IndexDocument`)
//! - calendar handling of record times (`time`)

pub mod time;
pub mod types;

pub use types::*;
