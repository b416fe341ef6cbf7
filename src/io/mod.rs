//! Filesystem boundary.
//!
//! - source discovery (`scan`)
//! - CSV ingest + normalization (`ingest`)
//! - partition documents (`partition`)
//! - `index.json` read/write (`index`)
//! - output-root reset and JSON writing (`output`)

pub mod index;
pub mod ingest;
pub mod output;
pub mod partition;
pub mod scan;

pub use index::*;
pub use ingest::*;
pub use output::*;
pub use partition::*;
pub use scan::*;
