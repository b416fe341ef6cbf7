//! Pure partitioning logic: choosing a plan and grouping records under it.
//!
//! Nothing here touches the filesystem; `io::partition` writes the groups.

pub mod grouping;
pub mod planner;

pub use grouping::{PartitionKey, group_records, partition_key};
pub use planner::{PartitionPlan, PartitionPolicy, plan_partitions};
