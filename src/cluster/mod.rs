//! Spatial merging of nearby connections into single joints.

pub use self::cluster::{Cluster, ClusterSet};
pub use self::cluster_merger::merge_clusters;

mod cluster;
mod cluster_merger;
