use super::BuildConfig;
use crate::catalog::ElementRecord;
use crate::cluster::Cluster;
use crate::graph::Connection;
use crate::params::JointSlot;
use crate::proximity::ParentLink;

/// The version of the snapshot layout written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Error raised while reading, writing or checking a [`BuildSnapshot`].
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// The snapshot could not be encoded or decoded.
    #[error("invalid snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
    /// The storage medium failed.
    #[error("snapshot storage failure: {0}")]
    Io(#[from] std::io::Error),
    /// The snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in the snapshot.
        found: u32,
        /// The version this crate writes.
        expected: u32,
    },
    /// The snapshot references records it does not contain.
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(&'static str),
}

/// Everything a build derived from the geometry, so that later passes can
/// recompute the joint parameters without touching the geometry again.
///
/// A snapshot only holds plain indices and names: no reference to live host
/// objects survives a build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    /// The layout version, see [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// The configuration of the build.
    pub config: BuildConfig,
    /// The catalog elements.
    pub elements: Vec<ElementRecord>,
    /// The connections, with their cluster index set.
    pub connections: Vec<Connection>,
    /// The clusters.
    pub clusters: Vec<Cluster>,
    /// The cluster of every connection.
    pub connection_to_cluster: Vec<u32>,
    /// The undersized elements and their parents.
    pub parent_links: Vec<ParentLink>,
    /// The constraint layout of every joint.
    pub joint_slots: Vec<JointSlot>,
}

impl BuildSnapshot {
    /// Encodes this snapshot as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes and checks a snapshot encoded with [`BuildSnapshot::to_json`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the version of this snapshot and that all its indices are in bounds.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let element_count = self.elements.len() as u32;
        let connection_count = self.connections.len() as u32;
        let cluster_count = self.clusters.len() as u32;

        if self
            .connections
            .iter()
            .any(|c| c.elements.iter().any(|e| *e >= element_count))
        {
            return Err(SnapshotError::Inconsistent(
                "connection references an unknown element",
            ));
        }

        if self.connection_to_cluster.len() != self.connections.len()
            || self.connection_to_cluster.iter().any(|c| *c >= cluster_count)
        {
            return Err(SnapshotError::Inconsistent(
                "connection to cluster map does not match the clusters",
            ));
        }

        if self
            .clusters
            .iter()
            .any(|c| c.members.is_empty() || c.members.iter().any(|m| *m >= connection_count))
        {
            return Err(SnapshotError::Inconsistent(
                "cluster references an unknown connection",
            ));
        }

        if self.joint_slots.iter().any(|s| s.cluster >= cluster_count) {
            return Err(SnapshotError::Inconsistent(
                "joint references an unknown cluster",
            ));
        }

        if self
            .parent_links
            .iter()
            .any(|l| l.child >= element_count || l.parent >= element_count)
        {
            return Err(SnapshotError::Inconsistent(
                "parent link references an unknown element",
            ));
        }

        Ok(())
    }
}
