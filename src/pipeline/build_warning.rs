use crate::params::{ConnectionType, JointId};
use crate::query::IntersectionError;

/// A recoverable problem met during a build.
///
/// Warnings never stop a build: the affected record falls back to a default
/// or is dropped, and the build ends with [`BuildStatus::PartialFailure`](super::BuildStatus::PartialFailure).
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize)]
pub enum BuildWarning {
    /// A group has no valid material properties and uses the fallback ones.
    #[error("group {group} ({name:?}) has no valid material properties, using the fallback")]
    MaterialFallback {
        /// The group index.
        group: u32,
        /// The group name.
        name: String,
    },
    /// A persisted connection references a group that no longer exists.
    #[error("connection {connection} between elements {elements:?} references a removed group")]
    OrphanedConnection {
        /// The index of the connection in the snapshot.
        connection: u32,
        /// The elements it connects.
        elements: [u32; 2],
    },
    /// The mesh intersection of a pair failed and its approximate contact was used.
    #[error("intersection of elements {elements:?} failed ({error}), using the approximate contact")]
    IntersectionFallback {
        /// The element pair.
        elements: [u32; 2],
        /// Why the intersection failed.
        error: IntersectionError,
    },
    /// The governing group of a joint asks for another constraint layout than the persisted one.
    #[error("{joint} was built as {built:?} but its material now asks for {needed:?}, rebuild to apply it")]
    ConnectionTypeChanged {
        /// The joint.
        joint: JointId,
        /// The connection type the joint was built with.
        built: ConnectionType,
        /// The connection type its governing group now asks for.
        needed: ConnectionType,
    },
    /// A persisted parent link references an element that left the groups.
    #[error("element {child} can no longer be parented to element {parent}")]
    StaleParentLink {
        /// The child element.
        child: u32,
        /// The parent element.
        parent: u32,
    },
}
