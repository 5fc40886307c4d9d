use super::{BuildWarning, ConfigError, SnapshotError};
use crate::catalog::CatalogError;

/// The sizes of a build output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildCounts {
    /// The number of catalog elements.
    pub elements: usize,
    /// The number of connections realized by the joints.
    pub connections: usize,
    /// The number of clusters, i.e., joints.
    pub clusters: usize,
    /// The number of physics constraints.
    pub constraints: usize,
    /// The number of parent links.
    pub parent_links: usize,
}

/// Why a build had nothing to do.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum NoWorkReason {
    /// The element selection cannot produce any connection.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// No element pair is in contact.
    #[error("no element pair is in contact")]
    NoConnections,
    /// The persisted build has no joint to update.
    #[error("the persisted build has no joint")]
    EmptySnapshot,
}

/// Why a build was aborted.
#[derive(thiserror::Error, Debug)]
pub enum AbortReason {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The persisted build could not be read or written.
    #[error("snapshot failure: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// The terminal outcome of a build.
#[derive(Debug)]
pub enum BuildStatus {
    /// Everything was built without any warning.
    Success(BuildCounts),
    /// There was nothing to build. This is informational.
    NoWork(NoWorkReason),
    /// The build completed, but some records fell back to defaults or were dropped.
    PartialFailure {
        /// The problems met.
        warnings: Vec<BuildWarning>,
        /// The sizes of the output.
        counts: BuildCounts,
    },
    /// The build did not run.
    Aborted(AbortReason),
}

impl BuildStatus {
    pub(crate) fn completed(counts: BuildCounts, warnings: Vec<BuildWarning>) -> Self {
        if warnings.is_empty() {
            BuildStatus::Success(counts)
        } else {
            BuildStatus::PartialFailure { warnings, counts }
        }
    }

    /// Did the build complete without any warning?
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success(_))
    }

    /// Did the build produce an output, with or without warnings?
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            BuildStatus::Success(_) | BuildStatus::PartialFailure { .. }
        )
    }

    /// The output sizes of a completed build.
    pub fn counts(&self) -> Option<&BuildCounts> {
        match self {
            BuildStatus::Success(counts) | BuildStatus::PartialFailure { counts, .. } => {
                Some(counts)
            }
            _ => None,
        }
    }

    /// The warnings collected by the build.
    pub fn warnings(&self) -> &[BuildWarning] {
        match self {
            BuildStatus::PartialFailure { warnings, .. } => warnings,
            _ => &[],
        }
    }
}
