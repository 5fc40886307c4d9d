/// Preconditions that prevent a build from doing any work.
///
/// These are not failures of the pipeline: the caller simply gave it nothing
/// to connect. They are reported as [`BuildStatus::NoWork`](crate::BuildStatus::NoWork).
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CatalogError {
    /// Less than two elements were given.
    #[error("at least two elements are needed to build connections, got {found}")]
    TooFewElements {
        /// Number of distinct elements found.
        found: usize,
    },
    /// Not enough elements are assigned to element groups.
    #[error("at least two elements must be assigned to element groups ({assigned} assigned across {groups} group(s))")]
    InsufficientGroups {
        /// Number of elements with a valid group.
        assigned: usize,
        /// Number of distinct groups these elements belong to.
        groups: usize,
    },
}
