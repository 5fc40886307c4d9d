//! Orchestration of the build stages, persistence and reporting.

pub use self::build_warning::BuildWarning;
pub use self::config::{BuildConfig, ConfigError};
pub use self::export::text_export;
pub use self::pipeline::{BuildOutput, Pipeline, PipelineMode};
pub use self::progress::{BuildStage, NoProgress, ProgressObserver};
pub use self::snapshot::{BuildSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use self::status::{AbortReason, BuildCounts, BuildStatus, NoWorkReason};
pub use self::store::{JsonFileSnapshotStore, MemorySnapshotStore, SnapshotStore};

mod build_warning;
mod config;
mod export;
mod pipeline;
mod progress;
mod snapshot;
mod status;
mod store;
