use crate::math::Real;

/// The stages of a build, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Element normalization.
    Catalog,
    /// Candidate pair search.
    Proximity,
    /// Contact area estimation.
    Contact,
    /// Connection records.
    Connections,
    /// Connection merging.
    Clustering,
    /// Breaking thresholds.
    Parameters,
}

impl BuildStage {
    /// The fraction of the whole build done when this stage starts.
    pub fn progress(self) -> Real {
        match self {
            BuildStage::Catalog => 0.0,
            BuildStage::Proximity => 0.1,
            BuildStage::Contact => 0.3,
            BuildStage::Connections => 0.7,
            BuildStage::Clustering => 0.75,
            BuildStage::Parameters => 0.9,
        }
    }
}

/// Receives coarse progress notifications during a build.
///
/// This is a side channel only: nothing an observer does can affect the build.
pub trait ProgressObserver {
    /// Called when `stage` starts, with the fraction of the build already done.
    fn stage_started(&self, stage: BuildStage, progress: Real);
    /// Called once the build ended, whatever its outcome.
    fn finished(&self) {}
}

/// A progress observer ignoring every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn stage_started(&self, _: BuildStage, _: Real) {}
}
