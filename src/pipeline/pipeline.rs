use std::time::Instant;

use super::{
    text_export, AbortReason, BuildConfig, BuildCounts, BuildSnapshot, BuildStage, BuildStatus,
    BuildWarning, NoProgress, NoWorkReason, ProgressObserver, SnapshotError, SnapshotStore,
    SNAPSHOT_VERSION,
};
use crate::catalog::{ElementCatalog, GroupTable, RawElement};
use crate::cluster::merge_clusters;
use crate::contact::ContactEstimator;
use crate::graph::build_connections;
use crate::params::{
    parameterize_new, reparameterize, ConstraintIndex, JointId, JointRecord,
    LinearStrengthModel, StrengthModel,
};
use crate::proximity::{find_candidates, redirect_tiny_elements, retain_connectable, ParentLink};
use crate::query::{ConvexIntersector, MeshIntersector};

/// Whether a run derives everything from the geometry or only refreshes parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineMode {
    /// Runs every stage and produces a new snapshot.
    FreshBuild,
    /// Recomputes the joint parameters of a previous build, without geometric work.
    UpdateOnly(Box<BuildSnapshot>),
}

impl PipelineMode {
    /// Updates the stored build if there is one, builds from scratch otherwise.
    pub fn select(store: &dyn SnapshotStore) -> Result<Self, SnapshotError> {
        Ok(match store.load()? {
            Some(snapshot) => PipelineMode::UpdateOnly(Box::new(snapshot)),
            None => PipelineMode::FreshBuild,
        })
    }
}

/// Everything a run hands back to the host.
#[derive(Debug)]
pub struct BuildOutput {
    /// The outcome of the run.
    pub status: BuildStatus,
    /// The parameterized joints, for the host to materialize.
    pub joints: Vec<JointRecord>,
    /// The undersized elements to attach rigidly to their parent.
    pub parent_links: Vec<ParentLink>,
    /// The constraint/connection correspondence.
    pub index: ConstraintIndex,
    /// The joints created or updated by this run.
    pub selection: Vec<JointId>,
    /// The snapshot to persist. Never set when exporting as text.
    pub snapshot: Option<BuildSnapshot>,
    /// One JSON line per constraint, when exporting as text.
    pub text_export: Option<String>,
}

impl BuildOutput {
    fn empty(status: BuildStatus) -> Self {
        Self {
            status,
            joints: vec![],
            parent_links: vec![],
            index: ConstraintIndex::default(),
            selection: vec![],
            snapshot: None,
            text_export: None,
        }
    }
}

struct StageTimer<'a> {
    observer: &'a dyn ProgressObserver,
    stage: Option<(BuildStage, Instant)>,
}

impl<'a> StageTimer<'a> {
    fn new(observer: &'a dyn ProgressObserver) -> Self {
        Self {
            observer,
            stage: None,
        }
    }

    fn start(&mut self, stage: BuildStage) {
        self.stop();
        self.observer.stage_started(stage, stage.progress());
        self.stage = Some((stage, Instant::now()));
    }

    fn stop(&mut self) {
        if let Some((stage, start)) = self.stage.take() {
            log::info!("{:?} -- Time: {:.2} s", stage, start.elapsed().as_secs_f64());
        }
    }
}

/// The breakable constraints builder.
///
/// A pipeline owns the collaborators of a build: the mesh intersection
/// service used for accurate contact areas, the strength model and a progress
/// observer. It can be reused for any number of runs.
pub struct Pipeline {
    intersector: Box<dyn MeshIntersector>,
    strength_model: Box<dyn StrengthModel>,
    observer: Box<dyn ProgressObserver>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// A pipeline with the built-in convex intersector and the linear strength model.
    pub fn new() -> Self {
        Self {
            intersector: Box::new(ConvexIntersector::default()),
            strength_model: Box::new(LinearStrengthModel::default()),
            observer: Box::new(NoProgress),
        }
    }

    /// Replaces the mesh intersection service.
    pub fn with_intersector(mut self, intersector: impl MeshIntersector + 'static) -> Self {
        self.intersector = Box::new(intersector);
        self
    }

    /// Replaces the strength model.
    pub fn with_strength_model(mut self, model: impl StrengthModel + 'static) -> Self {
        self.strength_model = Box::new(model);
        self
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Runs the pipeline in the given mode.
    ///
    /// In update mode, no geometric work is done: `raw` only tells which group
    /// each element of the previous build belongs to now, and only the group
    /// table and the parameter options of `config` are taken into account.
    /// Elements missing from `raw`, or all of them if `raw` is empty, keep
    /// their stored group.
    pub fn run(
        &self,
        mode: PipelineMode,
        raw: &[RawElement],
        groups: &GroupTable,
        config: &BuildConfig,
    ) -> BuildOutput {
        let start = Instant::now();

        let output = match config.validate() {
            Err(err) => {
                log::error!("Build aborted: {}", err);
                BuildOutput::empty(BuildStatus::Aborted(err.into()))
            }
            Ok(()) => match mode {
                PipelineMode::FreshBuild => self.fresh_build(raw, groups, config),
                PipelineMode::UpdateOnly(snapshot) => {
                    self.update(*snapshot, raw, groups, config)
                }
            },
        };

        self.observer.finished();

        if let Some(counts) = output.status.counts() {
            log::info!(
                "Constraints: {} | Elements: {} | Children: {}",
                counts.constraints,
                counts.elements,
                counts.parent_links
            );
        }
        log::info!("-- Time: {:.2} s", start.elapsed().as_secs_f64());

        output
    }

    /// Runs the pipeline against a snapshot store.
    ///
    /// The mode is selected from the content of the store, and the resulting
    /// snapshot is written back once the run completed. Nothing is written
    /// when the run has no output or exports as text.
    pub fn run_with_store(
        &self,
        store: &mut dyn SnapshotStore,
        raw: &[RawElement],
        groups: &GroupTable,
        config: &BuildConfig,
    ) -> BuildOutput {
        let mode = match PipelineMode::select(store) {
            Ok(mode) => mode,
            Err(err) => {
                log::error!("Cannot read the previous build: {}", err);
                return BuildOutput::empty(BuildStatus::Aborted(err.into()));
            }
        };

        let mut output = self.run(mode, raw, groups, config);

        if let Some(snapshot) = &output.snapshot {
            if let Err(err) = store.store(snapshot) {
                log::error!("Cannot persist the build: {}", err);
                output.status = BuildStatus::Aborted(err.into());
            }
        }

        output
    }

    fn fresh_build(
        &self,
        raw: &[RawElement],
        groups: &GroupTable,
        config: &BuildConfig,
    ) -> BuildOutput {
        let mut timer = StageTimer::new(&*self.observer);

        timer.start(BuildStage::Catalog);
        let catalog = match ElementCatalog::build(
            raw,
            groups,
            config.minimum_element_size,
            config.connect_same_group,
        ) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::info!("Nothing to build: {}", err);
                return BuildOutput::empty(BuildStatus::NoWork(err.into()));
            }
        };

        timer.start(BuildStage::Proximity);
        let pairs = find_candidates(&catalog, config.search_margin);
        let (mut pairs, parent_links) = redirect_tiny_elements(&catalog, pairs);
        retain_connectable(&catalog, &mut pairs, config.connect_same_group);

        timer.start(BuildStage::Contact);
        let estimator = ContactEstimator {
            mode: config.contact_mode(),
            intersector: &*self.intersector,
            search_margin: config.search_margin,
            epsilon: config.contact_epsilon,
        };
        let (estimated, mut warnings) = estimator.estimate_all(&catalog, &pairs);

        timer.start(BuildStage::Connections);
        let mut connections = build_connections(&catalog, &estimated, config.dedup_tolerance);

        if connections.is_empty() && parent_links.is_empty() {
            timer.stop();
            log::info!("Nothing to build: {}", NoWorkReason::NoConnections);
            return BuildOutput::empty(BuildStatus::NoWork(NoWorkReason::NoConnections));
        }

        timer.start(BuildStage::Clustering);
        let clusters = merge_clusters(&connections, config.cluster_radius);
        clusters.assign(&mut connections);

        timer.start(BuildStage::Parameters);
        let mut params = parameterize_new(
            &clusters,
            groups,
            &config.parameters,
            &*self.strength_model,
        );
        warnings.append(&mut params.warnings);
        timer.stop();

        let snapshot = BuildSnapshot {
            version: SNAPSHOT_VERSION,
            config: *config,
            elements: catalog.records(),
            connections,
            clusters: clusters.clusters,
            connection_to_cluster: clusters.connection_to_cluster,
            parent_links: parent_links.clone(),
            joint_slots: params.slots,
        };

        Self::finish(
            snapshot,
            params.joints,
            parent_links,
            params.index,
            warnings,
            config,
        )
    }

    fn update(
        &self,
        mut snapshot: BuildSnapshot,
        raw: &[RawElement],
        groups: &GroupTable,
        config: &BuildConfig,
    ) -> BuildOutput {
        if snapshot.joint_slots.is_empty() && snapshot.parent_links.is_empty() {
            log::info!("Nothing to update: {}", NoWorkReason::EmptySnapshot);
            return BuildOutput::empty(BuildStatus::NoWork(NoWorkReason::EmptySnapshot));
        }

        let mut timer = StageTimer::new(&*self.observer);

        timer.start(BuildStage::Catalog);
        if !raw.is_empty() {
            ElementCatalog::reassign_groups(&mut snapshot.elements, raw, groups);
        }
        let element_groups = ElementCatalog::refresh_groups(&snapshot.elements, groups);
        if let Err(err) = ElementCatalog::check_assignment(&element_groups) {
            timer.stop();
            log::info!("Nothing to update: {}", err);
            return BuildOutput::empty(BuildStatus::NoWork(err.into()));
        }

        timer.start(BuildStage::Parameters);
        let mut params = reparameterize(
            &snapshot,
            groups,
            &config.parameters,
            &*self.strength_model,
        );
        let mut warnings = std::mem::take(&mut params.warnings);

        let is_assigned = |e: u32| element_groups.get(e as usize).copied().flatten().is_some();
        let (parent_links, stale): (Vec<_>, Vec<_>) = snapshot
            .parent_links
            .iter()
            .copied()
            .partition(|link| is_assigned(link.child) && is_assigned(link.parent));

        for link in stale {
            let warning = BuildWarning::StaleParentLink {
                child: link.child,
                parent: link.parent,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        timer.stop();

        // The stored layout is kept, dropped joints included.
        snapshot.config.parameters = config.parameters;

        Self::finish(
            snapshot,
            params.joints,
            parent_links,
            params.index,
            warnings,
            config,
        )
    }

    fn finish(
        snapshot: BuildSnapshot,
        joints: Vec<JointRecord>,
        parent_links: Vec<ParentLink>,
        index: ConstraintIndex,
        warnings: Vec<BuildWarning>,
        config: &BuildConfig,
    ) -> BuildOutput {
        let counts = BuildCounts {
            elements: snapshot.elements.len(),
            connections: joints.iter().map(|j| j.member_count as usize).sum(),
            clusters: joints.len(),
            constraints: index.constraint_count(),
            parent_links: parent_links.len(),
        };

        let (snapshot, export) = if config.export_as_text {
            match text_export(&joints, &snapshot.clusters, &snapshot.connections) {
                Ok(text) => (None, Some(text)),
                Err(err) => {
                    let reason = AbortReason::Snapshot(err.into());
                    log::error!("Build aborted: {}", reason);
                    return BuildOutput::empty(BuildStatus::Aborted(reason));
                }
            }
        } else {
            (Some(snapshot), None)
        };

        BuildOutput {
            status: BuildStatus::completed(counts, warnings),
            selection: joints.iter().map(|j| j.joint).collect(),
            joints,
            parent_links,
            index,
            snapshot,
            text_export: export,
        }
    }
}
