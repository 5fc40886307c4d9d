use bondnet3d::catalog::{CatalogError, GroupTable};
use bondnet3d::params::{ConnectionType, JointId, MaterialProperties, ParameterOptions};
use bondnet3d::pipeline::{
    BuildConfig, BuildSnapshot, BuildStatus, BuildWarning, MemorySnapshotStore, NoWorkReason,
    Pipeline, PipelineMode, SnapshotStore, SNAPSHOT_VERSION,
};

use crate::common::{abc, block, cube, groups};

#[test]
fn the_store_selects_the_mode() {
    let mut store = MemorySnapshotStore::new();
    assert_eq!(PipelineMode::select(&store).unwrap(), PipelineMode::FreshBuild);

    let output = Pipeline::new().run_with_store(&mut store, &abc(), &groups(), &BuildConfig::default());
    assert!(output.status.is_success());
    assert!(matches!(
        PipelineMode::select(&store).unwrap(),
        PipelineMode::UpdateOnly(_)
    ));
}

#[test]
fn updates_are_idempotent() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default().with_cluster_radius(0.5);
    let mut store = MemorySnapshotStore::new();

    let fresh = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);
    let first = pipeline.run_with_store(&mut store, &[], &groups(), &config);
    let second = pipeline.run_with_store(&mut store, &[], &groups(), &config);

    assert!(first.status.is_success());
    assert_eq!(first.joints, fresh.joints);
    assert_eq!(second.joints, first.joints);
    assert_eq!(second.index, first.index);
    assert_eq!(second.snapshot, first.snapshot);
    assert_eq!(first.selection, vec![JointId(0)]);
}

#[test]
fn updates_only_recompute_parameters() {
    let pipeline = Pipeline::new();
    let mut store = MemorySnapshotStore::new();
    let fresh = pipeline.run_with_store(&mut store, &abc(), &groups(), &BuildConfig::default());

    let config = BuildConfig::default().with_parameters(ParameterOptions {
        steps_per_second: 60.0,
        global_multiplier: 2.0,
    });
    let updated = pipeline.run_with_store(&mut store, &[], &groups(), &config);

    assert_eq!(updated.joints.len(), fresh.joints.len());
    for (before, after) in fresh.joints.iter().zip(&updated.joints) {
        assert_eq!(before.location, after.location);
        assert_relative_eq!(after.breaking_threshold(), 2.0 * before.breaking_threshold());
    }

    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.config.parameters.global_multiplier, 2.0);
}

#[test]
fn snapshot_json_round_trip_feeds_update_mode() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let fresh = pipeline.run(PipelineMode::FreshBuild, &abc(), &groups(), &config);
    let snapshot = fresh.snapshot.clone().unwrap();
    assert_eq!(snapshot.version, SNAPSHOT_VERSION);

    let decoded = BuildSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(decoded, snapshot);

    let updated = pipeline.run(
        PipelineMode::UpdateOnly(Box::new(decoded)),
        &[],
        &groups(),
        &config,
    );
    assert_eq!(updated.joints, fresh.joints);
}

#[test]
fn removed_groups_orphan_their_connections() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut store = MemorySnapshotStore::new();
    let _ = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);

    let renamed = GroupTable::new()
        .with_group("a", MaterialProperties::default())
        .with_group("c", MaterialProperties::default());
    let updated = pipeline.run_with_store(&mut store, &[], &renamed, &config);

    let BuildStatus::PartialFailure { warnings, counts } = &updated.status else {
        panic!("unexpected status: {:?}", updated.status);
    };
    assert_eq!(counts.constraints, 0);
    assert!(updated.joints.is_empty());
    assert_eq!(
        warnings,
        &[
            BuildWarning::OrphanedConnection {
                connection: 0,
                elements: [0, 2]
            },
            BuildWarning::OrphanedConnection {
                connection: 1,
                elements: [1, 2]
            },
        ]
    );

    // The joints come back with their group.
    let restored = pipeline.run_with_store(&mut store, &[], &groups(), &config);
    assert!(restored.status.is_success());
    assert_eq!(restored.joints.len(), 2);
}

#[test]
fn reordered_groups_are_resolved_by_name() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut store = MemorySnapshotStore::new();
    let _ = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);

    let reordered = GroupTable::new()
        .with_group("z", MaterialProperties::default())
        .with_group("b", MaterialProperties::default())
        .with_group("a", MaterialProperties::default());
    let updated = pipeline.run_with_store(&mut store, &[], &reordered, &config);

    assert!(updated.status.is_success());
    assert!(updated.joints.iter().all(|j| j.groups == [1, 2]));
}

#[test]
fn changed_connection_types_keep_the_built_layout() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut store = MemorySnapshotStore::new();
    let _ = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);

    let per_mode = GroupTable::new()
        .with_group(
            "a",
            MaterialProperties::default().with_connection_type(ConnectionType::PerMode),
        )
        .with_group("b", MaterialProperties::default());
    let updated = pipeline.run_with_store(&mut store, &[], &per_mode, &config);

    assert_eq!(updated.status.warnings().len(), 2);
    assert!(matches!(
        updated.status.warnings()[0],
        BuildWarning::ConnectionTypeChanged {
            built: ConnectionType::Fixed,
            needed: ConnectionType::PerMode,
            ..
        }
    ));
    assert!(updated.joints.iter().all(|j| j.constraints.len() == 1));
}

#[test]
fn empty_snapshots_are_no_work() {
    let snapshot = BuildSnapshot {
        version: SNAPSHOT_VERSION,
        config: BuildConfig::default(),
        elements: vec![],
        connections: vec![],
        clusters: vec![],
        connection_to_cluster: vec![],
        parent_links: vec![],
        joint_slots: vec![],
    };
    let output = Pipeline::new().run(
        PipelineMode::UpdateOnly(Box::new(snapshot)),
        &[],
        &groups(),
        &BuildConfig::default(),
    );
    assert!(matches!(
        output.status,
        BuildStatus::NoWork(NoWorkReason::EmptySnapshot)
    ));
}

#[test]
fn moved_elements_take_their_new_material() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut store = MemorySnapshotStore::new();
    let fresh = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);

    let weak = MaterialProperties::default().with_strengths(3.0, 0.3, 0.3, 0.3);
    let table = groups().with_group("c", weak);
    let mut moved = abc();
    moved[0].group = Some("c".to_string());
    moved[1].group = Some("c".to_string());

    let updated = pipeline.run_with_store(&mut store, &moved, &table, &config);

    assert!(updated.status.is_success());
    assert_eq!(updated.joints.len(), fresh.joints.len());
    for (before, after) in fresh.joints.iter().zip(&updated.joints) {
        assert_eq!(before.groups, [0, 1]);
        assert_eq!(after.groups, [1, 2]);
        assert_eq!(after.governing_group, 2);
        assert_relative_eq!(
            after.breaking_threshold(),
            0.1 * before.breaking_threshold(),
            epsilon = 1.0e-6
        );
    }

    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.elements[0].group_name.as_deref(), Some("c"));
    assert_eq!(stored.elements[2].group_name.as_deref(), Some("b"));

    // Without host elements, the stored membership is kept.
    let again = pipeline.run_with_store(&mut store, &[], &table, &config);
    assert_eq!(again.joints, updated.joints);
}

#[test]
fn parent_links_of_removed_groups_are_dropped() {
    let raw = [
        cube("A", [0.0; 3], "a"),
        cube("B", [1.0, 0.0, 0.0], "b"),
        block("chip", [0.45, 0.3, 0.0], [0.05; 3], "c"),
    ];
    let table = groups().with_group("c", MaterialProperties::default());
    let config = BuildConfig::default().with_minimum_element_size(0.2);
    let pipeline = Pipeline::new();
    let mut store = MemorySnapshotStore::new();

    let fresh = pipeline.run_with_store(&mut store, &raw, &table, &config);
    assert_eq!(fresh.parent_links.len(), 1);

    let updated = pipeline.run_with_store(&mut store, &[], &groups(), &config);

    let BuildStatus::PartialFailure { warnings, counts } = &updated.status else {
        panic!("unexpected status: {:?}", updated.status);
    };
    assert!(updated.parent_links.is_empty());
    assert_eq!(counts.parent_links, 0);
    assert_eq!(
        warnings,
        &[BuildWarning::StaleParentLink {
            child: 2,
            parent: 0
        }]
    );
    assert_eq!(updated.joints.len(), 1);
}

#[test]
fn updates_without_grouped_elements_are_no_work() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut store = MemorySnapshotStore::new();
    let _ = pipeline.run_with_store(&mut store, &abc(), &groups(), &config);

    let unrelated = GroupTable::new().with_group("z", MaterialProperties::default());
    let updated = pipeline.run_with_store(&mut store, &[], &unrelated, &config);

    assert!(matches!(
        updated.status,
        BuildStatus::NoWork(NoWorkReason::Catalog(CatalogError::InsufficientGroups {
            assigned: 0,
            groups: 0
        }))
    ));
    assert!(updated.joints.is_empty());
    assert!(store.load().unwrap().is_some());
}
