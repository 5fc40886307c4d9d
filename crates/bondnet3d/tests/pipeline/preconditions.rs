use bondnet3d::catalog::{CatalogError, GroupTable, RawElement};
use bondnet3d::math::{Isometry, Real, Vector};
use bondnet3d::params::MaterialProperties;
use bondnet3d::pipeline::{
    AbortReason, BuildConfig, BuildStatus, BuildWarning, NoWorkReason, Pipeline, PipelineMode,
};

use crate::common::{cube, groups};

fn run(raw: &[RawElement], groups: &GroupTable, config: &BuildConfig) -> BuildStatus {
    Pipeline::new()
        .run(PipelineMode::FreshBuild, raw, groups, config)
        .status
}

#[test]
fn a_single_group_is_no_work() {
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.0, 0.0, 0.0], "a")];
    assert!(matches!(
        run(&raw, &groups(), &BuildConfig::default()),
        BuildStatus::NoWork(NoWorkReason::Catalog(
            CatalogError::InsufficientGroups { .. }
        ))
    ));
}

#[test]
fn a_single_element_is_no_work() {
    let raw = [cube("A", [0.0; 3], "a")];
    assert!(matches!(
        run(&raw, &groups(), &BuildConfig::default()),
        BuildStatus::NoWork(NoWorkReason::Catalog(CatalogError::TooFewElements {
            found: 1
        }))
    ));
}

#[test]
fn edge_contacts_are_pruned() {
    // Both cubes only share an edge: zero contact area.
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.0, 1.0, 0.0], "b")];
    assert!(matches!(
        run(&raw, &groups(), &BuildConfig::default()),
        BuildStatus::NoWork(NoWorkReason::NoConnections)
    ));
}

#[test]
fn overlapping_boxes_of_separated_shapes_are_pruned() {
    // Two cubes turned by 45 degrees: their AABBs overlap, the cubes do not touch.
    let angle = Vector::z() * std::f64::consts::FRAC_PI_4 as Real;
    let raw = [
        cube("A", [0.0; 3], "a").with_position(Isometry::new(Vector::zeros(), angle)),
        cube("B", [0.0; 3], "b").with_position(Isometry::new(Vector::new(1.0, 0.6, 0.0), angle)),
    ];

    let config = BuildConfig::default().with_accurate_area(true);
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &raw, &groups(), &config);
    assert!(matches!(
        output.status,
        BuildStatus::NoWork(NoWorkReason::NoConnections)
    ));
    assert!(output.joints.is_empty());

    // The box overlap alone is mistaken for a contact.
    let output = Pipeline::new().run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default(),
    );
    assert!(output.status.is_success());
    assert_eq!(output.joints.len(), 1);
}

#[test]
fn distant_elements_are_not_connected() {
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.05, 0.0, 0.0], "b")];
    assert!(matches!(
        run(&raw, &groups(), &BuildConfig::default()),
        BuildStatus::NoWork(NoWorkReason::NoConnections)
    ));

    let config = BuildConfig::default().with_search_margin(0.1);
    assert!(run(&raw, &groups(), &config).is_success());
}

#[test]
fn invalid_config_aborts() {
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.0, 0.0, 0.0], "b")];
    let config = BuildConfig::default().with_cluster_radius(-1.0);
    assert!(matches!(
        run(&raw, &groups(), &config),
        BuildStatus::Aborted(AbortReason::Config(_))
    ));
}

#[test]
fn missing_material_falls_back() {
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.0, 0.0, 0.0], "b")];
    let mut groups = GroupTable::new().with_group("a", MaterialProperties::default());
    let _ = groups.insert("b", None);

    let status = run(&raw, &groups, &BuildConfig::default());
    let BuildStatus::PartialFailure { warnings, counts } = &status else {
        panic!("unexpected status: {:?}", status);
    };
    assert_eq!(counts.constraints, 1);
    assert_eq!(
        warnings,
        &[BuildWarning::MaterialFallback {
            group: 1,
            name: "b".to_string()
        }]
    );
}
