use std::cell::RefCell;
use std::rc::Rc;

use bondnet3d::math::Real;
use bondnet3d::pipeline::{
    BuildConfig, BuildStage, BuildStatus, Pipeline, PipelineMode, ProgressObserver,
};

use crate::common::{abc, groups};

#[test]
fn three_overlapping_elements_in_two_groups() {
    let config = BuildConfig::default();
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &abc(), &groups(), &config);

    let BuildStatus::Success(counts) = &output.status else {
        panic!("unexpected status: {:?}", output.status);
    };
    assert_eq!(counts.elements, 3);
    assert_eq!(counts.connections, 2);
    assert_eq!(counts.clusters, 2);
    assert_eq!(counts.constraints, 2);
    assert_eq!(counts.parent_links, 0);
    assert!(output.parent_links.is_empty());

    let snapshot = output.snapshot.expect("a fresh build yields a snapshot");
    assert_eq!(snapshot.connections[0].elements, [0, 2]);
    assert_eq!(snapshot.connections[1].elements, [1, 2]);
    for connection in &snapshot.connections {
        assert_eq!(connection.groups, [0, 1]);
        assert_relative_eq!(connection.area(), 0.6, epsilon = 1.0e-5);
    }

    // tensile 3 * area 0.6 / 60 steps
    for joint in &output.joints {
        assert_relative_eq!(joint.breaking_threshold(), 0.03, epsilon = 1.0e-6);
    }
    assert_eq!(output.selection.len(), 2);
}

#[test]
fn same_group_connections_are_opt_in() {
    let config = BuildConfig::default().with_connect_same_group(true);
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &abc(), &groups(), &config);

    let snapshot = output.snapshot.unwrap();
    assert_eq!(snapshot.connections.len(), 3);
    assert_eq!(snapshot.connections[0].elements, [0, 1]);
    assert_eq!(snapshot.connections[0].groups, [0, 0]);
}

#[test]
fn repeated_builds_are_identical() {
    let config = BuildConfig::default().with_cluster_radius(0.5);
    let pipeline = Pipeline::new();
    let first = pipeline.run(PipelineMode::FreshBuild, &abc(), &groups(), &config);
    let second = pipeline.run(PipelineMode::FreshBuild, &abc(), &groups(), &config);

    assert_eq!(first.joints, second.joints);
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(first.index, second.index);
}

#[derive(Clone, Default)]
struct StageRecorder(Rc<RefCell<Vec<(BuildStage, Real)>>>);

impl ProgressObserver for StageRecorder {
    fn stage_started(&self, stage: BuildStage, progress: Real) {
        self.0.borrow_mut().push((stage, progress));
    }
}

#[test]
fn observers_see_every_stage_in_order() {
    let recorder = StageRecorder::default();
    let pipeline = Pipeline::new().with_observer(recorder.clone());
    let output = pipeline.run(
        PipelineMode::FreshBuild,
        &abc(),
        &groups(),
        &BuildConfig::default(),
    );
    assert!(output.status.is_success());

    let seen = recorder.0.borrow();
    let stages: Vec<_> = seen.iter().map(|(stage, _)| *stage).collect();
    assert_eq!(
        stages,
        vec![
            BuildStage::Catalog,
            BuildStage::Proximity,
            BuildStage::Contact,
            BuildStage::Connections,
            BuildStage::Clustering,
            BuildStage::Parameters,
        ]
    );
    assert_eq!(seen[0].1, 0.0);
    assert!(seen.windows(2).all(|w| w[0].1 < w[1].1));
}
