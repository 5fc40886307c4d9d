use bondnet3d::proximity::ParentLink;
use bondnet3d::pipeline::{BuildConfig, BuildStatus, Pipeline, PipelineMode};

use crate::common::{block, cube, groups};

#[test]
fn tiny_elements_are_parented_instead_of_connected() {
    let raw = [
        cube("A", [0.0; 3], "a"),
        cube("B", [1.0, 0.0, 0.0], "b"),
        block("chip", [0.45, 0.3, 0.0], [0.05; 3], "b"),
    ];
    let config = BuildConfig::default().with_minimum_element_size(0.2);
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &raw, &groups(), &config);

    let BuildStatus::Success(counts) = &output.status else {
        panic!("unexpected status: {:?}", output.status);
    };
    assert_eq!(counts.parent_links, 1);
    assert_eq!(output.parent_links, vec![ParentLink { child: 2, parent: 0 }]);

    let snapshot = output.snapshot.unwrap();
    assert_eq!(snapshot.connections.len(), 1);
    assert_eq!(snapshot.connections[0].elements, [0, 1]);
    assert!(snapshot.elements[2].is_tiny);
}

#[test]
fn disabled_minimum_size_connects_everything() {
    let raw = [
        cube("A", [0.0; 3], "a"),
        cube("B", [1.0, 0.0, 0.0], "b"),
        block("chip", [0.45, 0.3, 0.0], [0.05; 3], "b"),
    ];
    let output = Pipeline::new().run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default(),
    );

    assert!(output.parent_links.is_empty());
    let snapshot = output.snapshot.unwrap();
    assert_eq!(snapshot.connections.len(), 2);
    assert_eq!(snapshot.connections[1].elements, [0, 2]);
}
