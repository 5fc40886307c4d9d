use std::sync::Arc;

use bondnet3d::catalog::RawElement;
use bondnet3d::math::{Isometry, Vector};
use bondnet3d::pipeline::{BuildConfig, BuildStatus, BuildWarning, Pipeline, PipelineMode};
use bondnet3d::query::IntersectionError;
use bondnet3d::shape::ElementMesh;

use crate::common::{cube, groups};

#[test]
fn accurate_area_of_a_face_contact() {
    let raw = [cube("A", [0.0; 3], "a"), cube("B", [1.0, 0.0, 0.0], "b")];
    let config = BuildConfig::default().with_accurate_area(true);
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &raw, &groups(), &config);

    assert!(output.status.is_success(), "{:?}", output.status);
    let snapshot = output.snapshot.unwrap();
    let connection = &snapshot.connections[0];

    // Half the surface of the 0.02 x 1 x 1 slab between the inflated A and B.
    assert_relative_eq!(connection.area(), 1.04, epsilon = 1.0e-2);
    assert_relative_eq!(connection.location.x, 0.51, epsilon = 1.0e-3);
    assert_relative_eq!(connection.geometry.normal, Vector::x(), epsilon = 1.0e-3);
}

#[test]
fn open_meshes_fall_back_to_the_approximate_area() {
    let closed = ElementMesh::cuboid(Vector::repeat(0.5));
    let open = ElementMesh::new(closed.vertices().to_vec(), closed.faces()[..5].to_vec()).unwrap();
    let raw = [
        cube("A", [0.0; 3], "a"),
        RawElement::new("B", Arc::new(open))
            .with_position(Isometry::translation(1.0, 0.0, 0.0))
            .with_group("b"),
    ];
    let config = BuildConfig::default().with_accurate_area(true);
    let output = Pipeline::new().run(PipelineMode::FreshBuild, &raw, &groups(), &config);

    let BuildStatus::PartialFailure { warnings, counts } = &output.status else {
        panic!("unexpected status: {:?}", output.status);
    };
    assert_eq!(counts.connections, 1);
    assert_eq!(
        warnings,
        &[BuildWarning::IntersectionFallback {
            elements: [0, 1],
            error: IntersectionError::OpenMesh,
        }]
    );

    let snapshot = output.snapshot.unwrap();
    assert_relative_eq!(snapshot.connections[0].area(), 1.0, epsilon = 1.0e-5);
}
