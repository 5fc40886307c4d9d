use bondnet3d::params::ParameterOptions;
use bondnet3d::pipeline::{BuildConfig, Pipeline, PipelineMode};

use crate::common::{block, cube, groups, two_on_base};

#[test]
fn threshold_grows_with_the_contact_area() {
    let pipeline = Pipeline::new();
    let config = BuildConfig::default();
    let mut last = 0.0;

    for half in [0.1, 0.2, 0.3, 0.4] {
        let raw = [
            cube("base", [0.0; 3], "a"),
            block("top", [0.0, 0.7, 0.0], [half, 0.25, half], "b"),
        ];
        let output = pipeline.run(PipelineMode::FreshBuild, &raw, &groups(), &config);
        assert_eq!(output.joints.len(), 1);

        let joint = &output.joints[0];
        assert_relative_eq!(joint.area, 4.0 * half * half, epsilon = 1.0e-5);
        assert!(joint.breaking_threshold() > last);
        last = joint.breaking_threshold();
    }
}

#[test]
fn merged_contacts_make_stronger_joints() {
    let pipeline = Pipeline::new();
    let raw = two_on_base();

    let separate = pipeline.run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default(),
    );
    assert_eq!(separate.joints.len(), 2);
    // tensile 3 * area 0.25 / 60 steps
    assert_relative_eq!(separate.joints[0].breaking_threshold(), 0.0125, epsilon = 1.0e-6);

    let merged = pipeline.run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default().with_cluster_radius(1.0),
    );
    assert_eq!(merged.joints.len(), 1);
    assert_eq!(merged.joints[0].member_count, 2);
    assert_relative_eq!(merged.joints[0].area, 0.25, epsilon = 1.0e-6);
    assert!(merged.joints[0].breaking_threshold() > separate.joints[0].breaking_threshold());

    // Both contacts are exactly one unit apart.
    let apart = pipeline.run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default().with_cluster_radius(0.999),
    );
    assert_eq!(apart.joints.len(), 2);
}

#[test]
fn global_options_scale_every_threshold() {
    let pipeline = Pipeline::new();
    let raw = two_on_base();
    let base = pipeline.run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default(),
    );
    let scaled = pipeline.run(
        PipelineMode::FreshBuild,
        &raw,
        &groups(),
        &BuildConfig::default().with_parameters(ParameterOptions {
            steps_per_second: 30.0,
            global_multiplier: 2.0,
        }),
    );

    for (a, b) in base.joints.iter().zip(&scaled.joints) {
        assert_relative_eq!(b.breaking_threshold(), 4.0 * a.breaking_threshold());
    }
}
