use std::sync::Arc;

use bondnet3d::catalog::{GroupTable, RawElement};
use bondnet3d::math::{Isometry, Real, Vector};
use bondnet3d::params::MaterialProperties;
use bondnet3d::shape::ElementMesh;

pub fn block(name: &str, center: [Real; 3], half_extents: [Real; 3], group: &str) -> RawElement {
    let mesh = Arc::new(ElementMesh::cuboid(Vector::from(half_extents)));
    RawElement::new(name, mesh)
        .with_position(Isometry::translation(center[0], center[1], center[2]))
        .with_group(group)
}

pub fn cube(name: &str, center: [Real; 3], group: &str) -> RawElement {
    block(name, center, [0.5; 3], group)
}

pub fn groups() -> GroupTable {
    GroupTable::new()
        .with_group("a", MaterialProperties::default())
        .with_group("b", MaterialProperties::default())
}

/// A and B in group `a`, C in group `b`, all three overlapping each other.
pub fn abc() -> Vec<RawElement> {
    vec![
        cube("A", [0.0, 0.0, 0.0], "a"),
        cube("B", [0.8, 0.0, 0.0], "a"),
        cube("C", [0.4, 0.9, 0.0], "b"),
    ]
}

/// A long base in group `a` with two small blocks of group `b` resting on it,
/// one unit apart.
pub fn two_on_base() -> Vec<RawElement> {
    vec![
        block("base", [0.0, 0.0, 0.0], [2.0, 0.5, 0.5], "a"),
        block("left", [-0.5, 0.625, 0.0], [0.25; 3], "b"),
        block("right", [0.5, 0.625, 0.0], [0.25; 3], "b"),
    ]
}
