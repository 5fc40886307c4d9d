use std::sync::Arc;

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real, Vector};
use crate::shape::ElementMesh;

/// An element as provided by the host, before normalization.
///
/// Several raw elements may share the same mesh: baking gives each of them
/// its own world-space copy.
#[derive(Clone, Debug)]
pub struct RawElement {
    /// The unique name identifying this element on the host side.
    pub name: String,
    /// The local-space mesh.
    pub mesh: Arc<ElementMesh>,
    /// The world-space position.
    pub position: Isometry<Real>,
    /// The pending non-uniform scale, applied before `position`.
    pub scale: Vector<Real>,
    /// The name of the element group this element is assigned to.
    pub group: Option<String>,
}

impl RawElement {
    /// Creates an unscaled element at the origin, without group.
    pub fn new(name: impl Into<String>, mesh: Arc<ElementMesh>) -> Self {
        Self {
            name: name.into(),
            mesh,
            position: Isometry::identity(),
            scale: Vector::repeat(1.0),
            group: None,
        }
    }

    /// Sets the world-space position of this element.
    pub fn with_position(mut self, position: Isometry<Real>) -> Self {
        self.position = position;
        self
    }

    /// Sets the pending scale of this element.
    pub fn with_scale(mut self, scale: Vector<Real>) -> Self {
        self.scale = scale;
        self
    }

    /// Assigns this element to the named group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A normalized element: world-space geometry and a resolved group index.
#[derive(Clone, Debug)]
pub struct Element {
    /// The host name of this element.
    pub name: String,
    /// The mesh, with scale and position baked in.
    pub mesh: ElementMesh,
    /// The world-space AABB of `mesh`.
    pub aabb: Aabb,
    /// The dense group index, `None` if the element is not assigned to a known group.
    pub group: Option<u32>,
    /// The group name given by the host.
    pub group_name: Option<String>,
    /// Is this element smaller than the minimum element size?
    pub is_tiny: bool,
}

impl Element {
    /// Does this element take part in the connection search?
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.group.is_some()
    }
}
