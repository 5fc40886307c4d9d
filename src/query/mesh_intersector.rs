use crate::math::{Point, Real};
use crate::shape::ElementMesh;

/// Errors reported by a [`MeshIntersector`].
///
/// Any of them makes the accurate contact strategy fall back to the
/// approximate one for the affected pair only.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IntersectionError {
    /// One of the meshes is not closed.
    #[error("at least one of the meshes is not closed")]
    OpenMesh,
    /// One of the meshes is not convex (only reported by intersectors limited to convex shapes).
    #[error("at least one of the meshes is not convex")]
    NonConvex,
    /// One of the meshes does not enclose any volume.
    #[error("at least one of the meshes is degenerate")]
    Degenerate,
    /// Failure reported by a host-provided boolean service.
    #[error("boolean intersection failed: {0}")]
    Service(String),
}

/// The boolean intersection of two meshes, as a set of planar polygons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntersectionVolume {
    /// The boundary faces of the intersection volume.
    pub faces: Vec<Vec<Point<Real>>>,
}

impl IntersectionVolume {
    /// Iterates through all the vertices of all the faces.
    pub fn points(&self) -> impl Iterator<Item = &Point<Real>> {
        self.faces.iter().flatten()
    }
}

/// A boolean mesh intersection service.
///
/// This is the seam where a host plugs its own CSG implementation. The
/// [`ConvexIntersector`](super::ConvexIntersector) is used when none is given.
pub trait MeshIntersector: Sync {
    /// Computes the intersection of `mesh1`, inflated by `margin`, with `mesh2`.
    ///
    /// Both meshes are given in world-space. Returns `Ok(None)` if they do not
    /// intersect.
    fn intersect(
        &self,
        mesh1: &ElementMesh,
        mesh2: &ElementMesh,
        margin: Real,
    ) -> Result<Option<IntersectionVolume>, IntersectionError>;
}
