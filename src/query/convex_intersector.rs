use smallvec::SmallVec;

use super::{clip_halfspace_polygon, IntersectionError, IntersectionVolume, MeshIntersector};
use crate::math::{Point, Real, Vector};
use crate::shape::ElementMesh;
use crate::utils;

/// An oriented plane `normal.dot(x) = offset`, bounding the half-space `normal.dot(x) <= offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// The outward unit normal.
    pub normal: Vector<Real>,
    /// The signed distance of the plane to the origin along `normal`.
    pub offset: Real,
}

impl Plane {
    /// The signed distance of `pt` to this plane, positive outside.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) - self.offset
    }
}

/// Computes the bounding planes of a closed convex mesh.
///
/// Faces are re-oriented so their normal points away from the vertex
/// centroid. Fails if less than four non-degenerate faces exist or if some
/// vertex lies outside of a face plane by more than `tolerance`.
pub fn convex_planes(mesh: &ElementMesh, tolerance: Real) -> Result<Vec<Plane>, IntersectionError> {
    let centroid = mesh.vertex_centroid();
    let mut planes = Vec::with_capacity(mesh.faces().len());

    for i in 0..mesh.faces().len() {
        let polygon = mesh.face_polygon(i);
        let normal = utils::polygon_normal(&polygon);
        let norm = normal.norm();

        if norm <= tolerance * tolerance {
            continue;
        }

        let mut normal = normal / norm;
        let face_center = polygon
            .iter()
            .fold(Vector::zeros(), |acc, pt| acc + pt.coords)
            / polygon.len() as Real;
        let mut offset = normal.dot(&face_center);

        if normal.dot(&centroid.coords) > offset {
            normal = -normal;
            offset = -offset;
        }

        planes.push(Plane { normal, offset });
    }

    if planes.len() < 4 {
        return Err(IntersectionError::Degenerate);
    }

    for plane in &planes {
        if mesh
            .vertices()
            .iter()
            .any(|pt| plane.signed_distance(pt) > tolerance)
        {
            return Err(IntersectionError::NonConvex);
        }
    }

    Ok(planes)
}

/// A [`MeshIntersector`] for closed convex meshes.
///
/// Fracture tools usually produce convex (Voronoi) cells, which makes this
/// intersector sufficient in most cases. The intersection volume is computed
/// as the intersection of the half-spaces of both meshes: a large square is
/// laid on every plane and clipped by all the other planes; the non-empty
/// results are the faces of the intersection.
#[derive(Copy, Clone, Debug)]
pub struct ConvexIntersector {
    /// Distance tolerance for the convexity check and the clipping.
    pub tolerance: Real,
}

impl Default for ConvexIntersector {
    fn default() -> Self {
        Self { tolerance: 1.0e-4 }
    }
}

impl ConvexIntersector {
    /// Creates a convex intersector with the given tolerance.
    pub fn new(tolerance: Real) -> Self {
        Self { tolerance }
    }

    fn merge_planes(&self, planes1: Vec<Plane>, planes2: Vec<Plane>) -> Vec<Plane> {
        let mut result: Vec<Plane> = Vec::with_capacity(planes1.len() + planes2.len());

        // Parallel planes with the same orientation: only the most restrictive one bounds the volume.
        for plane in planes1.into_iter().chain(planes2) {
            if let Some(existing) = result
                .iter_mut()
                .find(|p| p.normal.dot(&plane.normal) >= 1.0 - self.tolerance)
            {
                if plane.offset < existing.offset {
                    *existing = plane;
                }
            } else {
                result.push(plane);
            }
        }

        result
    }
}

impl MeshIntersector for ConvexIntersector {
    fn intersect(
        &self,
        mesh1: &ElementMesh,
        mesh2: &ElementMesh,
        margin: Real,
    ) -> Result<Option<IntersectionVolume>, IntersectionError> {
        if !mesh1.is_closed() || !mesh2.is_closed() {
            return Err(IntersectionError::OpenMesh);
        }

        let mut planes1 = convex_planes(mesh1, self.tolerance)?;
        let planes2 = convex_planes(mesh2, self.tolerance)?;

        for plane in &mut planes1 {
            plane.offset += margin;
        }

        let Some(bounds) = mesh1
            .aabb()
            .loosened(margin)
            .intersection(&mesh2.aabb().loosened(self.tolerance))
        else {
            return Ok(None);
        };

        let planes = self.merge_planes(planes1, planes2);
        let center = bounds.center();
        let half_size = bounds.extents().norm() + self.tolerance;
        let clip_tolerance = self.tolerance * 1.0e-2;
        let min_area = self.tolerance * self.tolerance;
        let mut faces = vec![];
        let mut clipped = vec![];

        for (i, plane) in planes.iter().enumerate() {
            let origin = center - plane.normal * plane.signed_distance(&center);
            let [t1, t2] = utils::orthonormal_basis(&plane.normal);
            let mut polygon: SmallVec<[Point<Real>; 16]> = SmallVec::new();
            polygon.extend([
                origin + (t1 + t2) * half_size,
                origin + (t2 - t1) * half_size,
                origin - (t1 + t2) * half_size,
                origin + (t1 - t2) * half_size,
            ]);

            for (j, other) in planes.iter().enumerate() {
                if i == j {
                    continue;
                }

                clip_halfspace_polygon(
                    &other.normal,
                    other.offset,
                    clip_tolerance,
                    &polygon,
                    &mut clipped,
                );
                polygon.clear();
                polygon.extend(clipped.drain(..));

                if polygon.len() < 3 {
                    break;
                }
            }

            if let Some((area, _)) = utils::polygon_area_centroid(&polygon) {
                if area > min_area {
                    faces.push(polygon.into_vec());
                }
            }
        }

        if faces.is_empty() {
            Ok(None)
        } else {
            Ok(Some(IntersectionVolume { faces }))
        }
    }
}
