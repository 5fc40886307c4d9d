use super::{ContactEstimate, ContactGeometry};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Vector, DIM};

/// Estimates the contact between two elements from their AABBs only.
///
/// The axis with the smallest overlap is taken as the contact normal; the
/// area is the product of the overlaps along the two other axes (negative
/// overlaps count as zero). The location is the center of the overlap region,
/// which lies in the middle of the gap along the normal if both boxes are
/// separated.
///
/// The area never decreases when the overlap of both boxes grows. It may be
/// zero, for example when the boxes only share an edge.
pub fn approximate_contact(aabb1: &Aabb, aabb2: &Aabb) -> ContactEstimate {
    let overlaps = aabb1.overlaps(aabb2);
    let normal_axis = overlaps.imin();

    let mut lateral = [0.0; DIM - 1];
    let mut k = 0;
    for axis in 0..DIM {
        if axis != normal_axis {
            lateral[k] = overlaps[axis].max(0.0);
            k += 1;
        }
    }

    let (width, height) = if lateral[0] >= lateral[1] {
        (lateral[0], lateral[1])
    } else {
        (lateral[1], lateral[0])
    };

    let lo = aabb1.mins.coords.sup(&aabb2.mins.coords);
    let hi = aabb1.maxs.coords.inf(&aabb2.maxs.coords);
    let location = Point::from((lo + hi) * 0.5);

    let mut normal = Vector::zeros();
    normal[normal_axis] = if aabb2.center()[normal_axis] < aabb1.center()[normal_axis] {
        -1.0
    } else {
        1.0
    };

    ContactEstimate {
        location,
        geometry: ContactGeometry {
            area: width * height,
            normal,
            width,
            height,
            thickness: overlaps[normal_axis],
        },
    }
}
