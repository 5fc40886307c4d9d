use super::{ContactEstimate, ContactGeometry};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query::IntersectionVolume;
use crate::utils;

/// Derives the contact from the boolean intersection volume of two elements.
///
/// The contact area is half the surface area of the volume: for the thin slab
/// between two touching elements, this is the area of the shared patch. The
/// location is the area-weighted centroid of the faces, and the normal is the
/// normal of the largest face oriented along `direction` (the direction from
/// the first element toward the second one).
///
/// Returns `None` if the volume has no face with a positive area.
pub fn contact_from_volume(
    volume: &IntersectionVolume,
    direction: &Vector<Real>,
) -> Option<ContactEstimate> {
    let mut total_area = 0.0;
    let mut weighted = Vector::zeros();
    let mut largest: Option<(Real, Vector<Real>)> = None;

    for face in &volume.faces {
        let Some((area, centroid)) = utils::polygon_area_centroid(face) else {
            continue;
        };

        total_area += area;
        weighted += centroid.coords * area;

        if largest.map(|(best, _)| area > best).unwrap_or(true) {
            largest = Some((area, utils::polygon_normal(face)));
        }
    }

    let (_, face_normal) = largest?;
    if total_area <= 0.0 {
        return None;
    }

    let mut normal = face_normal.try_normalize(Real::EPSILON)?;
    if normal.dot(direction) < 0.0 {
        normal = -normal;
    }

    let extents = Aabb::from_points(volume.points()).extents();
    let mut sides = [extents.x, extents.y, extents.z];
    sides.sort_by(|a, b| b.total_cmp(a));

    Some(ContactEstimate {
        location: Point::from(weighted / total_area),
        geometry: ContactGeometry {
            area: total_area * 0.5,
            normal,
            width: sides[0],
            height: sides[1],
            thickness: sides[2],
        },
    })
}
