use crate::math::{Point, Real, Vector};

/// Computes the (non-normalized) normal of a planar polygon with Newell's method.
///
/// The norm of the result is twice the polygon area. The normal points toward
/// the side from which the polygon is seen counter-clockwise.
pub fn polygon_normal(polygon: &[Point<Real>]) -> Vector<Real> {
    let mut normal = Vector::zeros();

    for (i, a) in polygon.iter().enumerate() {
        let b = &polygon[(i + 1) % polygon.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    normal
}

/// Computes the area and the area-weighted centroid of a planar convex polygon.
///
/// Returns `None` for polygons with less than three vertices. A degenerate
/// polygon yields a zero area and the mean of its vertices.
pub fn polygon_area_centroid(polygon: &[Point<Real>]) -> Option<(Real, Point<Real>)> {
    if polygon.len() < 3 {
        return None;
    }

    let origin = polygon[0];
    let mut area = 0.0;
    let mut weighted = Vector::zeros();

    // Fan triangulation from the first vertex.
    for i in 1..polygon.len() - 1 {
        let ab = polygon[i] - origin;
        let ac = polygon[i + 1] - origin;
        let tri_area = ab.cross(&ac).norm() * 0.5;
        let tri_center = (origin.coords + polygon[i].coords + polygon[i + 1].coords) / 3.0;
        area += tri_area;
        weighted += tri_center * tri_area;
    }

    if area > 0.0 {
        Some((area, Point::from(weighted / area)))
    } else {
        let mean = polygon
            .iter()
            .fold(Vector::zeros(), |acc, pt| acc + pt.coords)
            / polygon.len() as Real;
        Some((0.0, Point::from(mean)))
    }
}
