use crate::math::{Point, Real, Vector};

/// Cuts a polygon with the given half-space.
///
/// A point `pt` is considered as inside of the half-space if
/// `normal.dot(&pt.coords) - offset <= tolerance`. The result is written into
/// `result`, which is cleared first.
pub fn clip_halfspace_polygon(
    normal: &Vector<Real>,
    offset: Real,
    tolerance: Real,
    polygon: &[Point<Real>],
    result: &mut Vec<Point<Real>>,
) {
    result.clear();

    let Some(last_pt) = polygon.last() else {
        return;
    };

    let signed_dist = |pt: &Point<Real>| normal.dot(&pt.coords) - offset;
    let mut last_pt = last_pt;
    let mut last_dist = signed_dist(last_pt);

    for pt in polygon {
        let dist = signed_dist(pt);
        let keep = dist <= tolerance;
        let last_keep = last_dist <= tolerance;

        if keep != last_keep {
            // We crossed the plane, so we need to cut the edge.
            let t = last_dist / (last_dist - dist);
            result.push(last_pt + (pt - last_pt) * t);
        }

        if keep {
            result.push(*pt);
        }

        last_pt = pt;
        last_dist = dist;
    }
}
