use crate::math::{Real, Vector};

/// Computes two unit vectors orthogonal to `n` and to each other.
///
/// `n` must be normalized. The result is deterministic: the same normal
/// always yields the same basis.
pub fn orthonormal_basis(n: &Vector<Real>) -> [Vector<Real>; 2] {
    // Cross with the axis least aligned with `n`.
    let abs = n.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector::x()
    } else if abs.y <= abs.z {
        Vector::y()
    } else {
        Vector::z()
    };

    let t1 = n.cross(&axis).normalize();
    let t2 = n.cross(&t1);
    [t1, t2]
}
