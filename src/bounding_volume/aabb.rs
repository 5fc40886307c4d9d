//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners. Every element of the catalog
/// carries the AABB of its baked world-space mesh; the broad phase, the tiny
/// element detection and the approximate contact estimation all work on it.
///
/// # Invariant
///
/// `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z` for any AABB
/// that contains at least one point. [`Aabb::new_invalid`] is the only
/// constructor that breaks it, as a starting point for merges.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use bondnet3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
///
/// // Touching boxes intersect.
/// assert!(a.intersects(&b));
/// assert_eq!(a.overlaps(&b).x, 0.0);
/// # }
/// ```
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// Useful as the initial value of a sequence of [`Aabb::take_point`] or
    /// [`Aabb::merge`] calls.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the smallest AABB enclosing all the given points.
    ///
    /// Returns an invalid AABB if `pts` is empty.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// Does this AABB contain at least one point?
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The largest side length of this AABB.
    ///
    /// This is the size compared against the minimum element size.
    #[inline]
    pub fn largest_extent(&self) -> Real {
        self.extents().max()
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Enlarges this AABB so it also contains `other`.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    /// Returns a copy of this AABB enlarged by `amount` on every side.
    ///
    /// `amount` must be non-negative.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }

    /// Tests if this AABB intersects `other`.
    ///
    /// The test is inclusive: boxes sharing a face, an edge or a corner
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    /// Computes the intersection of this AABB and `other`.
    ///
    /// Returns `None` if they do not intersect. Touching boxes yield a flat
    /// AABB.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let result = Aabb {
            mins: Point::from(self.mins.coords.sup(&other.mins.coords)),
            maxs: Point::from(self.maxs.coords.inf(&other.maxs.coords)),
        };

        if result.is_valid() {
            Some(result)
        } else {
            None
        }
    }

    /// The signed overlap of this AABB and `other` along each axis.
    ///
    /// A negative component is the gap separating both boxes along that axis.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> Vector<Real> {
        self.maxs.coords.inf(&other.maxs.coords) - self.mins.coords.sup(&other.mins.coords)
    }

    /// The smallest distance between a point of this AABB and a point of `other`.
    ///
    /// Zero if both boxes intersect.
    pub fn distance(&self, other: &Aabb) -> Real {
        self.overlaps(other).map(|o| (-o).max(0.0)).norm()
    }

    /// The rectangle of this AABB as an `rstar` envelope.
    #[inline]
    pub fn to_rectangle(&self) -> rstar::primitives::Rectangle<[Real; DIM]> {
        rstar::primitives::Rectangle::from_corners(self.mins.into(), self.maxs.into())
    }
}
