use crate::math::{Point, Real, Vector};

/// The strategy used to estimate contact areas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactMode {
    /// Overlap of the element AABBs. Constant time per pair.
    #[default]
    Approximate,
    /// Boolean intersection of the element meshes.
    Accurate,
}

/// Description of the contact patch between two elements.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactGeometry {
    /// The estimated contact area.
    pub area: Real,
    /// The unit contact normal, pointing from the first element toward the second.
    pub normal: Vector<Real>,
    /// The largest side of the contact patch.
    pub width: Real,
    /// The smallest side of the contact patch.
    pub height: Real,
    /// The extent of the contact region along the normal. Negative for a gap.
    pub thickness: Real,
}

/// The result of a successful contact estimation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactEstimate {
    /// The centroid of the contact patch, where the joint is placed.
    pub location: Point<Real>,
    /// The shape of the contact patch.
    pub geometry: ContactGeometry,
}

impl ContactEstimate {
    /// The estimated contact area.
    #[inline]
    pub fn area(&self) -> Real {
        self.geometry.area
    }
}

/// Two elements whose contact area is negligible.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
#[error("no contact: the estimated area {area} is below the contact epsilon")]
pub struct NoContact {
    /// The estimated (negligible) area.
    pub area: Real,
}
