use crate::contact::ContactGeometry;
use crate::math::{Point, Real};
use crate::utils::SortedPair;

/// A breakable joint candidate between two elements, keyed by their groups.
///
/// `elements[k]` belongs to the group `groups[k]`; elements are stored lowest
/// index first, so `groups` is not necessarily sorted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The connected element indices, lowest first.
    pub elements: [u32; 2],
    /// The group indices of `elements`.
    pub groups: [u32; 2],
    /// The contact location, where the joint is placed.
    pub location: Point<Real>,
    /// The contact patch description.
    pub geometry: ContactGeometry,
    /// The cluster this connection belongs to, once clustering ran.
    pub cluster: Option<u32>,
}

impl Connection {
    /// The unordered pair of groups this connection joins.
    #[inline]
    pub fn group_pair(&self) -> SortedPair<u32> {
        SortedPair::new(self.groups[0], self.groups[1])
    }

    /// The estimated contact area.
    #[inline]
    pub fn area(&self) -> Real {
        self.geometry.area
    }
}
