use std::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// This is the canonical key of an unordered element (or group) pair: the
/// lower index always comes first, so `(3, 1)` and `(1, 3)` are the same pair
/// and sort identically across runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of the pair.
    #[inline]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    /// The largest element of the pair.
    #[inline]
    pub fn second(&self) -> &T {
        &self.0[1]
    }

    /// Both elements, smallest first.
    #[inline]
    pub fn as_array(&self) -> &[T; 2] {
        &self.0
    }

    /// Does this pair contain `element`?
    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.0[0] == *element || self.0[1] == *element
    }
}
