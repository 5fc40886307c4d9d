//! Various unsorted geometrical and logical operators.

pub use self::polygon::{polygon_area_centroid, polygon_normal};
pub use self::sorted_pair::SortedPair;
pub use self::wbasis::orthonormal_basis;

mod polygon;
mod sorted_pair;
mod wbasis;
