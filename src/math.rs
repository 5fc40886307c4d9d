//! Compilation flags dependent aliases for mathematical types.

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub use f64 as Real;

/// The scalar type used throughout this crate.
#[cfg(feature = "f32")]
pub use f32 as Real;

pub use na::{Isometry3, Point3, Translation3, UnitQuaternion, UnitVector3, Vector3};

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub use Point3 as Point;

/// The vector type.
pub use Vector3 as Vector;

/// The unit vector type.
pub use UnitVector3 as UnitVector;

/// The transformation matrix type.
pub use Isometry3 as Isometry;

/// The rotation type.
pub type Rotation<N> = UnitQuaternion<N>;

/// The translation type.
pub use Translation3 as Translation;
