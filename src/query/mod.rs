//! Geometric queries backing the accurate contact strategy.

pub use self::clip_halfspace_polygon::clip_halfspace_polygon;
pub use self::convex_intersector::{convex_planes, ConvexIntersector, Plane};
pub use self::mesh_intersector::{IntersectionError, IntersectionVolume, MeshIntersector};

mod clip_halfspace_polygon;
mod convex_intersector;
mod mesh_intersector;
