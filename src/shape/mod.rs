//! Shapes supported by the builder.

pub use self::element_mesh::{ElementMesh, ElementMeshError};

mod element_mesh;
