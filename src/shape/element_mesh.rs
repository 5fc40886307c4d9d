use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::utils;
use indexmap::IndexMap;

/// Errors that can occur when creating an [`ElementMesh`].
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ElementMeshError {
    /// The mesh has no vertex.
    #[error("the mesh has no vertex")]
    EmptyVertices,
    /// A face has less than three vertices.
    #[error("face {face} has less than three vertices")]
    DegenerateFace {
        /// Index of the face.
        face: usize,
    },
    /// A face references a vertex that does not exist.
    #[error("face {face} references the out-of-bounds vertex {vertex}")]
    IndexOutOfBounds {
        /// Index of the face.
        face: usize,
        /// The invalid vertex index.
        vertex: u32,
    },
}

/// A polygonal mesh, the geometry of one element.
///
/// Faces are polygons given as indices into the vertex buffer. They are
/// expected to be planar and consistently oriented (counter-clockwise when
/// seen from the outside) but this is only required by the accurate contact
/// strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementMesh {
    vertices: Vec<Point<Real>>,
    faces: Vec<Vec<u32>>,
}

impl ElementMesh {
    /// Creates a mesh after checking that every face is valid.
    pub fn new(vertices: Vec<Point<Real>>, faces: Vec<Vec<u32>>) -> Result<Self, ElementMeshError> {
        if vertices.is_empty() {
            return Err(ElementMeshError::EmptyVertices);
        }

        for (face_id, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(ElementMeshError::DegenerateFace { face: face_id });
            }

            if let Some(vertex) = face.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(ElementMeshError::IndexOutOfBounds {
                    face: face_id,
                    vertex: *vertex,
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// Creates the mesh of a box centered at the origin.
    pub fn cuboid(half_extents: Vector<Real>) -> Self {
        let he = half_extents;
        let vertices = vec![
            Point::new(-he.x, -he.y, -he.z),
            Point::new(he.x, -he.y, -he.z),
            Point::new(he.x, he.y, -he.z),
            Point::new(-he.x, he.y, -he.z),
            Point::new(-he.x, -he.y, he.z),
            Point::new(he.x, -he.y, he.z),
            Point::new(he.x, he.y, he.z),
            Point::new(-he.x, he.y, he.z),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ];

        Self { vertices, faces }
    }

    /// Creates the mesh of an axis-aligned box spanning `aabb`.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let mut mesh = Self::cuboid(aabb.half_extents());
        mesh.translate(&aabb.center().coords);
        mesh
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The polygonal faces of this mesh.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// The vertices of the `i`-th face.
    pub fn face_polygon(&self, i: usize) -> Vec<Point<Real>> {
        self.faces[i]
            .iter()
            .map(|id| self.vertices[*id as usize])
            .collect()
    }

    /// The AABB of this mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// The mean of all the vertices of this mesh.
    pub fn vertex_centroid(&self) -> Point<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector::zeros(), |acc, pt| acc + pt.coords);
        Point::from(sum / self.vertices.len() as Real)
    }

    /// The total area of the faces of this mesh.
    pub fn surface_area(&self) -> Real {
        (0..self.faces.len())
            .filter_map(|i| utils::polygon_area_centroid(&self.face_polygon(i)))
            .map(|(area, _)| area)
            .sum()
    }

    /// Translates every vertex of this mesh.
    pub fn translate(&mut self, translation: &Vector<Real>) {
        for pt in &mut self.vertices {
            *pt += translation;
        }
    }

    /// Returns a copy of this mesh with `scale` then `pos` baked into its vertices.
    ///
    /// A negative scale determinant mirrors the mesh, so the face winding is
    /// reversed to keep the faces oriented outward.
    pub fn baked(&self, pos: &Isometry<Real>, scale: &Vector<Real>) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|pt| pos * Point::from(pt.coords.component_mul(scale)))
            .collect();
        let mut faces = self.faces.clone();

        if scale.x * scale.y * scale.z < 0.0 {
            for face in &mut faces {
                face.reverse();
            }
        }

        Self { vertices, faces }
    }

    /// Checks that every edge is shared by exactly two faces with opposite directions.
    pub fn is_closed(&self) -> bool {
        let mut edges: IndexMap<(u32, u32), isize> = IndexMap::new();

        for face in &self.faces {
            for (k, a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                let (key, dir) = if *a < b { ((*a, b), 1) } else { ((b, *a), -1) };
                *edges.entry(key).or_insert(0) += dir;
            }
        }

        !edges.is_empty() && edges.values().all(|balance| *balance == 0)
    }
}
