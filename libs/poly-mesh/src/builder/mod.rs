//! # Mesh Builder
//!
//! Append-only accumulation of vertices and triangle index triples, frozen
//! once into an immutable triangle [`Geometry`].
//!
//! ## Example
//!
//! ```rust
//! use poly_mesh::{GeometryError, MeshBuilder, Vec3};
//!
//! let mut builder = MeshBuilder::new();
//! builder
//!     .add(Vec3::ZERO)?
//!     .add(Vec3::X)?
//!     .add(Vec3::Y)?
//!     .add_face(0, 1, 2)?;
//! let mesh = builder.freeze()?;
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(builder.add(Vec3::Z).err(), Some(GeometryError::BuilderFrozen));
//! # Ok::<(), GeometryError>(())
//! ```

use crate::core::vec3::Vec3;
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Geometry;

/// Buffers accumulated before freezing.
#[derive(Debug, Default)]
struct Buffers {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

/// Single-writer triangle mesh builder.
///
/// The builder and the mesh it produces are distinct types: once frozen, the
/// buffers belong to the [`Geometry`] and every further call on the builder
/// fails with [`GeometryError::BuilderFrozen`].
#[derive(Debug)]
pub struct MeshBuilder {
    /// `None` once frozen.
    buffers: Option<Buffers>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            buffers: Some(Buffers::default()),
        }
    }

    /// Creates a builder with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            buffers: Some(Buffers {
                vertices: Vec::with_capacity(vertex_count),
                indices: Vec::with_capacity(face_count * 3),
            }),
        }
    }

    /// Appends a vertex.
    pub fn add(&mut self, vertex: Vec3) -> GeometryResult<&mut Self> {
        self.buffers_mut()?.vertices.push(vertex);
        Ok(self)
    }

    /// Appends a triangle by vertex indices.
    ///
    /// Indices are not checked against the vertex count; faces may be added
    /// before the vertices they reference.
    pub fn add_face(&mut self, a: u32, b: u32, c: u32) -> GeometryResult<&mut Self> {
        self.buffers_mut()?.indices.extend_from_slice(&[a, b, c]);
        Ok(self)
    }

    /// Number of vertices added so far, 0 once frozen.
    pub fn vertex_count(&self) -> usize {
        self.buffers.as_ref().map_or(0, |b| b.vertices.len())
    }

    /// Number of faces added so far, 0 once frozen.
    pub fn face_count(&self) -> usize {
        self.buffers.as_ref().map_or(0, |b| b.indices.len() / 3)
    }

    /// True after [`MeshBuilder::freeze`].
    pub fn is_frozen(&self) -> bool {
        self.buffers.is_none()
    }

    /// Moves the buffers into an immutable triangle geometry.
    ///
    /// # Errors
    /// [`GeometryError::BuilderFrozen`] when called a second time.
    pub fn freeze(&mut self) -> GeometryResult<Geometry> {
        let Buffers { vertices, indices } = self.buffers.take().ok_or(GeometryError::BuilderFrozen)?;
        log::debug!(
            "freezing mesh builder: {} vertices, {} faces",
            vertices.len(),
            indices.len() / 3
        );
        Geometry::triangles(vertices, indices)
    }

    fn buffers_mut(&mut self) -> GeometryResult<&mut Buffers> {
        self.buffers.as_mut().ok_or(GeometryError::BuilderFrozen)
    }
}
