//! # poly-mesh
//!
//! Indexed polygonal geometry: points, lines, triangles, quads and
//! variable-arity polygons stored as index arrays over a shared vertex buffer.
//!
//! ## Architecture
//!
//! ```text
//! vertex + index (+ face-start) buffers
//!       ↓
//! Geometry ── DerivedCache (indices, edges, midpoints, normals, used vertices)
//!       ↓
//! Elements / Edge views (borrowed, never copied)
//!       ↓
//! ops: coplanar, can_merge_tris, merge_coplanar, to_poly_mesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use poly_mesh::{config::GeometryConfig, MeshBuilder, Vec3};
//!
//! let mut builder = MeshBuilder::new();
//! builder
//!     .add(Vec3::new(0.0, 0.0, 0.0))?
//!     .add(Vec3::new(1.0, 0.0, 0.0))?
//!     .add(Vec3::new(0.0, 1.0, 0.0))?
//!     .add(Vec3::new(1.0, 1.0, 0.0))?
//!     .add_face(0, 1, 2)?
//!     .add_face(1, 2, 3)?;
//! let mesh = builder.freeze()?;
//!
//! let tolerance = GeometryConfig::default().tolerance_for(&mesh)?;
//! let merged = mesh.merge_coplanar(tolerance);
//! assert_eq!(merged.face_count(), 1);
//! assert_eq!(merged.element(0).map(|quad| quad.count()), Some(4));
//! # Ok::<(), poly_mesh::GeometryError>(())
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod core;
pub mod element;
pub mod error;
pub mod geometry;
pub mod ops;
pub mod procedural;

pub use builder::MeshBuilder;
pub use crate::core::vec3::{Vec2, Vec3};
pub use element::{Edge, Element, ElementKind, Elements};
pub use error::{GeometryError, GeometryResult};
pub use geometry::{Geometry, Layout};
