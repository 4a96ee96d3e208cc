//! # Geometry
//!
//! Owner of a vertex buffer and an index buffer, plus a face-start buffer for
//! variable-arity meshes. Elements are derived on demand from these flat
//! arrays; derived queries are memoized in a per-instance [`DerivedCache`].
//!
//! ## Layouts
//!
//! ```text
//! Fixed(3):  indices [0 1 2 1 2 3]            elements (0 1 2) (1 2 3)
//! Variable:  indices [0 1 2 3 4 5 6]
//!            starts  [0 4]  (+ sentinel 7)     elements (0 1 2 3) (4 5 6)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use poly_mesh::{Geometry, Vec3};
//!
//! let quad = Geometry::quads(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
//!     vec![0, 1, 2, 3],
//! )?;
//! assert_eq!(quad.face_count(), 1);
//! assert_eq!(quad.edges().len(), 4);
//! # Ok::<(), poly_mesh::GeometryError>(())
//! ```

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;

use crate::cache::{CacheKind, DerivedCache};
use crate::config::Tolerance;
use crate::core::vec3::{bounds, Vec3};
use crate::element::{Element, ElementKind, Elements};
use crate::error::{GeometryError, GeometryResult};
use crate::ops;

// =============================================================================
// LAYOUT
// =============================================================================

/// How the flat index buffer is partitioned into elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Contiguous runs of a fixed arity.
    Fixed(usize),
    /// First index position of each element; the index-buffer length closes
    /// the last one.
    Variable {
        /// Strictly increasing offsets starting at 0.
        face_starts: Vec<u32>,
    },
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// An immutable indexed mesh.
///
/// The vertex buffer is reference counted so that geometries derived through
/// [`Geometry::to_poly_mesh`] or [`Geometry::merge_coplanar`] share it.
///
/// Vertex indices are not range-checked at construction. Positional queries
/// on an element that references a missing vertex panic; run
/// [`Geometry::validate`] on untrusted buffers first.
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Arc<[Vec3]>,
    indices: Vec<u32>,
    layout: Layout,
    cache: DerivedCache,
}

impl Geometry {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Creates a fixed-arity geometry.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::ArityTooSmall`] when `arity` is 0
    /// - [`GeometryError::IndexCountMismatch`] when `indices.len()` is not a
    ///   multiple of `arity`; the remainder is never silently dropped
    pub fn fixed(
        vertices: impl Into<Arc<[Vec3]>>,
        indices: Vec<u32>,
        arity: usize,
    ) -> GeometryResult<Self> {
        if arity == 0 {
            return Err(GeometryError::ArityTooSmall {
                required: 1,
                actual: 0,
            });
        }
        if indices.len() % arity != 0 {
            return Err(GeometryError::IndexCountMismatch {
                len: indices.len(),
                arity,
            });
        }
        Ok(Self {
            vertices: vertices.into(),
            indices,
            layout: Layout::Fixed(arity),
            cache: DerivedCache::new(),
        })
    }

    /// Creates a point cloud, one index per element.
    pub fn points(vertices: impl Into<Arc<[Vec3]>>, indices: Vec<u32>) -> GeometryResult<Self> {
        Self::fixed(vertices, indices, 1)
    }

    /// Creates a line list, two indices per element.
    pub fn lines(vertices: impl Into<Arc<[Vec3]>>, indices: Vec<u32>) -> GeometryResult<Self> {
        Self::fixed(vertices, indices, 2)
    }

    /// Creates a triangle mesh, three indices per element.
    pub fn triangles(vertices: impl Into<Arc<[Vec3]>>, indices: Vec<u32>) -> GeometryResult<Self> {
        Self::fixed(vertices, indices, 3)
    }

    /// Creates a quad mesh, four indices per element.
    pub fn quads(vertices: impl Into<Arc<[Vec3]>>, indices: Vec<u32>) -> GeometryResult<Self> {
        Self::fixed(vertices, indices, 4)
    }

    /// Creates a variable-arity polygon mesh.
    ///
    /// Element `i` spans `indices[face_starts[i]..face_starts[i + 1]]`, with
    /// `indices.len()` standing in for the missing final start.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidFaceStarts`] unless the offsets start at 0, are
    /// strictly increasing and stay below `indices.len()`.
    pub fn polygons(
        vertices: impl Into<Arc<[Vec3]>>,
        indices: Vec<u32>,
        face_starts: Vec<u32>,
    ) -> GeometryResult<Self> {
        validate_face_starts(&face_starts, indices.len())?;
        Ok(Self {
            vertices: vertices.into(),
            indices,
            layout: Layout::Variable { face_starts },
            cache: DerivedCache::new(),
        })
    }

    /// Polygon constructor for face starts produced by this crate.
    pub(crate) fn polygons_unchecked(
        vertices: Arc<[Vec3]>,
        indices: Vec<u32>,
        face_starts: Vec<u32>,
    ) -> Self {
        debug_assert!(validate_face_starts(&face_starts, indices.len()).is_ok());
        Self {
            vertices,
            indices,
            layout: Layout::Variable { face_starts },
            cache: DerivedCache::new(),
        }
    }

    // =========================================================================
    // BUFFERS
    // =========================================================================

    /// The vertex buffer.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The shared vertex buffer handle.
    #[inline]
    pub fn shared_vertices(&self) -> &Arc<[Vec3]> {
        &self.vertices
    }

    /// Number of vertices in the buffer, referenced or not.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The raw index buffer.
    #[inline]
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    /// Face-start offsets, `None` for fixed-arity layouts.
    pub fn face_starts(&self) -> Option<&[u32]> {
        match &self.layout {
            Layout::Fixed(_) => None,
            Layout::Variable { face_starts } => Some(face_starts),
        }
    }

    /// The index partitioning.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Element kind of the mesh: the fixed arity's kind, or `Polygon`.
    pub fn kind(&self) -> ElementKind {
        match self.layout {
            Layout::Fixed(arity) => ElementKind::from_arity(arity),
            Layout::Variable { .. } => ElementKind::Polygon,
        }
    }

    /// The memoization cache, for inspecting statistics.
    #[inline]
    pub fn cache(&self) -> &DerivedCache {
        &self.cache
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// Number of elements.
    pub fn face_count(&self) -> usize {
        match &self.layout {
            Layout::Fixed(arity) => self.indices.len() / arity,
            Layout::Variable { face_starts } => face_starts.len(),
        }
    }

    /// Read view over every element.
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(self)
    }

    /// Element at an ordinal, `None` past the end.
    pub fn element(&self, ordinal: usize) -> Option<Element<'_>> {
        let range = self.element_range(ordinal)?;
        Some(Element::new(self, ordinal, &self.indices[range]))
    }

    /// Index-buffer range of an element.
    pub fn element_range(&self, ordinal: usize) -> Option<Range<usize>> {
        match &self.layout {
            Layout::Fixed(arity) => {
                let start = ordinal.checked_mul(*arity)?;
                let end = start.checked_add(*arity)?;
                (end <= self.indices.len()).then_some(start..end)
            }
            Layout::Variable { face_starts } => {
                let start = *face_starts.get(ordinal)? as usize;
                let end = face_starts
                    .get(ordinal + 1)
                    .map_or(self.indices.len(), |&next| next as usize);
                Some(start..end)
            }
        }
    }

    // =========================================================================
    // DERIVED QUERIES (memoized)
    // =========================================================================

    /// Every element's indices in element order, then local order.
    pub fn indices(&self) -> &[u32] {
        self.cache.fetch::<Vec<u32>, _>(CacheKind::Indices, &self.cache.indices, || {
            let mut flat = Vec::with_capacity(self.indices.len());
            for element in self.elements() {
                flat.extend_from_slice(element.indices());
            }
            flat
        })
    }

    /// Cyclic edge vertex pairs of every element, in element order.
    pub fn edges(&self) -> &[[u32; 2]] {
        self.cache.fetch::<Vec<[u32; 2]>, _>(CacheKind::Edges, &self.cache.edges, || {
            self.elements()
                .iter()
                .flat_map(|element| element.edges().map(|edge| edge.indices()))
                .collect()
        })
    }

    /// Midpoint of every element.
    pub fn face_midpoints(&self) -> &[Vec3] {
        self.cache
            .fetch::<Vec<Vec3>, _>(CacheKind::FaceMidpoints, &self.cache.face_midpoints, || {
                self.par_map_elements(|element| element.midpoint())
            })
    }

    /// Normal of every element.
    ///
    /// Elements with fewer than three vertices, or degenerate ones, map to
    /// `Vec3::ZERO`.
    pub fn face_normals(&self) -> &[Vec3] {
        self.cache
            .fetch::<Vec<Vec3>, _>(CacheKind::FaceNormals, &self.cache.face_normals, || {
                self.par_map_elements(|element| element.try_normal().unwrap_or(Vec3::ZERO))
            })
    }

    /// Distinct vertex indices referenced by any element, ascending.
    pub fn used_vertices(&self) -> &[u32] {
        self.cache
            .fetch::<Vec<u32>, _>(CacheKind::UsedVertices, &self.cache.used_vertices, || {
                let mut used = self.indices.clone();
                used.sort_unstable();
                used.dedup();
                used
            })
    }

    /// Positions of [`Geometry::used_vertices`].
    pub fn used_positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.used_vertices()
            .iter()
            .map(move |&i| self.vertices[i as usize])
    }

    /// `(min, max)` corners over the referenced vertices, `None` when no
    /// vertex is referenced.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        bounds(self.used_positions())
    }

    /// Checks that every index refers to an existing vertex.
    ///
    /// Construction does not check this; call it on untrusted buffers.
    pub fn validate(&self) -> GeometryResult<()> {
        let vertex_count = self.vertices.len();
        for element in self.elements() {
            if let Some(&index) = element
                .indices()
                .iter()
                .find(|&&i| i as usize >= vertex_count)
            {
                return Err(GeometryError::VertexOutOfBounds {
                    element: element.ordinal(),
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// New polygon geometry over the same vertex buffer; see
    /// [`ops::to_poly_mesh`](crate::ops::to_poly_mesh).
    pub fn to_poly_mesh<I>(&self, face_lists: I) -> Geometry
    where
        I: IntoIterator,
        I::Item: AsRef<[u32]>,
    {
        ops::to_poly_mesh(self, face_lists)
    }

    /// Merges edge-adjacent coplanar triangles; see
    /// [`ops::merge_coplanar`](crate::ops::merge_coplanar).
    pub fn merge_coplanar(&self, tolerance: Tolerance) -> Geometry {
        ops::merge_coplanar(self, tolerance)
    }

    fn par_map_elements<T, F>(&self, map: F) -> Vec<T>
    where
        T: Send,
        F: Fn(Element<'_>) -> T + Sync + Send,
    {
        (0..self.face_count())
            .into_par_iter()
            .filter_map(|ordinal| self.element(ordinal))
            .map(map)
            .collect()
    }
}

/// Checks the face-start invariants against the index-buffer length.
fn validate_face_starts(face_starts: &[u32], index_count: usize) -> GeometryResult<()> {
    let Some(&first) = face_starts.first() else {
        return if index_count == 0 {
            Ok(())
        } else {
            Err(GeometryError::InvalidFaceStarts(format!(
                "{index_count} indices but no face starts"
            )))
        };
    };
    if first != 0 {
        return Err(GeometryError::InvalidFaceStarts(format!(
            "first face start is {first}, expected 0"
        )));
    }
    if let Some(position) = face_starts.windows(2).position(|w| w[0] >= w[1]) {
        return Err(GeometryError::InvalidFaceStarts(format!(
            "face starts not strictly increasing at position {}",
            position + 1
        )));
    }
    if let Some(&last) = face_starts.last() {
        if last as usize >= index_count {
            return Err(GeometryError::InvalidFaceStarts(format!(
                "last face start {last} leaves an empty face in {index_count} indices"
            )));
        }
    }
    Ok(())
}
