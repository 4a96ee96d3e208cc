//! # Elements
//!
//! Borrowed views of the topological primitives of a [`Geometry`].
//!
//! An [`Element`] is an ordered list of vertex indices. It never copies: its
//! index slice points straight into the owning geometry's index buffer, and
//! the `'g` lifetime keeps every view from outliving that geometry.
//!
//! ```text
//! index buffer   [0 1 2 | 1 2 3]
//!                 ^^^^^   ^^^^^
//!               element 0  element 1
//! ```

use config::constants::approx_zero;
use serde::{Deserialize, Serialize};

use crate::core::vec3::{centroid, Vec3};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Geometry;

// =============================================================================
// ELEMENT KIND
// =============================================================================

/// Tag for the arity of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// One vertex.
    Point,
    /// Two vertices.
    Line,
    /// Three vertices.
    Triangle,
    /// Four vertices.
    Quad,
    /// Any other vertex count.
    Polygon,
}

impl ElementKind {
    /// Classifies a vertex count.
    ///
    /// # Examples
    /// ```
    /// use poly_mesh::ElementKind;
    /// assert_eq!(ElementKind::from_arity(3), ElementKind::Triangle);
    /// assert_eq!(ElementKind::from_arity(7), ElementKind::Polygon);
    /// ```
    pub fn from_arity(arity: usize) -> Self {
        match arity {
            1 => ElementKind::Point,
            2 => ElementKind::Line,
            3 => ElementKind::Triangle,
            4 => ElementKind::Quad,
            _ => ElementKind::Polygon,
        }
    }

    /// Fixed vertex count of this kind, `None` for polygons.
    pub fn arity(self) -> Option<usize> {
        match self {
            ElementKind::Point => Some(1),
            ElementKind::Line => Some(2),
            ElementKind::Triangle => Some(3),
            ElementKind::Quad => Some(4),
            ElementKind::Polygon => None,
        }
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// One primitive of a geometry, identified by its ordinal.
#[derive(Debug, Clone, Copy)]
pub struct Element<'g> {
    geometry: &'g Geometry,
    ordinal: usize,
    indices: &'g [u32],
}

impl<'g> Element<'g> {
    pub(crate) fn new(geometry: &'g Geometry, ordinal: usize, indices: &'g [u32]) -> Self {
        Self {
            geometry,
            ordinal,
            indices,
        }
    }

    /// The owning geometry.
    #[inline]
    pub fn geometry(&self) -> &'g Geometry {
        self.geometry
    }

    /// Position of this element within its geometry.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Number of vertices (arity).
    #[inline]
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// Arity tag of this element.
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_arity(self.count())
    }

    /// The element's vertex indices, borrowed from the geometry.
    #[inline]
    pub fn indices(&self) -> &'g [u32] {
        self.indices
    }

    /// Vertex index at a local offset.
    ///
    /// # Errors
    /// [`GeometryError::IndexOutOfBounds`] when `local >= count()`.
    pub fn index(&self, local: usize) -> GeometryResult<u32> {
        self.indices
            .get(local)
            .copied()
            .ok_or(GeometryError::IndexOutOfBounds {
                index: local,
                count: self.count(),
            })
    }

    /// Vertex position at a local offset.
    pub fn point(&self, local: usize) -> GeometryResult<Vec3> {
        self.index(local).map(|i| self.position(i))
    }

    /// Vertex positions in local order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec3> + 'g {
        let vertices = self.geometry.vertices();
        let indices = self.indices;
        indices.iter().map(move |&i| vertices[i as usize])
    }

    /// Edge starting at a local offset.
    pub fn edge(&self, local: usize) -> GeometryResult<Edge<'g>> {
        if local < self.count() {
            Ok(Edge {
                element: *self,
                offset: local,
            })
        } else {
            Err(GeometryError::IndexOutOfBounds {
                index: local,
                count: self.count(),
            })
        }
    }

    /// The `count()` cyclic edges; the last one wraps to the first vertex.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge<'g>> + 'g {
        let element = *self;
        (0..self.count()).map(move |offset| Edge { element, offset })
    }

    /// Arithmetic mean of the vertex positions.
    pub fn midpoint(&self) -> Vec3 {
        // count() >= 1 is a construction invariant
        centroid(self.points()).unwrap_or(Vec3::ZERO)
    }

    /// `P1 - P0`.
    ///
    /// # Errors
    /// [`GeometryError::ArityTooSmall`] for elements with fewer than 3 vertices.
    pub fn tangent(&self) -> GeometryResult<Vec3> {
        let [p0, p1, _] = self.leading_triple()?;
        Ok(p1 - p0)
    }

    /// `P2 - P0`.
    ///
    /// # Errors
    /// [`GeometryError::ArityTooSmall`] for elements with fewer than 3 vertices.
    pub fn binormal(&self) -> GeometryResult<Vec3> {
        let [p0, _, p2] = self.leading_triple()?;
        Ok(p2 - p0)
    }

    /// `normalize(binormal × tangent)`.
    ///
    /// The operand order fixes the winding convention. A degenerate element
    /// yields a non-finite vector; see [`Element::try_normal`].
    ///
    /// # Examples
    /// ```
    /// use poly_mesh::{Geometry, Vec3};
    /// let tri = Geometry::triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]).unwrap();
    /// assert_eq!(tri.element(0).unwrap().normal().unwrap(), Vec3::NEG_Z);
    /// ```
    pub fn normal(&self) -> GeometryResult<Vec3> {
        Ok(self.binormal()?.cross(self.tangent()?).normalize())
    }

    /// Like [`Element::normal`], but `None` for short or degenerate elements.
    pub fn try_normal(&self) -> Option<Vec3> {
        let [p0, p1, p2] = self.leading_triple().ok()?;
        let cross = (p2 - p0).cross(p1 - p0);
        let length = cross.length();
        (length.is_finite() && !approx_zero(length)).then(|| cross / length)
    }

    fn leading_triple(&self) -> GeometryResult<[Vec3; 3]> {
        match self.indices {
            [a, b, c, ..] => Ok([self.position(*a), self.position(*b), self.position(*c)]),
            _ => Err(GeometryError::ArityTooSmall {
                required: 3,
                actual: self.count(),
            }),
        }
    }

    #[inline]
    fn position(&self, index: u32) -> Vec3 {
        self.geometry.vertices()[index as usize]
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// The cyclic vertex pair of an element starting at a local offset.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'g> {
    element: Element<'g>,
    offset: usize,
}

impl<'g> Edge<'g> {
    /// The element this edge belongs to.
    pub fn element(&self) -> Element<'g> {
        self.element
    }

    /// Local offset of the first vertex.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Vertex indices `[first, second]`.
    pub fn indices(&self) -> [u32; 2] {
        let indices = self.element.indices();
        let n = indices.len();
        [indices[self.offset], indices[(self.offset + 1) % n]]
    }

    /// Position of the vertex at `offset`.
    pub fn first(&self) -> Vec3 {
        self.element.position(self.indices()[0])
    }

    /// Position of the vertex at `(offset + 1) mod count`.
    pub fn second(&self) -> Vec3 {
        self.element.position(self.indices()[1])
    }

    /// `second - first`.
    pub fn vector(&self) -> Vec3 {
        self.second() - self.first()
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    /// Midpoint of the two positions.
    pub fn midpoint(&self) -> Vec3 {
        (self.first() + self.second()) * 0.5
    }

    /// True when both edges join the same vertex indices, in either direction.
    pub fn same_vertices(&self, other: &Edge<'_>) -> bool {
        let [a, b] = self.indices();
        let [c, d] = other.indices();
        (a == c && b == d) || (a == d && b == c)
    }
}

// =============================================================================
// ELEMENTS VIEW
// =============================================================================

/// Read view over every element of a geometry, computed on demand.
#[derive(Debug, Clone, Copy)]
pub struct Elements<'g> {
    geometry: &'g Geometry,
}

impl<'g> Elements<'g> {
    pub(crate) fn new(geometry: &'g Geometry) -> Self {
        Self { geometry }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.geometry.face_count()
    }

    /// True when the geometry has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at an ordinal.
    pub fn get(&self, ordinal: usize) -> Option<Element<'g>> {
        self.geometry.element(ordinal)
    }

    /// Iterates elements in ordinal order.
    pub fn iter(&self) -> ElementsIter<'g> {
        ElementsIter {
            geometry: self.geometry,
            next: 0,
            end: self.len(),
        }
    }
}

impl<'g> IntoIterator for Elements<'g> {
    type Item = Element<'g>;
    type IntoIter = ElementsIter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Elements`].
#[derive(Debug, Clone)]
pub struct ElementsIter<'g> {
    geometry: &'g Geometry,
    next: usize,
    end: usize,
}

impl<'g> Iterator for ElementsIter<'g> {
    type Item = Element<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let element = self.geometry.element(self.next);
        self.next += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ElementsIter<'_> {}
