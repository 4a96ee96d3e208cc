//! # Error Types
//!
//! Error types for geometry construction and queries. All errors are explicit
//! and carry the offending values for debugging.
//!
//! ## Error Policy
//!
//! - Contract violations fail immediately, nothing is truncated or repaired
//! - Classification predicates (coplanarity, merge eligibility) never fail

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building or querying geometry.
///
/// ## Example
///
/// ```rust
/// use poly_mesh::{Geometry, GeometryError, Vec3};
///
/// let err = Geometry::triangles(vec![Vec3::ZERO; 3], vec![0, 1]).unwrap_err();
/// assert!(matches!(err, GeometryError::IndexCountMismatch { len: 2, arity: 3 }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A local offset was outside `[0, count)` of an element.
    #[error("Index {index} out of bounds for element of {count} vertices")]
    IndexOutOfBounds {
        /// Requested local offset
        index: usize,
        /// Element arity
        count: usize,
    },

    /// An element references a vertex past the end of the vertex buffer.
    #[error("Element {element} references vertex {index}, but only {vertex_count} vertices exist")]
    VertexOutOfBounds {
        /// Ordinal of the offending element
        element: usize,
        /// Offending vertex index
        index: u32,
        /// Length of the vertex buffer
        vertex_count: usize,
    },

    /// A fixed-arity index buffer was not a multiple of the arity.
    #[error("Index buffer of length {len} is not a multiple of arity {arity}")]
    IndexCountMismatch {
        /// Length of the index buffer
        len: usize,
        /// Required arity
        arity: usize,
    },

    /// Face-start offsets were malformed.
    #[error("Invalid face starts: {0}")]
    InvalidFaceStarts(String),

    /// A query needs more vertices than the element has.
    #[error("Operation requires at least {required} vertices, element has {actual}")]
    ArityTooSmall {
        /// Minimum arity required by the query
        required: usize,
        /// Arity of the element
        actual: usize,
    },

    /// The mesh builder was used after `freeze`.
    #[error("Mesh builder already frozen")]
    BuilderFrozen,

    /// A tolerance was zero, negative or not finite.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),

    /// Invalid sampling parameters for procedural evaluation.
    #[error("Invalid sampling parameters: {0}")]
    InvalidSampling(String),

    /// Invalid workspace configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for geometry operations.
///
/// ## Example
///
/// ```rust
/// use poly_mesh::error::GeometryResult;
/// use poly_mesh::{Geometry, Vec3};
///
/// fn single_point() -> GeometryResult<Geometry> {
///     Geometry::points(vec![Vec3::ZERO], vec![0])
/// }
/// # assert_eq!(single_point().unwrap().face_count(), 1);
/// ```
pub type GeometryResult<T> = Result<T, GeometryError>;

// =============================================================================
// TESTS
// =============================================================================
