//! # Coplanarity
//!
//! The four-point coplanarity predicate and the triangle-pair merge
//! eligibility test built on it.
//!
//! Neither function fails: both classify, and tolerance-driven false
//! positives or negatives are accepted approximation error.

use crate::core::vec3::Vec3;
use crate::element::Element;

/// True iff `|(v3 - v1) · ((v2 - v1) × (v4 - v1))| < tolerance`.
///
/// The left side is six times the volume of the tetrahedron `v1 v2 v3 v4`,
/// so `tolerance` is in cubic length units; see
/// [`GeometryConfig::tolerance_for`](crate::config::GeometryConfig::tolerance_for).
///
/// # Examples
/// ```
/// use poly_mesh::{ops::coplanar, Vec3};
/// let flat = coplanar(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0), 1e-9);
/// let lifted = coplanar(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 1e-9);
/// assert!(flat && !lifted);
/// ```
#[inline]
pub fn coplanar(v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3, tolerance: f64) -> bool {
    (v3 - v1).dot((v2 - v1).cross(v4 - v1)).abs() < tolerance
}

/// True iff `a` and `b` are triangles sharing exactly one edge whose four
/// distinct vertices are coplanar.
///
/// Shared vertices are recognized by index, not by position, so both
/// elements must come from the same geometry. Any element that is not a
/// triangle is never mergeable.
pub fn can_merge_tris(a: &Element<'_>, b: &Element<'_>, tolerance: f64) -> bool {
    let (Ok(a_indices), Ok(b_indices)) = (
        <&[u32; 3]>::try_from(a.indices()),
        <&[u32; 3]>::try_from(b.indices()),
    ) else {
        return false;
    };

    let Some(distinct) = distinct_quad(a_indices, b_indices) else {
        return false;
    };

    let vertices = a.geometry().vertices();
    let [p1, p2, p3, p4] = distinct.map(|i| vertices[i as usize]);
    coplanar(p1, p2, p3, p4, tolerance)
}

/// The four distinct indices of two triangles, in first-seen order, or
/// `None` when the count is not exactly four.
fn distinct_quad(a: &[u32; 3], b: &[u32; 3]) -> Option<[u32; 4]> {
    let mut distinct = [0u32; 4];
    let mut len = 0;
    for &index in a.iter().chain(b) {
        if distinct[..len].contains(&index) {
            continue;
        }
        if len == distinct.len() {
            return None;
        }
        distinct[len] = index;
        len += 1;
    }
    (len == distinct.len()).then_some(distinct)
}
