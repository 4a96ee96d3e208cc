//! # Coplanar Merge
//!
//! Rebuilds a geometry as variable-arity polygons, either from explicit face
//! lists ([`to_poly_mesh`]) or by merging edge-adjacent coplanar triangles
//! ([`merge_coplanar`]). Both share the source vertex buffer.
//!
//! ## Grouping
//!
//! `merge_coplanar` is a single forward pass, not a global clustering:
//!
//! ```text
//! elements   t0  t1  t2  t3  t4
//! mergeable  -   y   y   n   y      (tested against the representative)
//! rep        t0  t0  t0  t3  t3
//! ```
//!
//! Each element is compared only with the element that opened the current
//! group. Members never become representatives themselves.

use crate::config::Tolerance;
use crate::element::Element;
use crate::geometry::Geometry;
use crate::ops::coplanar::can_merge_tris;

/// Builds a polygon geometry over the vertex buffer of `geometry`.
///
/// Each non-empty face list becomes one element; empty lists contribute
/// neither a face start nor indices.
///
/// # Examples
/// ```
/// use poly_mesh::{ops::to_poly_mesh, Geometry, Vec3};
/// let source = Geometry::points(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]).unwrap();
/// let poly = to_poly_mesh(&source, [vec![0, 1, 2], vec![], vec![2, 1]]);
/// assert_eq!(poly.face_starts(), Some(&[0, 3][..]));
/// assert_eq!(poly.index_buffer(), &[0, 1, 2, 2, 1]);
/// ```
pub fn to_poly_mesh<I>(geometry: &Geometry, face_lists: I) -> Geometry
where
    I: IntoIterator,
    I::Item: AsRef<[u32]>,
{
    let mut indices = Vec::new();
    let mut face_starts = Vec::new();
    for face in face_lists {
        let face = face.as_ref();
        if face.is_empty() {
            continue;
        }
        face_starts.push(indices.len() as u32);
        indices.extend_from_slice(face);
    }
    Geometry::polygons_unchecked(geometry.shared_vertices().clone(), indices, face_starts)
}

/// Merges runs of edge-adjacent coplanar triangles into polygons.
///
/// Scans elements in order; a new group starts whenever an element fails
/// [`can_merge_tris`] against the group's representative. Non-triangles are
/// never mergeable and pass through unchanged.
///
/// A group's polygon is the representative's vertex cycle with every
/// member's third vertex spliced into the edge it shares with the
/// representative. A mergeable triangle that cannot be spliced, because its
/// apex is already in the cycle or its shared pair is not a cycle edge,
/// opens a new group instead, so no element is ever dropped.
pub fn merge_coplanar(geometry: &Geometry, tolerance: Tolerance) -> Geometry {
    let mut faces: Vec<Vec<u32>> = Vec::new();
    let mut representative: Option<Element<'_>> = None;

    for element in geometry.elements() {
        let joins = representative
            .is_some_and(|rep| can_merge_tris(&rep, &element, tolerance.value()));
        if let (true, Some(cycle)) = (joins, faces.last_mut()) {
            if splice_triangle(cycle, element.indices()) {
                log::trace!("element {} joins the current group", element.ordinal());
                continue;
            }
            log::trace!(
                "element {} has no free edge in the current group, starting a new one",
                element.ordinal()
            );
        }
        representative = Some(element);
        faces.push(element.indices().to_vec());
    }

    log::debug!(
        "merged {} elements into {} faces",
        geometry.face_count(),
        faces.len()
    );
    to_poly_mesh(geometry, &faces)
}

/// Inserts the one vertex of `triangle` missing from `cycle` between the two
/// vertices they share.
///
/// Returns false and leaves `cycle` untouched when the triangle has no apex
/// outside the cycle, or when its other two vertices are not an edge of the
/// cycle.
fn splice_triangle(cycle: &mut Vec<u32>, triangle: &[u32]) -> bool {
    let Some(apex) = triangle.iter().copied().find(|i| !cycle.contains(i)) else {
        return false;
    };
    let mut shared = triangle.iter().copied().filter(|&i| i != apex);
    let (Some(u), Some(v)) = (shared.next(), shared.next()) else {
        return false;
    };
    let (Some(p), Some(q)) = (
        cycle.iter().position(|&i| i == u),
        cycle.iter().position(|&i| i == v),
    ) else {
        return false;
    };

    let n = cycle.len();
    let at = if (p + 1) % n == q {
        p + 1
    } else if (q + 1) % n == p {
        q + 1
    } else {
        return false;
    };
    cycle.insert(at, apex);
    true
}

#[cfg(test)]
mod tests;
