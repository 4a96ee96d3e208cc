use super::*;
use crate::cache::CacheKind;
use crate::core::vec3::Vec3;
use crate::element::ElementKind;
use std::sync::Arc;

fn tol() -> Tolerance {
    Tolerance::new(1e-9).unwrap()
}

/// 3x2 grid of vertices in the z = 0 plane, plus one lifted vertex (6).
///
/// ```text
/// 3---4---5
/// |   |   |
/// 0---1---2      6 = (1, 1, 1)
/// ```
fn grid() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 1.0),
    ]
}

// =============================================================================
// TO_POLY_MESH
// =============================================================================

#[test]
fn to_poly_mesh_skips_empty_faces() {
    let source = Geometry::triangles(grid(), vec![0, 1, 4]).unwrap();
    let faces: Vec<Vec<u32>> = vec![vec![], vec![0, 1, 4, 3], vec![], vec![1, 2, 5]];
    let poly = source.to_poly_mesh(&faces);

    assert_eq!(poly.kind(), ElementKind::Polygon);
    assert_eq!(poly.face_starts(), Some(&[0, 4][..]));
    assert_eq!(poly.index_buffer(), &[0, 1, 4, 3, 1, 2, 5]);
    assert_eq!(poly.face_count(), 2);
    assert!(Arc::ptr_eq(source.shared_vertices(), poly.shared_vertices()));
}

#[test]
fn to_poly_mesh_of_nothing_is_empty() {
    let source = Geometry::triangles(grid(), vec![0, 1, 4]).unwrap();
    let poly = to_poly_mesh(&source, Vec::<Vec<u32>>::new());
    assert_eq!(poly.face_count(), 0);
    assert!(poly.index_buffer().is_empty());
}

// =============================================================================
// MERGE_COPLANAR
// =============================================================================

#[test]
fn two_coplanar_triangles_become_one_quad() {
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let source = Geometry::triangles(vertices, vec![0, 1, 2, 1, 2, 3]).unwrap();
    let merged = source.merge_coplanar(tol());

    assert_eq!(merged.face_count(), 1);
    let quad = merged.element(0).unwrap();
    assert_eq!(quad.kind(), ElementKind::Quad);
    // 3 is spliced into the shared edge 1-2
    assert_eq!(quad.indices(), &[0, 1, 3, 2]);
    assert!(Arc::ptr_eq(source.shared_vertices(), merged.shared_vertices()));
}

#[test]
fn triangles_sharing_one_vertex_stay_separate() {
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 2, 5]).unwrap();
    let merged = merge_coplanar(&source, tol());
    assert_eq!(merged.face_count(), 2);
    assert_eq!(merged.element(0).unwrap().indices(), &[0, 1, 3]);
    assert_eq!(merged.element(1).unwrap().indices(), &[1, 2, 5]);
}

#[test]
fn non_coplanar_neighbours_stay_separate() {
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 6, 3]).unwrap();
    let merged = merge_coplanar(&source, tol());
    assert_eq!(merged.face_count(), 2);
}

#[test]
fn members_are_compared_with_the_representative_only() {
    // t0 = (0,1,3) opens the group, t1 = (1,4,3) shares 1-3 with it and joins.
    // t2 = (1,2,4) shares only vertex 1 with t0, so it opens a new group even
    // though it shares the edge 1-4 with t1. t3 = (2,5,4) joins t2.
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 4, 3, 1, 2, 4, 2, 5, 4]).unwrap();
    let merged = merge_coplanar(&source, tol());

    assert_eq!(merged.face_count(), 2);
    assert_eq!(merged.element(0).unwrap().indices(), &[0, 1, 4, 3]);
    assert_eq!(merged.element(1).unwrap().indices(), &[1, 2, 5, 4]);
}

#[test]
fn group_restarts_after_a_mismatch() {
    // t0, then an unrelated t1, then t2 that would have merged with t0
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 2, 5, 1, 4, 3]).unwrap();
    let merged = merge_coplanar(&source, tol());
    assert_eq!(merged.face_count(), 3);
}

#[test]
fn fan_around_representative_collects_every_apex() {
    // Representative (1,4,3) with neighbours on two of its edges.
    let source = Geometry::triangles(grid(), vec![1, 4, 3, 0, 1, 3, 1, 5, 4]).unwrap();
    let merged = merge_coplanar(&source, tol());

    assert_eq!(merged.face_count(), 1);
    let polygon = merged.element(0).unwrap();
    assert_eq!(polygon.count(), 5);
    assert_eq!(polygon.indices(), &[1, 5, 4, 3, 0]);
}

#[test]
fn non_triangles_pass_through() {
    let source = Geometry::polygons(
        grid(),
        vec![0, 1, 4, 3, 1, 2, 5, 4, 1, 2, 5],
        vec![0, 4, 8],
    )
    .unwrap();
    let merged = merge_coplanar(&source, Tolerance::new(f64::MAX).unwrap());
    assert_eq!(merged.face_count(), 3);
    assert_eq!(merged.index_buffer(), source.index_buffer());
}

#[test]
fn merged_geometry_has_fresh_cache() {
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 4, 3]).unwrap();
    source.edges();
    let merged = merge_coplanar(&source, tol());
    assert!(!merged.cache().is_filled(CacheKind::Edges));
    assert_eq!(merged.edges().len(), 4);
}

#[test]
fn splice_inserts_between_shared_vertices() {
    let mut cycle = vec![0, 1, 2];
    assert!(splice_triangle(&mut cycle, &[2, 0, 7]));
    // 2 -> 0 wraps around the end of the cycle
    assert_eq!(cycle, vec![0, 1, 2, 7]);

    let mut cycle = vec![0, 1, 2];
    assert!(splice_triangle(&mut cycle, &[1, 0, 9]));
    assert_eq!(cycle, vec![0, 9, 1, 2]);
}

#[test]
fn splice_refuses_without_free_edge() {
    // no apex outside the cycle
    let mut cycle = vec![0, 1, 2];
    assert!(!splice_triangle(&mut cycle, &[0, 1, 2]));
    assert_eq!(cycle, vec![0, 1, 2]);

    // shared pair not in the cycle
    let mut cycle = vec![0, 0, 1];
    assert!(!splice_triangle(&mut cycle, &[1, 2, 5]));
    assert_eq!(cycle, vec![0, 0, 1]);

    // shared pair in the cycle but not adjacent
    let mut cycle = vec![0, 1, 4, 3];
    assert!(!splice_triangle(&mut cycle, &[0, 4, 7]));
    assert_eq!(cycle, vec![0, 1, 4, 3]);
}

#[test]
fn unspliceable_triangle_after_degenerate_representative_is_kept() {
    // (0,0,1) and (1,2,5) have four distinct indices, but 1-2 is no edge of
    // the representative's cycle
    let source = Geometry::triangles(grid(), vec![0, 0, 1, 1, 2, 5]).unwrap();
    assert!(can_merge_tris(
        &source.element(0).unwrap(),
        &source.element(1).unwrap(),
        tol().value()
    ));

    let merged = merge_coplanar(&source, tol());
    assert_eq!(merged.face_count(), 2);
    assert_eq!(merged.element(0).unwrap().indices(), &[0, 0, 1]);
    assert_eq!(merged.element(1).unwrap().indices(), &[1, 2, 5]);
}

#[test]
fn triangle_with_apex_already_in_group_opens_new_group() {
    // t1 = (1,4,3) joins t0 = (0,1,3); t2 = (0,3,4) is mergeable with t0 but
    // every one of its vertices is already in the cycle
    let source = Geometry::triangles(grid(), vec![0, 1, 3, 1, 4, 3, 0, 3, 4]).unwrap();
    let merged = merge_coplanar(&source, tol());

    assert_eq!(merged.face_count(), 2);
    assert_eq!(merged.element(0).unwrap().indices(), &[0, 1, 4, 3]);
    assert_eq!(merged.element(1).unwrap().indices(), &[0, 3, 4]);
}

#[test]
fn merge_never_drops_referenced_vertices() {
    let cases: [&[u32]; 3] = [
        &[0, 0, 1, 1, 2, 5],
        &[0, 1, 3, 1, 4, 3, 0, 3, 4],
        &[0, 1, 3, 1, 4, 3, 1, 2, 4, 2, 5, 4],
    ];
    for indices in cases {
        let source = Geometry::triangles(grid(), indices.to_vec()).unwrap();
        let merged = merge_coplanar(&source, tol());
        assert_eq!(merged.used_vertices(), source.used_vertices(), "{indices:?}");
        // every source triangle survives: 3 indices per group plus 1 per member
        assert_eq!(
            merged.index_buffer().len(),
            source.face_count() + 2 * merged.face_count()
        );
    }
}
