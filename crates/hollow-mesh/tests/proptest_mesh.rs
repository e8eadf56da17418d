//! Property-based tests for the mesh container.
//!
//! These use proptest to generate random meshes (triangles and quads with
//! valid indices) and verify the container invariants.

use hollow_mesh::Mesh;
use nalgebra::Point3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Random point in a bounded range.
fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Mesh with valid face indices, mixing triangles and quads.
fn arb_mesh(
    max_points: usize,
    max_triangles: usize,
    max_quads: usize,
) -> impl Strategy<Value = Mesh> {
    (4..=max_points).prop_flat_map(move |num_points| {
        let points = prop::collection::vec(arb_point(), num_points);

        points.prop_flat_map(move |pts| {
            let n = pts.len() as u32;
            let triangle = prop::array::uniform3(0..n);
            let quad = prop::array::uniform4(0..n);
            let triangles = prop::collection::vec(triangle, 0..=max_triangles);
            let quads = prop::collection::vec(quad, 0..=max_quads);

            (triangles, quads).prop_map(move |(tris, qs)| Mesh {
                points: pts.clone(),
                triangles: tris,
                quads: qs,
            })
        })
    })
}

/// Cube centered at the origin, 12 triangles.
fn cube_mesh(side: f64) -> Mesh {
    let h = side / 2.0;
    let points = [
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, h, -h),
        Point3::new(-h, h, -h),
        Point3::new(-h, -h, h),
        Point3::new(h, -h, h),
        Point3::new(h, h, h),
        Point3::new(-h, h, h),
    ];
    let triangles = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [0, 7, 3],
        [0, 4, 7],
        [1, 2, 6],
        [1, 6, 5],
    ];
    Mesh::from_parts(&points, &triangles, &[])
}

// =============================================================================
// Property tests: transforms
// =============================================================================

proptest! {
    /// scale(f) then scale(1/f) reproduces coordinates within tolerance.
    #[test]
    fn proptest_scale_roundtrip(
        mesh in arb_mesh(40, 20, 10),
        factor in 0.05..20.0f64
    ) {
        let original = mesh.clone();
        let mut m = mesh;
        m.scale(factor);
        m.scale(1.0 / factor);

        for (p, q) in m.points.iter().zip(original.points.iter()) {
            let err = (p - q).norm();
            let bound = 1e-9 + 1e-5 * q.coords.norm();
            prop_assert!(err <= bound, "scale roundtrip drift {} exceeds {}", err, bound);
        }
    }

    /// Recentering is idempotent: a second application moves nothing.
    #[test]
    fn proptest_recenter_idempotent(mesh in arb_mesh(40, 20, 10)) {
        let mut m = mesh;
        m.recenter();
        let second = m.recenter();
        prop_assert!(second.norm() < 1e-9, "second recenter moved by {}", second.norm());
    }

    /// Flipping winding twice restores the exact face lists.
    #[test]
    fn proptest_flip_involution(mesh in arb_mesh(40, 20, 10)) {
        let original = mesh.clone();
        let mut m = mesh;
        m.flip_normals();
        m.flip_normals();
        prop_assert_eq!(m, original);
    }

    /// Bounding box contains every point.
    #[test]
    fn proptest_bounds_contain_points(mesh in arb_mesh(60, 20, 10)) {
        if let Some((min, max)) = mesh.bounds() {
            for p in &mesh.points {
                prop_assert!(p.x >= min.x && p.x <= max.x);
                prop_assert!(p.y >= min.y && p.y <= max.y);
                prop_assert!(p.z >= min.z && p.z <= max.z);
            }
        }
    }

    /// Signed volume is always finite, whatever the face soup looks like.
    #[test]
    fn proptest_volume_finite(mesh in arb_mesh(40, 20, 10)) {
        prop_assert!(mesh.volume().is_finite());
    }
}

// =============================================================================
// Property tests: merge
// =============================================================================

proptest! {
    /// After a.merge(b): appended faces are shifted by exactly the pre-merge
    /// point count, existing faces are untouched, and every index is valid.
    #[test]
    fn proptest_merge_rebases_and_stays_valid(
        a in arb_mesh(30, 15, 8),
        b in arb_mesh(30, 15, 8)
    ) {
        let offset = a.point_count() as u32;
        let a_tris = a.triangles.clone();
        let a_quads = a.quads.clone();

        let mut merged = a;
        merged.merge(&b);

        prop_assert_eq!(merged.point_count(), offset as usize + b.point_count());
        prop_assert_eq!(&merged.triangles[..a_tris.len()], &a_tris[..]);
        prop_assert_eq!(&merged.quads[..a_quads.len()], &a_quads[..]);

        for (m, o) in merged.triangles[a_tris.len()..].iter().zip(b.triangles.iter()) {
            for k in 0..3 {
                prop_assert_eq!(m[k], o[k] + offset);
            }
        }
        for (m, o) in merged.quads[a_quads.len()..].iter().zip(b.quads.iter()) {
            for k in 0..4 {
                prop_assert_eq!(m[k], o[k] + offset);
            }
        }

        let n = merged.point_count() as u32;
        prop_assert!(merged.triangles.iter().all(|t| t.iter().all(|&i| i < n)));
        prop_assert!(merged.quads.iter().all(|q| q.iter().all(|&i| i < n)));
    }
}

// =============================================================================
// Property tests: triangulation
// =============================================================================

proptest! {
    /// Quad conversion yields t + 2q triangles, zero quads, same points.
    #[test]
    fn proptest_triangulate_conserves(mesh in arb_mesh(40, 20, 15)) {
        let t = mesh.triangles.len();
        let q = mesh.quads.len();
        let points = mesh.point_count();

        let mut m = mesh;
        m.triangulate_quads();

        prop_assert_eq!(m.triangles.len(), t + 2 * q);
        prop_assert_eq!(m.quads.len(), 0);
        prop_assert_eq!(m.point_count(), points);
    }

    /// The fan split preserves the winding of each quad's first corner.
    #[test]
    fn proptest_triangulate_fan_order(mesh in arb_mesh(40, 0, 15)) {
        let quads = mesh.quads.clone();
        let mut m = mesh;
        m.triangulate_quads();

        for (i, q) in quads.iter().enumerate() {
            prop_assert_eq!(m.triangles[2 * i], [q[0], q[1], q[2]]);
            prop_assert_eq!(m.triangles[2 * i + 1], [q[2], q[3], q[0]]);
        }
    }
}

// =============================================================================
// Fixed-geometry checks (known-good cube)
// =============================================================================

#[test]
fn proptest_cube_volume_and_area() {
    let cube = cube_mesh(10.0);
    assert!((cube.volume() - 1000.0).abs() < 1e-6);
    assert!((cube.surface_area() - 600.0).abs() < 1e-6);
}

#[test]
fn proptest_cube_merge_two_components() {
    let mut outer = cube_mesh(10.0);
    let mut inner = cube_mesh(6.0);
    inner.flip_normals();

    outer.merge(&inner);

    assert_eq!(outer.point_count(), 16);
    assert_eq!(outer.triangles.len(), 24);
    // Two nested components: enclosed volume is the wall between them
    assert!((outer.volume() - (1000.0 - 216.0)).abs() < 1e-6);
}

#[test]
fn proptest_empty_mesh_has_no_bounds() {
    let mesh = Mesh::new();
    assert!(mesh.bounds().is_none());
    assert!(mesh.is_empty());
    assert_eq!(mesh.volume(), 0.0);
}
