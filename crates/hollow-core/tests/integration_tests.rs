//! End-to-end integration tests for the hollowing pipeline.
//!
//! These tests exercise the full pipeline from load -> hollow -> save and
//! check the geometric contracts on real voxel grids: wall placement,
//! cavity orientation, emptiness propagation and morphological closing.

use std::collections::HashMap;
use std::path::Path;

use approx::assert_relative_eq;
use nalgebra::Point3;

use hollow_core::volume::{Volume, grid_to_contour};
use hollow_core::{HollowConfig, hollow, hollow_mesh, hollow_with_artifacts};
use hollow_mesh::{Mesh, save_mesh};

/// Create a triangulated cube of the given side, centered on the origin,
/// wound CCW viewed from outside.
fn tri_cube(side: f64) -> Mesh {
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

/// Create a 20mm cube with a 1mm-wide slot cut 8mm deep into the top face.
///
/// The fixture is produced by sampling the boolean difference of two box
/// fields on a unit grid and contouring it, which guarantees a watertight
/// triangulation without hand-authoring the slot walls.
fn slit_cube() -> Mesh {
    // Sign-correct box field (exact on faces, conservative on edges).
    fn box_field(p: [f64; 3], half: [f64; 3]) -> f64 {
        let dx = p[0].abs() - half[0];
        let dy = p[1].abs() - half[1];
        let dz = p[2].abs() - half[2];
        dx.max(dy).max(dz)
    }

    let dims = [27, 27, 27];
    let origin = Point3::new(-13.0, -13.0, -13.0);
    let mut values = vec![0.0f32; dims[0] * dims[1] * dims[2]];
    for z in 0..dims[2] {
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                let p = [
                    origin.x + x as f64,
                    origin.y + y as f64,
                    origin.z + z as f64,
                ];
                let cube = box_field(p, [10.0, 10.0, 10.0]);
                // Slot: 1mm wide in x, 8mm of slit span in y, cutting from
                // z = 2 out through the top face.
                let slot = box_field([p[0], p[1], p[2] - 12.0], [0.5, 4.0, 10.0]);
                let solid = cube.max(-slot);
                values[x + y * dims[0] + z * dims[0] * dims[1]] = solid as f32;
            }
        }
    }

    let volume = Volume {
        dims,
        origin,
        values,
    };
    let mesh = grid_to_contour(&volume, 0.0, 0.0, true);
    assert!(!mesh.is_empty(), "slit cube fixture must extract");
    mesh
}

/// Every undirected edge of a closed triangle mesh is shared by exactly two
/// faces.
fn is_watertight(mesh: &Mesh) -> bool {
    assert!(mesh.quads.is_empty());
    let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
    for tri in &mesh.triangles {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = (a.min(b), a.max(b));
            *edges.entry(key).or_insert(0) += 1;
        }
    }
    edges.values().all(|&count| count == 2)
}

// =============================================================================
// End-to-end: cube with 1mm walls
// =============================================================================

#[test]
fn test_hollowed_cube_end_to_end() {
    let mesh = tri_cube(10.0);
    let config = HollowConfig::default()
        .with_min_thickness(1.0)
        .with_quality(0.5)
        .with_closing_distance(0.0);

    let result = hollow_mesh(&mesh, &config).unwrap();
    assert!(result.stats.shell_generated);

    // Original surface first: 8 points, 12 triangles, untouched.
    assert_eq!(&result.mesh.points[..8], &mesh.points[..]);
    assert_eq!(&result.mesh.triangles[..12], &mesh.triangles[..]);

    // The inner component sits ~1mm inside each face.
    let shell = result.shell.as_ref().unwrap();
    let (min, max) = shell.bounds().unwrap();
    for v in [min.x, min.y, min.z] {
        assert!(v > -4.6 && v < -3.4, "shell bound {v}");
    }
    for v in [max.x, max.y, max.z] {
        assert!(v > 3.4 && v < 4.6, "shell bound {v}");
    }

    // Merged bounding box centered on the origin.
    let (min, max) = result.mesh.bounds().unwrap();
    let center = nalgebra::center(&min, &max);
    assert!(center.coords.norm() < 1e-6);

    // The shell is a second closed component facing the cavity.
    assert!(is_watertight(shell));
    assert!(shell.volume() < 0.0);
    let merged = result.mesh.volume();
    assert!(merged > 0.0 && merged < mesh.volume());
}

// =============================================================================
// Emptiness propagation and disabled config
// =============================================================================

#[test]
fn test_wall_thicker_than_part_leaves_mesh_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    let output = dir.path().join("part_hollowed.stl");
    save_mesh(&tri_cube(10.0), &input).unwrap();

    let config = HollowConfig::default()
        .with_min_thickness(6.0)
        .with_closing_distance(0.0);
    let stats = hollow_with_artifacts(&input, &output, &config, None).unwrap();
    assert!(stats.enabled);
    assert!(!stats.shell_generated);

    let saved = Mesh::load(&output).unwrap();
    assert_eq!(saved.point_count(), 8);
    assert_eq!(saved.face_count(), 12);
    assert_relative_eq!(saved.volume(), 1000.0, max_relative = 1e-12);
}

#[test]
fn test_disabled_config_writes_identical_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    let output = dir.path().join("part_hollowed.stl");
    let config_path = dir.path().join("hollowing.json");
    save_mesh(&tri_cube(10.0), &input).unwrap();
    std::fs::write(&config_path, r#"{"enabled": false}"#).unwrap();

    let stats = hollow(&input, Some(config_path.as_path()), &output).unwrap();
    assert!(!stats.enabled);
    assert!(!stats.shell_generated);
    assert_eq!(stats.output_points, stats.input_points);
    assert_eq!(stats.output_faces, stats.input_faces);

    // Integer cube coordinates survive the f32 round-trip bit-exactly.
    let original = Mesh::load(&input).unwrap();
    let saved = Mesh::load(&output).unwrap();
    assert_eq!(saved, original);
}

// =============================================================================
// Artifacts
// =============================================================================

#[test]
fn test_artifacts_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    let output = dir.path().join("part_hollowed.stl");
    let artifacts = dir.path().join("artifacts");
    save_mesh(&tri_cube(10.0), &input).unwrap();

    let config = HollowConfig::default()
        .with_min_thickness(1.0)
        .with_closing_distance(0.0);
    let stats =
        hollow_with_artifacts(&input, &output, &config, Some(artifacts.as_path())).unwrap();
    assert!(stats.shell_generated);

    let pre = Mesh::load(&artifacts.join(hollow_core::ARTIFACT_INPUT)).unwrap();
    assert_eq!(pre.point_count(), 8);
    assert_eq!(pre.face_count(), 12);

    // The persisted shell is the flipped cavity boundary.
    let shell = Mesh::load(&artifacts.join(hollow_core::ARTIFACT_SHELL)).unwrap();
    assert!(!shell.is_empty());
    assert!(shell.volume() < 0.0);
    assert_eq!(shell.face_count(), stats.shell_faces);

    let merged = Mesh::load(&output).unwrap();
    assert_eq!(merged.face_count(), 12 + stats.shell_faces);
}

// =============================================================================
// Morphological closing
// =============================================================================

#[test]
fn test_closing_shrinks_cavity_on_slit_cube() {
    let mesh = slit_cube();

    let direct = hollow_mesh(
        &mesh,
        &HollowConfig::default()
            .with_min_thickness(2.0)
            .with_closing_distance(0.0),
    )
    .unwrap();
    let closed = hollow_mesh(
        &mesh,
        &HollowConfig::default()
            .with_min_thickness(2.0)
            .with_closing_distance(0.5),
    )
    .unwrap();

    let direct_shell = direct.shell.as_ref().expect("direct cavity");
    let closed_shell = closed.shell.as_ref().expect("closed cavity");

    // Flipped shells measure negative; compare cavity magnitudes. Closing
    // erodes then dilates the cavity, so it can only shrink it.
    let direct_cavity = -direct_shell.volume();
    let closed_cavity = -closed_shell.volume();
    assert!(direct_cavity > 0.0);
    assert!(closed_cavity > 0.0);
    assert!(
        closed_cavity <= direct_cavity * 1.05,
        "closing grew the cavity: {closed_cavity} vs {direct_cavity}"
    );

    // The closed cavity stays within the direct cavity's bounds.
    let (dmin, dmax) = direct_shell.bounds().unwrap();
    let (cmin, cmax) = closed_shell.bounds().unwrap();
    for axis in 0..3 {
        assert!(cmin[axis] >= dmin[axis] - 0.5);
        assert!(cmax[axis] <= dmax[axis] + 0.5);
    }
}

#[test]
fn test_closed_slit_cube_shell_is_watertight() {
    let mesh = slit_cube();
    let config = HollowConfig::default()
        .with_min_thickness(2.0)
        .with_closing_distance(0.5);

    let result = hollow_mesh(&mesh, &config).unwrap();
    let shell = result.shell.as_ref().expect("closed cavity");
    assert!(is_watertight(shell));
}

// =============================================================================
// Config file flow
// =============================================================================

#[test]
fn test_hollow_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    let output = dir.path().join("part_hollowed.stl");
    let config_path = dir.path().join("hollowing.json");
    save_mesh(&tri_cube(10.0), &input).unwrap();
    std::fs::write(
        &config_path,
        r#"{"min_thickness": 1.0, "quality": 0.25, "closing_distance": 0.0}"#,
    )
    .unwrap();

    let stats = hollow(&input, Some(config_path.as_path()), &output).unwrap();
    assert!(stats.shell_generated);
    assert_relative_eq!(stats.voxel_scale, 4.25);
    assert!(output.exists());
}

#[test]
fn test_hollow_rejects_invalid_config_before_touching_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("part.stl");
    let output = dir.path().join("part_hollowed.stl");
    let config_path = dir.path().join("hollowing.json");
    save_mesh(&tri_cube(10.0), &input).unwrap();
    std::fs::write(&config_path, r#"{"min_thickness": -1.0}"#).unwrap();

    let err = hollow(&input, Some(config_path.as_path()), &output).unwrap_err();
    assert_eq!(err.code().as_str(), "HOLLOW-1001");
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.stl");
    let err = hollow(Path::new("/nonexistent/part.stl"), None, &output).unwrap_err();
    assert_eq!(err.code().as_str(), "HOLLOW-3001");
}
