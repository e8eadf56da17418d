//! Interior shell generation.
//!
//! The interior shell is the isosurface of the input mesh's signed-distance
//! field offset inward by the wall thickness. Everything between the
//! original surface and that shell becomes the printed wall.

use std::time::Instant;

use tracing::{debug, info};

use hollow_mesh::Mesh;

use crate::error::HollowResult;
use crate::volume::{grid_to_contour, mesh_to_grid, redistance_grid};

/// Cheapest oversampling factor (quality 0).
pub const MIN_OVERSAMPLE: f64 = 3.0;
/// Most detailed oversampling factor (quality 1).
pub const MAX_OVERSAMPLE: f64 = 8.0;

/// Exterior band width as a fraction of the inward offset. The outside of
/// the field only has to cover rounding margin.
const EXTERIOR_BAND_RATIO: f64 = 0.1;
/// Interior band width as a fraction of offset plus closing distance. The
/// band must contain the full inward cut with a 10% safety margin.
const INTERIOR_BAND_RATIO: f64 = 1.1;

/// Oversampling factor for a quality setting.
///
/// The volume engine fixes the voxel size at one unit regardless of the
/// geometry's physical scale, so effective resolution is bought by
/// uniformly upscaling the geometry before conversion and scaling the shell
/// back down afterward. Quality 0 gives the cheapest 3x oversampling,
/// quality 1 the most detailed 8x.
pub fn oversampling_scale(quality: f64) -> f64 {
    MIN_OVERSAMPLE + (MAX_OVERSAMPLE - MIN_OVERSAMPLE) * quality.clamp(0.0, 1.0)
}

/// Statistics from interior shell generation.
#[derive(Debug, Clone)]
pub struct InteriorStats {
    /// Oversampling factor applied before volume conversion.
    pub voxel_scale: f64,
    /// Grid dimensions [x, y, z] of the forward conversion.
    pub grid_dims: [usize; 3],
    /// Total number of voxels in the forward conversion.
    pub total_voxels: usize,
    /// Time spent building the SDF volume (ms).
    pub sdf_time_ms: u64,
    /// Time spent on morphological closing (ms), 0 when closing is off.
    pub closing_time_ms: u64,
    /// Time spent extracting the shell isosurface (ms).
    pub extraction_time_ms: u64,
    /// Number of points in the shell mesh.
    pub shell_points: usize,
    /// Number of faces in the shell mesh.
    pub shell_faces: usize,
}

/// Result of interior shell generation.
#[derive(Debug)]
pub struct InteriorResult {
    /// The interior shell surface, back in model units, not yet merged.
    pub shell: Mesh,
    /// Statistics about the operation.
    pub stats: InteriorStats,
}

/// Generate the interior shell surface for a mesh.
///
/// `min_thickness` is the finished wall thickness in mm, `closing_distance`
/// seals cavity features narrower than itself (0 disables closing), and
/// `quality` in `[0, 1]` trades resolution for cost.
///
/// The returned shell may be empty when the part is too small to hollow at
/// the requested thickness; callers must check [`Mesh::is_empty`].
///
/// # Errors
///
/// Returns `EmptyMesh` for an input without points and `GridTooLarge` when
/// the oversampled grid would exceed the voxel limit.
pub fn generate_interior(
    mesh: &Mesh,
    min_thickness: f64,
    closing_distance: f64,
    quality: f64,
) -> HollowResult<InteriorResult> {
    let total_start = Instant::now();

    let voxel_scale = oversampling_scale(quality);
    let offset = voxel_scale * min_thickness;
    let mut d = voxel_scale * closing_distance;

    info!(
        min_thickness,
        closing_distance, quality, voxel_scale, "Generating interior shell"
    );

    // Oversample the geometry; the shell is scaled back down at the end.
    let mut scaled = mesh.clone();
    scaled.scale(voxel_scale);

    let exterior_band = EXTERIOR_BAND_RATIO * offset;
    let interior_band = INTERIOR_BAND_RATIO * (offset + d);

    let sdf_start = Instant::now();
    let mut volume = mesh_to_grid(&scaled, exterior_band, interior_band)?;
    let sdf_time_ms = sdf_start.elapsed().as_millis() as u64;
    let grid_dims = volume.dims;
    let total_voxels = volume.total_voxels();

    debug!(sdf_time_ms, "Forward conversion complete");

    let closing_time_ms = if closing_distance > 0.0 {
        // Erode to offset + D, then extracting at +D below dilates back by
        // D: a morphological closing that seals gaps and cracks narrower
        // than the closing distance before the shell surface is cut.
        let closing_start = Instant::now();
        volume = redistance_grid(&volume, -(offset + d), interior_band, interior_band)?;
        let elapsed = closing_start.elapsed().as_millis() as u64;
        debug!(closing_time_ms = elapsed, "Morphological closing complete");
        elapsed
    } else {
        // No closing: cut directly at the inward offset.
        d = -offset;
        0
    };

    let extract_start = Instant::now();
    let mut shell = grid_to_contour(&volume, d, 0.0, true);
    let extraction_time_ms = extract_start.elapsed().as_millis() as u64;

    // Back to model units.
    shell.scale(1.0 / voxel_scale);

    let stats = InteriorStats {
        voxel_scale,
        grid_dims,
        total_voxels,
        sdf_time_ms,
        closing_time_ms,
        extraction_time_ms,
        shell_points: shell.point_count(),
        shell_faces: shell.face_count(),
    };

    info!(
        total_time_ms = total_start.elapsed().as_millis() as u64,
        shell_points = stats.shell_points,
        shell_faces = stats.shell_faces,
        "Interior shell generation complete"
    );

    Ok(InteriorResult { shell, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

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

    #[test]
    fn test_oversampling_scale() {
        assert_eq!(oversampling_scale(0.0), 3.0);
        assert_eq!(oversampling_scale(1.0), 8.0);
        assert_eq!(oversampling_scale(0.5), 5.5);
        // Out-of-range quality is clamped.
        assert_eq!(oversampling_scale(-1.0), 3.0);
        assert_eq!(oversampling_scale(2.0), 8.0);
    }

    #[test]
    fn test_cube_shell_inside_walls() {
        let mesh = tri_cube(10.0);
        let result = generate_interior(&mesh, 1.0, 0.0, 0.5).unwrap();

        assert!(!result.shell.is_empty());
        assert_eq!(result.stats.closing_time_ms, 0);

        // A 10mm cube hollowed with 1mm walls leaves an ~8mm cavity; every
        // shell point must sit near 4mm from center, none outside the part.
        let (min, max) = result.shell.bounds().unwrap();
        for v in [min.x, min.y, min.z] {
            assert!(v > -4.6 && v < -3.4, "shell bound {v} out of range");
        }
        for v in [max.x, max.y, max.z] {
            assert!(v > 3.4 && v < 4.6, "shell bound {v} out of range");
        }

        // Cavity volume close to the 8mm cube, corners rounded off.
        let cavity = result.shell.volume();
        assert!(cavity > 350.0 && cavity < 600.0, "cavity volume: {cavity}");
    }

    #[test]
    fn test_too_thick_yields_empty_shell() {
        let mesh = tri_cube(10.0);
        // 6mm walls on a 10mm part leave no interior at all.
        let result = generate_interior(&mesh, 6.0, 0.0, 0.5).unwrap();
        assert!(result.shell.is_empty());
        assert_eq!(result.stats.shell_points, 0);
        assert_eq!(result.stats.shell_faces, 0);
    }

    #[test]
    fn test_closing_never_grows_cavity() {
        let mesh = tri_cube(10.0);

        let direct = generate_interior(&mesh, 1.0, 0.0, 0.5).unwrap();
        let closed = generate_interior(&mesh, 1.0, 0.5, 0.5).unwrap();

        assert!(!closed.shell.is_empty());

        // Closing is an erode-then-dilate of the cavity; it can only seal
        // narrow features, never add volume beyond discretization noise.
        let direct_volume = direct.shell.volume();
        let closed_volume = closed.shell.volume();
        assert!(closed_volume > 0.0);
        assert!(
            closed_volume <= direct_volume * 1.05,
            "closing grew the cavity: {closed_volume} > {direct_volume}"
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(generate_interior(&Mesh::new(), 1.0, 0.0, 0.5).is_err());
    }

    #[test]
    fn test_quality_controls_resolution() {
        let mesh = tri_cube(10.0);

        let coarse = generate_interior(&mesh, 1.0, 0.0, 0.0).unwrap();
        let fine = generate_interior(&mesh, 1.0, 0.0, 1.0).unwrap();

        assert!(fine.stats.total_voxels > coarse.stats.total_voxels);
        assert!(fine.stats.shell_points > coarse.stats.shell_points);
    }
}
