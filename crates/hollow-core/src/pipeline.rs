//! Hollowing orchestration.
//!
//! Ties the stages together: load, generate the interior shell, flip and
//! triangulate it, merge it into the original surface, recenter, save.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use hollow_mesh::{Mesh, MeshError, MeshFormat, load_mesh, save_mesh};

use crate::config::HollowConfig;
use crate::error::HollowResult;
use crate::interior::generate_interior;

/// Pre-hollow copy of the input, written when an artifact directory is given.
pub const ARTIFACT_INPUT: &str = "input_mesh_to_be_hollowed.stl";
/// Standalone interior shell, written when an artifact directory is given.
pub const ARTIFACT_SHELL: &str = "interior_shell.stl";

/// Statistics from one hollowing run.
#[derive(Debug, Clone, Serialize)]
pub struct HollowStats {
    /// Whether hollowing was enabled at all.
    pub enabled: bool,
    /// Whether a non-empty interior shell was generated and merged.
    pub shell_generated: bool,
    /// Input mesh point count.
    pub input_points: usize,
    /// Input mesh face count.
    pub input_faces: usize,
    /// Interior shell point count (0 when no shell was merged).
    pub shell_points: usize,
    /// Interior shell face count after triangulation.
    pub shell_faces: usize,
    /// Output mesh point count.
    pub output_points: usize,
    /// Output mesh face count.
    pub output_faces: usize,
    /// Oversampling factor used for volume conversion.
    pub voxel_scale: f64,
    /// Voxel grid dimensions of the forward conversion.
    pub grid_dims: [usize; 3],
    /// Time building the SDF volume (ms).
    pub sdf_time_ms: u64,
    /// Time spent on morphological closing (ms).
    pub closing_time_ms: u64,
    /// Time extracting the shell isosurface (ms).
    pub extraction_time_ms: u64,
    /// Wall-clock time for the whole pipeline (ms).
    pub total_time_ms: u64,
}

/// Result of an in-memory hollowing run.
#[derive(Debug)]
pub struct HollowOutput {
    /// The final mesh: original surface plus merged interior shell,
    /// recentered on its bounding-box center.
    pub mesh: Mesh,
    /// The standalone shell (flipped and triangulated, in the input's
    /// coordinate frame) when one was generated.
    pub shell: Option<Mesh>,
    /// Statistics about the run.
    pub stats: HollowStats,
}

/// Hollow a mesh in memory.
///
/// With `enabled == false` the input passes through unchanged. When the part
/// is too small for the requested wall thickness the interior comes back
/// empty; the input then also passes through unchanged, flagged via
/// [`HollowStats::shell_generated`]. Otherwise the shell's normals are
/// flipped to face the cavity, its quads are triangulated, it is merged into
/// the original surface and the merged mesh is recentered on its
/// bounding-box center.
///
/// # Errors
///
/// Propagates volume conversion errors from the interior stage; an empty
/// shell is not an error.
pub fn hollow_mesh(mesh: &Mesh, config: &HollowConfig) -> HollowResult<HollowOutput> {
    let total_start = Instant::now();

    let input_points = mesh.point_count();
    let input_faces = mesh.face_count();

    let passthrough_stats = |total_start: Instant| HollowStats {
        enabled: config.enabled,
        shell_generated: false,
        input_points,
        input_faces,
        shell_points: 0,
        shell_faces: 0,
        output_points: input_points,
        output_faces: input_faces,
        voxel_scale: 0.0,
        grid_dims: [0, 0, 0],
        sdf_time_ms: 0,
        closing_time_ms: 0,
        extraction_time_ms: 0,
        total_time_ms: total_start.elapsed().as_millis() as u64,
    };

    if !config.enabled {
        info!("Hollowing disabled, passing mesh through unchanged");
        return Ok(HollowOutput {
            mesh: mesh.clone(),
            shell: None,
            stats: passthrough_stats(total_start),
        });
    }

    let interior = generate_interior(
        mesh,
        config.min_thickness,
        config.closing_distance,
        config.quality,
    )?;
    let istats = interior.stats;
    let mut shell = interior.shell;

    if shell.is_empty() {
        warn!(
            min_thickness = config.min_thickness,
            "Interior shell is empty, leaving mesh unhollowed"
        );
        let mut stats = passthrough_stats(total_start);
        stats.voxel_scale = istats.voxel_scale;
        stats.grid_dims = istats.grid_dims;
        stats.sdf_time_ms = istats.sdf_time_ms;
        stats.closing_time_ms = istats.closing_time_ms;
        stats.extraction_time_ms = istats.extraction_time_ms;
        return Ok(HollowOutput {
            mesh: mesh.clone(),
            shell: None,
            stats,
        });
    }

    // The extractor winds cavity faces toward the wall material; an inner
    // boundary must face the cavity, so flip before merging.
    shell.flip_normals();
    shell.triangulate_quads();

    let shell_points = shell.point_count();
    let shell_faces = shell.face_count();

    let mut output = mesh.clone();
    output.merge(&shell);
    let shift = output.recenter();
    debug!(shift = ?shift, "Recentered merged mesh");

    let stats = HollowStats {
        enabled: true,
        shell_generated: true,
        input_points,
        input_faces,
        shell_points,
        shell_faces,
        output_points: output.point_count(),
        output_faces: output.face_count(),
        voxel_scale: istats.voxel_scale,
        grid_dims: istats.grid_dims,
        sdf_time_ms: istats.sdf_time_ms,
        closing_time_ms: istats.closing_time_ms,
        extraction_time_ms: istats.extraction_time_ms,
        total_time_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        total_time_ms = stats.total_time_ms,
        output_points = stats.output_points,
        output_faces = stats.output_faces,
        "Hollowing complete"
    );

    Ok(HollowOutput {
        mesh: output,
        shell: Some(shell),
        stats,
    })
}

/// Hollow a mesh file, writing inspection artifacts along the way.
///
/// When `artifact_dir` is given, the pre-hollow input copy and the
/// standalone interior shell are persisted there as [`ARTIFACT_INPUT`] and
/// [`ARTIFACT_SHELL`] for inspection.
///
/// # Errors
///
/// Returns mesh IO errors for unreadable input or unwritable output and
/// propagates pipeline errors from [`hollow_mesh`].
pub fn hollow_with_artifacts(
    input: &Path,
    output: &Path,
    config: &HollowConfig,
    artifact_dir: Option<&Path>,
) -> HollowResult<HollowStats> {
    info!(
        input = %input.display(),
        output = %output.display(),
        "Hollowing mesh file"
    );

    let mesh = load_mesh(input)?;

    if let Some(dir) = artifact_dir {
        std::fs::create_dir_all(dir).map_err(|e| MeshError::io_write(dir, e))?;
        let mut copy = mesh.clone();
        copy.triangulate_quads();
        save_mesh(&copy, &dir.join(ARTIFACT_INPUT))?;
        debug!(dir = %dir.display(), "Saved pre-hollow input artifact");
    }

    let result = hollow_mesh(&mesh, config)?;

    if let (Some(dir), Some(shell)) = (artifact_dir, &result.shell) {
        save_mesh(shell, &dir.join(ARTIFACT_SHELL))?;
        debug!(dir = %dir.display(), "Saved interior shell artifact");
    }

    let mut final_mesh = result.mesh;
    if MeshFormat::from_path(output) == Some(MeshFormat::Stl) && !final_mesh.quads.is_empty() {
        debug!("Triangulating quads for STL output");
        final_mesh.triangulate_quads();
    }
    save_mesh(&final_mesh, output)?;

    Ok(result.stats)
}

/// Hollow a mesh file with the config at `config_path` (defaults when
/// `None`), without artifacts.
///
/// # Errors
///
/// As [`hollow_with_artifacts`], plus config read/parse/validation errors.
pub fn hollow(input: &Path, config_path: Option<&Path>, output: &Path) -> HollowResult<HollowStats> {
    let config = match config_path {
        Some(path) => HollowConfig::load(path)?,
        None => HollowConfig::default(),
    };
    hollow_with_artifacts(input, output, &config, None)
}
