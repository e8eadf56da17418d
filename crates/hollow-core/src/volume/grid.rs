//! Signed-distance volume construction and redistancing.

use nalgebra::Point3;
use tracing::{debug, info};

use hollow_mesh::Mesh;

use crate::error::{HollowError, HollowResult};

use super::extract::grid_to_contour;
use super::soup::SoupView;

/// Maximum number of voxels in one volume (memory safety).
pub const MAX_VOXELS: usize = 50_000_000;

/// Signed-distance field over a regular voxel grid with unit voxel spacing.
///
/// The engine fixes the voxel size at one unit, so resolution is controlled
/// by scaling the geometry before conversion, not by shrinking the voxel.
/// Sample `(x, y, z)` sits at world position `origin + (x, y, z)`; values
/// are stored x-fastest (`x + y * dims[0] + z * dims[0] * dims[1]`) and are
/// negative inside the surface.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Grid dimensions [x, y, z].
    pub dims: [usize; 3],
    /// World position of sample (0, 0, 0).
    pub origin: Point3<f64>,
    /// Signed distances, clamped to the band widths used at build time.
    pub values: Vec<f32>,
}

impl Volume {
    /// Total number of voxels in the grid.
    #[inline]
    pub fn total_voxels(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Convert 3D grid coordinates to linear index.
    #[inline]
    pub fn linearize(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dims[0] + z * self.dims[0] * self.dims[1]
    }

    /// Signed distance at grid coordinates.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[self.linearize(x, y, z)]
    }
}

/// Build a narrow-band signed-distance volume around a mesh surface.
///
/// `exterior_band` and `interior_band` set how many voxel-widths of valid
/// distance are kept outside and inside the surface; values beyond a band
/// are clamped to it. The grid covers the mesh bounds plus the exterior
/// band plus one voxel of rounding margin, so the outermost samples are
/// always on the positive side.
///
/// # Errors
///
/// Returns `EmptyMesh` if the mesh has no points and `GridTooLarge` if the
/// grid would exceed [`MAX_VOXELS`].
pub fn mesh_to_grid(mesh: &Mesh, exterior_band: f64, interior_band: f64) -> HollowResult<Volume> {
    use mesh_to_sdf::{Grid, SignMethod, Topology, generate_grid_sdf};

    let (min, max) = mesh.bounds().ok_or(HollowError::EmptyMesh)?;

    let margin = exterior_band + 1.0;
    let origin = Point3::new(
        (min.x - margin).floor(),
        (min.y - margin).floor(),
        (min.z - margin).floor(),
    );
    let dims = [
        (((max.x + margin - origin.x).ceil() as usize) + 1).max(2),
        (((max.y + margin - origin.y).ceil() as usize) + 1).max(2),
        (((max.z + margin - origin.z).ceil() as usize) + 1).max(2),
    ];

    let total_voxels = dims[0] * dims[1] * dims[2];
    if total_voxels > MAX_VOXELS {
        return Err(HollowError::grid_too_large(dims, MAX_VOXELS));
    }

    let soup = SoupView::new(mesh);
    info!(
        dims = ?dims,
        total = total_voxels,
        polygons = soup.polygon_count(),
        points = soup.point_count(),
        "Building SDF volume"
    );

    let vertices = soup.points_f32();
    let indices = soup.triangle_indices();

    // The box spans dims units per axis, so the cell size comes out at
    // exactly one unit and sample i of each axis sits at origin + i.
    let grid = Grid::from_bounding_box(
        &[origin.x as f32, origin.y as f32, origin.z as f32],
        &[
            (origin.x + dims[0] as f64) as f32,
            (origin.y + dims[1] as f64) as f32,
            (origin.z + dims[2] as f64) as f32,
        ],
        dims,
    );

    let sdf = generate_grid_sdf(
        &vertices,
        Topology::TriangleList(Some(&indices)),
        &grid,
        SignMethod::Raycast,
    );

    // mesh_to_sdf lays its output out z-fastest; transpose to x-fastest and
    // clamp to the requested bands in one pass.
    let mut values = vec![0.0f32; total_voxels];
    let lo = -interior_band as f32;
    let hi = exterior_band as f32;
    for x in 0..dims[0] {
        for y in 0..dims[1] {
            for z in 0..dims[2] {
                let src = z + y * dims[2] + x * dims[1] * dims[2];
                let dst = x + y * dims[0] + z * dims[0] * dims[1];
                values[dst] = sdf[src].clamp(lo, hi);
            }
        }
    }

    let volume = Volume {
        dims,
        origin,
        values,
    };

    debug!(
        min_sdf = volume.values.iter().copied().fold(f32::INFINITY, f32::min),
        max_sdf = volume
            .values
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max),
        "SDF volume built"
    );

    Ok(volume)
}

/// Recompute a correct signed-distance field whose zero level set is the
/// input field's surface at `target_isovalue`.
///
/// This is what gives morphological closing its effect: the level set at
/// `target_isovalue` is extracted and a fresh field is rebuilt around it, so
/// gaps narrower than the offset get sealed over instead of leaking through
/// a naive per-voxel threshold.
///
/// If the input field has no level set at `target_isovalue` the result is a
/// uniformly positive field, so downstream extraction yields an empty mesh.
///
/// # Errors
///
/// Returns `GridTooLarge` if the rebuilt grid would exceed [`MAX_VOXELS`].
pub fn redistance_grid(
    volume: &Volume,
    target_isovalue: f64,
    exterior_range: f64,
    interior_range: f64,
) -> HollowResult<Volume> {
    info!(
        target_isovalue,
        exterior_range, interior_range, "Redistancing SDF volume"
    );

    let surface = grid_to_contour(volume, target_isovalue, 0.0, true);
    if surface.is_empty() {
        debug!("No level set at target isovalue, returning surface-free field");
        return Ok(Volume {
            dims: volume.dims,
            origin: volume.origin,
            values: vec![exterior_range.max(1.0) as f32; volume.values.len()],
        });
    }

    mesh_to_grid(&surface, exterior_range, interior_range)
}
