//! Isosurface extraction from a signed-distance volume.

use nalgebra::Point3;
use tracing::{debug, info, warn};

use hollow_mesh::Mesh;

use super::grid::Volume;

/// Extract the polygonal isosurface of a volume at `isovalue`.
///
/// The extractor produces an all-triangle contour wound so that face normals
/// point toward increasing signed distance. `adaptivity` asks for mesh
/// simplification; surface nets has none, so non-zero values log a warning
/// and extract at full resolution. `relax_disoriented` drops degenerate
/// triangles with repeated indices after extraction.
///
/// A volume with no level set at `isovalue` yields an empty mesh; callers
/// must check [`Mesh::is_empty`] before using the result.
pub fn grid_to_contour(
    volume: &Volume,
    isovalue: f64,
    adaptivity: f64,
    relax_disoriented: bool,
) -> Mesh {
    use fast_surface_nets::{SurfaceNetsBuffer, ndshape::RuntimeShape, surface_nets};

    if adaptivity != 0.0 {
        warn!(
            adaptivity,
            "adaptivity is not supported, extracting at full resolution"
        );
    }

    if volume.values.is_empty() {
        return Mesh::new();
    }

    info!(dims = ?volume.dims, isovalue, "Extracting isosurface");

    // Pad one layer on each side with a large positive value so a surface
    // touching the grid boundary still closes.
    let dims = volume.dims;
    let padded_dims = [dims[0] + 2, dims[1] + 2, dims[2] + 2];
    let padded_size = padded_dims[0] * padded_dims[1] * padded_dims[2];

    // Shift by the isovalue so the requested level set becomes the zero
    // crossing the extractor looks for.
    let mut padded_sdf = vec![1000.0f32; padded_size];
    let shift = isovalue as f32;
    for z in 0..dims[2] {
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                let src = x + y * dims[0] + z * dims[0] * dims[1];
                let dst = (x + 1)
                    + (y + 1) * padded_dims[0]
                    + (z + 1) * padded_dims[0] * padded_dims[1];
                padded_sdf[dst] = volume.values[src] - shift;
            }
        }
    }

    let shape = RuntimeShape::<u32, 3>::new([
        padded_dims[0] as u32,
        padded_dims[1] as u32,
        padded_dims[2] as u32,
    ]);

    let mut buffer = SurfaceNetsBuffer::default();
    surface_nets(
        &padded_sdf,
        &shape,
        [0, 0, 0],
        [
            padded_dims[0] as u32 - 1,
            padded_dims[1] as u32 - 1,
            padded_dims[2] as u32 - 1,
        ],
        &mut buffer,
    );

    if buffer.positions.is_empty() {
        debug!("No level set at isovalue, returning empty mesh");
        return Mesh::new();
    }

    let mut mesh = Mesh::new();

    // Positions come back in padded grid coordinates; drop the padding layer
    // and map through the unit voxel size.
    mesh.points.reserve(buffer.positions.len());
    for pos in &buffer.positions {
        mesh.points.push(Point3::new(
            volume.origin.x + (pos[0] - 1.0) as f64,
            volume.origin.y + (pos[1] - 1.0) as f64,
            volume.origin.z + (pos[2] - 1.0) as f64,
        ));
    }

    let mut dropped = 0usize;
    mesh.triangles.reserve(buffer.indices.len() / 3);
    for chunk in buffer.indices.chunks_exact(3) {
        let tri = [chunk[0], chunk[1], chunk[2]];
        if relax_disoriented && (tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2]) {
            dropped += 1;
            continue;
        }
        mesh.triangles.push(tri);
    }

    if dropped > 0 {
        debug!(dropped, "Dropped degenerate triangles");
    }

    info!(
        points = mesh.point_count(),
        faces = mesh.face_count(),
        "Isosurface extracted"
    );

    mesh
}
