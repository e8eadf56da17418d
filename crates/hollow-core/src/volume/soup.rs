//! Read-only polygon-soup view of a mesh for volume conversion.

use nalgebra::Point3;

use hollow_mesh::Mesh;

/// Borrowed polygon-soup view of a [`Mesh`].
///
/// The volume engine consumes geometry as a flat soup of polygons. This view
/// adapts a mesh without copying it: triangles come first, then quads, so a
/// polygon index below the triangle count addresses a triangle and anything
/// above it addresses a quad.
///
/// The mesh is expected to be pre-scaled into grid space, so [`point`]
/// returns stored coordinates unchanged.
///
/// [`point`]: SoupView::point
#[derive(Debug, Clone, Copy)]
pub struct SoupView<'a> {
    mesh: &'a Mesh,
}

impl<'a> SoupView<'a> {
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Total polygon count (triangles + quads).
    pub fn polygon_count(&self) -> usize {
        self.mesh.triangles.len() + self.mesh.quads.len()
    }

    /// Total point count.
    pub fn point_count(&self) -> usize {
        self.mesh.points.len()
    }

    /// Vertex count of one polygon: 3 in the triangle range, 4 above it.
    pub fn vertex_count(&self, polygon: usize) -> usize {
        if polygon < self.mesh.triangles.len() {
            3
        } else {
            4
        }
    }

    /// Coordinates of vertex `slot` of polygon `polygon`.
    pub fn point(&self, polygon: usize, slot: usize) -> Point3<f64> {
        let tri_count = self.mesh.triangles.len();
        let index = if polygon < tri_count {
            self.mesh.triangles[polygon][slot]
        } else {
            self.mesh.quads[polygon - tri_count][slot]
        };
        self.mesh.points[index as usize]
    }

    /// All points flattened to `f32` triples in the engine's vertex format.
    pub fn points_f32(&self) -> Vec<[f32; 3]> {
        self.mesh
            .points
            .iter()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// All polygons flattened to a triangle index list.
    ///
    /// Quads `(a, b, c, d)` are fanned into `(a, b, c)` and `(c, d, a)`,
    /// matching [`Mesh::triangulate_quads`], so the soup and the triangulated
    /// mesh describe the same surface.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices =
            Vec::with_capacity(self.mesh.triangles.len() * 3 + self.mesh.quads.len() * 6);
        for tri in &self.mesh.triangles {
            indices.extend_from_slice(tri);
        }
        for quad in &self.mesh.quads {
            indices.extend_from_slice(&[quad[0], quad[1], quad[2], quad[2], quad[3], quad[0]]);
        }
        indices
    }
}
