//! Core mesh type for the hollowing toolchain.

use nalgebra::{Point3, Vector3};

/// An indexed polygon mesh with triangle and quad faces.
///
/// Faces reference points by index; indices are only meaningful relative to
/// the mesh that owns them. Isosurface extraction can emit quads, while the
/// STL interchange format is triangle-only, so both face kinds are carried
/// and [`Mesh::triangulate_quads`] converts between them.
///
/// # Example
///
/// ```
/// use hollow_mesh::Mesh;
/// use nalgebra::Point3;
///
/// let mut mesh = Mesh::new();
/// mesh.points.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.points.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.points.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.triangles.push([0, 1, 2]);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Point coordinates in model units (mm).
    pub points: Vec<Point3<f64>>,
    /// Triangle faces as point indices.
    pub triangles: Vec<[u32; 3]>,
    /// Quad faces as point indices.
    pub quads: Vec<[u32; 4]>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from point and face arrays, reserving capacity up front.
    ///
    /// Face indices must be in range for `points`; this is a precondition,
    /// checked only in debug builds.
    pub fn from_parts(
        points: &[Point3<f64>],
        triangles: &[[u32; 3]],
        quads: &[[u32; 4]],
    ) -> Self {
        let mut mesh = Self {
            points: Vec::with_capacity(points.len()),
            triangles: Vec::with_capacity(triangles.len()),
            quads: Vec::with_capacity(quads.len()),
        };
        mesh.points.extend_from_slice(points);
        mesh.triangles.extend_from_slice(triangles);
        mesh.quads.extend_from_slice(quads);
        debug_assert!(mesh.indices_in_range());
        mesh
    }

    /// Number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of faces, both kinds combined.
    pub fn face_count(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }

    /// A mesh is empty when it has no points, or points but no faces of
    /// either kind.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || (self.triangles.is_empty() && self.quads.is_empty())
    }

    /// Append another mesh's points and faces onto this one.
    ///
    /// Appended face indices are re-based by the point count that existed
    /// before the append, so they stay valid in the combined point list. The
    /// result holds both surfaces as disjoint components of a single mesh;
    /// no boolean union is performed.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.points.len() as u32;
        self.points.reserve(other.points.len());
        self.points.extend_from_slice(&other.points);

        self.triangles.reserve(other.triangles.len());
        for t in &other.triangles {
            self.triangles
                .push([t[0] + offset, t[1] + offset, t[2] + offset]);
        }

        self.quads.reserve(other.quads.len());
        for q in &other.quads {
            self.quads
                .push([q[0] + offset, q[1] + offset, q[2] + offset, q[3] + offset]);
        }
        debug_assert!(self.indices_in_range());
    }

    /// Multiply every point coordinate by a uniform factor.
    ///
    /// For nonzero `factor`, `scale(f)` followed by `scale(1.0 / f)`
    /// reproduces the original coordinates up to floating-point rounding.
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.points {
            p.coords *= factor;
        }
    }

    /// Translate every point by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for p in &mut self.points {
            p.coords += offset;
        }
    }

    /// Reverse the winding order of every face.
    ///
    /// Swapping indices 0 and 2 reverses the edge cycle for triangles and
    /// quads alike (a first/last swap would twist a quad into a bowtie).
    pub fn flip_normals(&mut self) {
        for t in &mut self.triangles {
            t.swap(0, 2);
        }
        for q in &mut self.quads {
            q.swap(0, 2);
        }
    }

    /// Replace every quad `(a, b, c, d)` with triangles `(a, b, c)` and
    /// `(c, d, a)`, preserving winding, and clear the quad list.
    ///
    /// Point count is unchanged; the triangle count grows by twice the
    /// former quad count.
    pub fn triangulate_quads(&mut self) {
        self.triangles.reserve(self.quads.len() * 2);
        for q in &self.quads {
            self.triangles.push([q[0], q[1], q[2]]);
            self.triangles.push([q[2], q[3], q[0]]);
        }
        self.quads.clear();
    }

    /// Axis-aligned bounding box, or `None` for a pointless mesh.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.points.is_empty() {
            return None;
        }

        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }

    /// Translate the mesh so its bounding-box center lands at the origin.
    ///
    /// Returns the translation that was applied (zero for a pointless
    /// mesh). Recentering an already-centered mesh is a no-op.
    pub fn recenter(&mut self) -> Vector3<f64> {
        let Some((min, max)) = self.bounds() else {
            return Vector3::zeros();
        };
        let center = nalgebra::center(&min, &max);
        let offset = -center.coords;
        self.translate(offset);
        offset
    }

    /// Signed volume enclosed by the mesh (divergence theorem).
    ///
    /// Positive for a closed surface wound with outward-facing normals,
    /// negative for an inverted one. Quads contribute as two fan triangles.
    pub fn volume(&self) -> f64 {
        let tet = |a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>| {
            a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
        };

        let mut volume = 0.0;
        for t in &self.triangles {
            volume += tet(
                &self.points[t[0] as usize],
                &self.points[t[1] as usize],
                &self.points[t[2] as usize],
            );
        }
        for q in &self.quads {
            let (a, b, c, d) = (
                &self.points[q[0] as usize],
                &self.points[q[1] as usize],
                &self.points[q[2] as usize],
                &self.points[q[3] as usize],
            );
            volume += tet(a, b, c);
            volume += tet(c, d, a);
        }
        volume
    }

    /// Total surface area of all faces.
    pub fn surface_area(&self) -> f64 {
        let tri_area = |a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>| {
            let ab = b - a;
            let ac = c - a;
            ab.cross(&ac).norm() / 2.0
        };

        let mut area = 0.0;
        for t in &self.triangles {
            area += tri_area(
                &self.points[t[0] as usize],
                &self.points[t[1] as usize],
                &self.points[t[2] as usize],
            );
        }
        for q in &self.quads {
            let (a, b, c, d) = (
                &self.points[q[0] as usize],
                &self.points[q[1] as usize],
                &self.points[q[2] as usize],
                &self.points[q[3] as usize],
            );
            area += tri_area(a, b, c);
            area += tri_area(c, d, a);
        }
        area
    }

    fn indices_in_range(&self) -> bool {
        let n = self.points.len() as u32;
        self.triangles.iter().all(|t| t.iter().all(|&i| i < n))
            && self.quads.iter().all(|q| q.iter().all(|&i| i < n))
    }
}
