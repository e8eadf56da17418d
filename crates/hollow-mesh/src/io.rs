//! Mesh file IO: STL (binary/ASCII) and OBJ.
//!
//! STL is the interchange format the hollowing pipeline is built around;
//! OBJ is supported as a convenience and is the only writer that can emit
//! quad faces directly. STL writes compute per-facet normals from the
//! cross product rather than leaving them zeroed, since several slicers
//! trust the normal record.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

/// Load a mesh from file, auto-detecting format from extension.
///
/// A file that parses but contains no usable geometry is an error, so
/// callers never see a silently-empty mesh from a bad export.
pub fn load_mesh(path: &Path) -> MeshResult<Mesh> {
    let format = MeshFormat::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path.extension().and_then(|e| e.to_str()).map(String::from),
    })?;

    info!("Loading mesh from {:?} (format: {:?})", path, format);

    let mesh = match format {
        MeshFormat::Stl => load_stl(path)?,
        MeshFormat::Obj => load_obj(path)?,
    };

    if mesh.is_empty() {
        return Err(MeshError::empty_mesh(format!(
            "{} contains no usable geometry",
            path.display()
        )));
    }

    if let Some((min, max)) = mesh.bounds() {
        debug!(
            points = mesh.point_count(),
            faces = mesh.face_count(),
            dims = ?[max.x - min.x, max.y - min.y, max.z - min.z],
            "Mesh loaded"
        );
    }

    Ok(mesh)
}

/// Save a mesh to file, auto-detecting format from extension.
pub fn save_mesh(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    let format = MeshFormat::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path.extension().and_then(|e| e.to_str()).map(String::from),
    })?;

    match format {
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Load mesh from STL file (binary or ASCII).
fn load_stl(path: &Path) -> MeshResult<Mesh> {
    let file = File::open(path).map_err(|e| MeshError::io_read(path, e))?;
    let mut reader = BufReader::new(file);

    // stl_io::read_stl returns an IndexedMesh with deduplicated vertices
    let stl = stl_io::read_stl(&mut reader).map_err(|e| MeshError::parse_error(path, e.to_string()))?;

    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let mut mesh = Mesh::new();
    mesh.points.reserve(stl.vertices.len());
    mesh.triangles.reserve(stl.faces.len());

    for v in &stl.vertices {
        mesh.points.push(nalgebra::Point3::new(
            v.0[0] as f64,
            v.0[1] as f64,
            v.0[2] as f64,
        ));
    }

    let point_count = mesh.points.len();
    for face in &stl.faces {
        let indices = [
            face.vertices[0] as u32,
            face.vertices[1] as u32,
            face.vertices[2] as u32,
        ];

        // Skip degenerate or out-of-range triangles
        let distinct =
            indices[0] != indices[1] && indices[1] != indices[2] && indices[0] != indices[2];
        let in_range = indices.iter().all(|&i| (i as usize) < point_count);
        if distinct && in_range {
            mesh.triangles.push(indices);
        }
    }

    Ok(mesh)
}

/// Load mesh from OBJ file. Quad faces are triangulated by the reader.
fn load_obj(path: &Path) -> MeshResult<Mesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| MeshError::parse_error(path, e.to_string()))?;

    if models.is_empty() {
        return Err(MeshError::empty_mesh("OBJ file contains no models"));
    }

    // Merge all models into a single mesh
    let mut mesh = Mesh::new();
    let mut point_offset = 0u32;

    for model in &models {
        let obj_mesh = &model.mesh;

        for chunk in obj_mesh.positions.chunks(3) {
            if chunk.len() == 3 {
                mesh.points.push(nalgebra::Point3::new(
                    chunk[0] as f64,
                    chunk[1] as f64,
                    chunk[2] as f64,
                ));
            }
        }

        // Indices are per-model and need re-basing
        for chunk in obj_mesh.indices.chunks(3) {
            if chunk.len() == 3 {
                mesh.triangles.push([
                    chunk[0] + point_offset,
                    chunk[1] + point_offset,
                    chunk[2] + point_offset,
                ]);
            }
        }

        point_offset = mesh.points.len() as u32;
    }

    debug!(
        "OBJ loaded: {} points, {} triangles from {} models",
        mesh.point_count(),
        mesh.triangles.len(),
        models.len()
    );

    Ok(mesh)
}

/// Save mesh to STL file (binary format) with computed facet normals.
///
/// STL has no quad faces; the caller must triangulate first.
pub fn save_stl(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    if !mesh.quads.is_empty() {
        return Err(MeshError::QuadsNotTriangulated {
            quad_count: mesh.quads.len(),
        });
    }

    info!(
        points = mesh.point_count(),
        triangles = mesh.triangles.len(),
        "Saving mesh to {:?}",
        path
    );

    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);

    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles
        .iter()
        .map(|&[i0, i1, i2]| {
            let v0 = &mesh.points[i0 as usize];
            let v1 = &mesh.points[i1 as usize];
            let v2 = &mesh.points[i2 as usize];

            let n = (v1 - v0).cross(&(v2 - v0));
            let n = if n.norm() > 0.0 {
                n.normalize()
            } else {
                nalgebra::Vector3::zeros()
            };

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    stl_io::Vertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    stl_io::Vertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| {
        MeshError::io_write(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )
    })?;

    Ok(())
}

/// Save mesh to OBJ file. Quads are written as four-index faces.
pub fn save_obj(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    info!(
        points = mesh.point_count(),
        faces = mesh.face_count(),
        "Saving mesh to {:?} (OBJ format)",
        path
    );

    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);

    let wrap = |e: std::io::Error| MeshError::io_write(path, e);

    writeln!(writer, "# points: {}", mesh.point_count()).map_err(wrap)?;
    writeln!(writer, "# faces: {}", mesh.face_count()).map_err(wrap)?;

    for p in &mesh.points {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z).map_err(wrap)?;
    }

    // OBJ indices are 1-based
    for t in &mesh.triangles {
        writeln!(writer, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1).map_err(wrap)?;
    }
    for q in &mesh.quads {
        writeln!(writer, "f {} {} {} {}", q[0] + 1, q[1] + 1, q[2] + 1, q[3] + 1).map_err(wrap)?;
    }

    writer.flush().map_err(wrap)?;
    Ok(())
}
