//! Mesh container and file IO for the hollow toolchain.
//!
//! This crate holds the indexed triangle/quad mesh type the hollowing
//! pipeline operates on, plus STL and OBJ readers/writers. It knows nothing
//! about signed-distance fields or hollowing itself; see `hollow-core` for
//! the pipeline.
//!
//! # Units and coordinates
//!
//! Coordinates are `f64` millimeters in a right-handed system. Closed
//! surfaces are expected to be wound counter-clockwise seen from outside,
//! which makes [`Mesh::volume`] positive.
//!
//! # Quick start
//!
//! ```no_run
//! use hollow_mesh::Mesh;
//!
//! let mut mesh = Mesh::load("part.stl")?;
//! mesh.scale(2.0);
//! mesh.recenter();
//! mesh.save("part_scaled.stl")?;
//! # Ok::<(), hollow_mesh::MeshError>(())
//! ```
//!
//! # Error handling
//!
//! IO functions return [`MeshError`], which implements
//! [`miette::Diagnostic`] and carries a `MESH-XXXX` code plus a recovery
//! suggestion; see [`MeshError::code`] and [`MeshError::recovery_suggestion`].

mod error;
mod io;
mod types;

pub use error::{MeshError, MeshErrorCode, MeshResult, RecoverySuggestion};
pub use io::{load_mesh, save_mesh, save_obj, save_stl, MeshFormat};
pub use types::Mesh;

use std::path::Path;

impl Mesh {
    /// Load a mesh from a file, auto-detecting the format from its
    /// extension. See [`load_mesh`].
    pub fn load(path: impl AsRef<Path>) -> MeshResult<Self> {
        io::load_mesh(path.as_ref())
    }

    /// Save the mesh to a file, auto-detecting the format from its
    /// extension. See [`save_mesh`].
    pub fn save(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        io::save_mesh(self, path.as_ref())
    }
}
