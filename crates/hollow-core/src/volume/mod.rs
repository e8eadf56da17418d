//! Signed-distance volume conversion.
//!
//! This module wraps the volumetric engine behind three operations: build a
//! signed-distance volume from a mesh, redistance a volume at a target
//! isovalue, and extract a polygonal isosurface back out of a volume.

mod extract;
mod grid;
mod soup;

pub use extract::grid_to_contour;
pub use grid::{MAX_VOXELS, Volume, mesh_to_grid, redistance_grid};
pub use soup::SoupView;
