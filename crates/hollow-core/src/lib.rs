//! Mesh hollowing for 3D printing.
//!
//! This crate turns a solid, watertight mesh into a shelled version of
//! itself: a thin wall following the original outer surface with the
//! interior material removed, so a print uses less material.
//!
//! The pipeline builds a signed-distance volume from the input, offsets the
//! surface inward by the wall thickness (optionally sealing narrow cavity
//! features via morphological closing), extracts the offset isosurface as
//! the interior shell, and merges that shell back into the original surface
//! as a second, inward-facing boundary. No boolean CSG is involved; the
//! hollow result is two disjoint surfaces in one mesh.
//!
//! # Quick Start
//!
//! ```no_run
//! use hollow_core::{HollowConfig, hollow_mesh};
//! use hollow_mesh::Mesh;
//!
//! let mesh = Mesh::load("part.stl").unwrap();
//!
//! let config = HollowConfig::default()
//!     .with_min_thickness(2.0)   // 2mm walls
//!     .with_quality(0.5);
//!
//! let result = hollow_mesh(&mesh, &config).unwrap();
//! if result.stats.shell_generated {
//!     result.mesh.save("part_hollowed.stl").unwrap();
//! }
//! ```
//!
//! # File-to-file
//!
//! ```no_run
//! use std::path::Path;
//! use hollow_core::hollow;
//!
//! let stats = hollow(
//!     Path::new("part.stl"),
//!     Some(Path::new("hollowing.json")),
//!     Path::new("part_hollowed.stl"),
//! )
//! .unwrap();
//! println!("hollowed in {} ms", stats.total_time_ms);
//! ```
//!
//! # Low-Level API
//!
//! The volume stage is exposed for callers that want the raw pieces:
//! [`volume::mesh_to_grid`] builds the signed-distance field,
//! [`volume::redistance_grid`] recomputes it at an offset level set, and
//! [`volume::grid_to_contour`] extracts an isosurface mesh.

mod config;
mod error;
mod interior;
mod pipeline;
pub mod volume;

pub use config::HollowConfig;
pub use error::{HollowError, HollowErrorCode, HollowRecoverySuggestion, HollowResult};

// Interior shell generation
pub use interior::{
    InteriorResult, InteriorStats, MAX_OVERSAMPLE, MIN_OVERSAMPLE, generate_interior,
    oversampling_scale,
};

// Orchestration
pub use pipeline::{
    ARTIFACT_INPUT, ARTIFACT_SHELL, HollowOutput, HollowStats, hollow, hollow_mesh,
    hollow_with_artifacts,
};
