//! Error types for mesh container and file IO operations.
//!
//! Every error carries a machine-readable code (`MESH-XXXX`), a help text
//! rendered by miette, and a recovery suggestion the CLI can print:
//! - `MESH-1xxx`: I/O errors (reading, writing, parsing)
//! - `MESH-2xxx`: content errors (empty mesh, unconverted quads)
//! - `MESH-4xxx`: format errors

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Machine-readable error codes for mesh operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshErrorCode {
    /// MESH-1001: Failed to read file
    IoRead = 1001,
    /// MESH-1002: Failed to write file
    IoWrite = 1002,
    /// MESH-1003: Failed to parse file format
    ParseError = 1003,
    /// MESH-2001: Mesh has no points or no faces
    EmptyMesh = 2001,
    /// MESH-2002: Quad faces present where only triangles are allowed
    QuadsNotTriangulated = 2002,
    /// MESH-4001: Unsupported file format
    UnsupportedFormat = 4001,
}

impl MeshErrorCode {
    /// Returns the error code as a string in the format `MESH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshErrorCode::IoRead => "MESH-1001",
            MeshErrorCode::IoWrite => "MESH-1002",
            MeshErrorCode::ParseError => "MESH-1003",
            MeshErrorCode::EmptyMesh => "MESH-2001",
            MeshErrorCode::QuadsNotTriangulated => "MESH-2002",
            MeshErrorCode::UnsupportedFormat => "MESH-4001",
        }
    }
}

impl std::fmt::Display for MeshErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for mesh errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Check properties of the file or its directory.
    CheckFile { checks: Vec<String> },
    /// Re-export the file from the original software.
    ReexportFile { format: Option<String> },
    /// Use a different file format.
    UseDifferentFormat { suggested: Vec<String> },
    /// Convert quad faces to triangles before the operation.
    TriangulateQuads,
    /// No automatic recovery available.
    None,
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::CheckFile { checks } => {
                write!(f, "Check: {}", checks.join(", "))
            }
            RecoverySuggestion::ReexportFile { format } => {
                if let Some(fmt) = format {
                    write!(f, "Try re-exporting the mesh as {} from the original software", fmt)
                } else {
                    write!(f, "Try re-exporting the mesh from the original software")
                }
            }
            RecoverySuggestion::UseDifferentFormat { suggested } => {
                write!(f, "Try using a different format: {}", suggested.join(", "))
            }
            RecoverySuggestion::TriangulateQuads => {
                write!(f, "Call triangulate_quads() on the mesh before saving")
            }
            RecoverySuggestion::None => {
                write!(f, "No automatic recovery available")
            }
        }
    }
}

/// Errors that can occur while loading, saving, or validating meshes.
#[derive(Debug, Error, Diagnostic)]
pub enum MeshError {
    /// Error reading from a file.
    #[error("failed to read mesh from {path}")]
    #[diagnostic(
        code(hollow::mesh::io::read),
        help("Check that the file exists and is readable")
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing to a file.
    #[error("failed to write mesh to {path}")]
    #[diagnostic(
        code(hollow::mesh::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing mesh file contents.
    #[error("failed to parse mesh from {path}: {details}")]
    #[diagnostic(
        code(hollow::mesh::parse),
        help("The file may be corrupted or truncated. Try re-exporting it.")
    )]
    ParseError { path: PathBuf, details: String },

    /// Unsupported file format.
    #[error("unsupported mesh format: {extension:?}")]
    #[diagnostic(
        code(hollow::mesh::format::unsupported),
        help("Supported formats: STL, OBJ")
    )]
    UnsupportedFormat { extension: Option<String> },

    /// Mesh has no points or no faces.
    #[error("mesh is empty: {details}")]
    #[diagnostic(
        code(hollow::mesh::empty),
        help("The mesh must have at least one point and one face. Check the export settings.")
    )]
    EmptyMesh { details: String },

    /// Quad faces present where the target format requires triangles.
    #[error("mesh has {quad_count} quad faces, but the target format is triangle-only")]
    #[diagnostic(
        code(hollow::mesh::quads),
        help("Convert quads with triangulate_quads() before saving to STL")
    )]
    QuadsNotTriangulated { quad_count: usize },
}

impl MeshError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> MeshErrorCode {
        match self {
            MeshError::IoRead { .. } => MeshErrorCode::IoRead,
            MeshError::IoWrite { .. } => MeshErrorCode::IoWrite,
            MeshError::ParseError { .. } => MeshErrorCode::ParseError,
            MeshError::UnsupportedFormat { .. } => MeshErrorCode::UnsupportedFormat,
            MeshError::EmptyMesh { .. } => MeshErrorCode::EmptyMesh,
            MeshError::QuadsNotTriangulated { .. } => MeshErrorCode::QuadsNotTriangulated,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            MeshError::IoRead { .. } => RecoverySuggestion::CheckFile {
                checks: vec!["file exists".into(), "file permissions".into()],
            },
            MeshError::IoWrite { .. } => RecoverySuggestion::CheckFile {
                checks: vec!["directory exists".into(), "write permissions".into()],
            },
            MeshError::ParseError { .. } => RecoverySuggestion::ReexportFile {
                format: Some("binary STL".into()),
            },
            MeshError::UnsupportedFormat { .. } => RecoverySuggestion::UseDifferentFormat {
                suggested: vec!["STL".into(), "OBJ".into()],
            },
            MeshError::EmptyMesh { .. } => RecoverySuggestion::CheckFile {
                checks: vec!["mesh has geometry".into(), "correct export settings".into()],
            },
            MeshError::QuadsNotTriangulated { .. } => RecoverySuggestion::TriangulateQuads,
        }
    }

    // Constructor helpers for common error patterns

    /// Create an IoRead error.
    pub fn io_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::IoRead {
            path: path.into(),
            source,
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::IoWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ParseError.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        MeshError::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an EmptyMesh error.
    pub fn empty_mesh(details: impl Into<String>) -> Self {
        MeshError::EmptyMesh {
            details: details.into(),
        }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(extension: Option<String>) -> Self {
        MeshError::UnsupportedFormat { extension }
    }
}
