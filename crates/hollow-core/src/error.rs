//! Error types for the hollowing pipeline with rich diagnostics.
//!
//! Each error carries a machine-readable code (`HOLLOW-XXXX`), miette help
//! text, and a recovery suggestion:
//! - `HOLLOW-1xxx`: configuration errors
//! - `HOLLOW-2xxx`: volume conversion errors
//! - `HOLLOW-3xxx`: pipeline errors

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for hollowing operations.
pub type HollowResult<T> = Result<T, HollowError>;

/// Machine-readable error codes for hollowing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HollowErrorCode {
    /// HOLLOW-1001: Wall thickness must be positive
    InvalidThickness = 1001,
    /// HOLLOW-1002: Closing distance must not be negative
    InvalidClosingDistance = 1002,
    /// HOLLOW-1003: Failed to read config file
    ConfigRead = 1003,
    /// HOLLOW-1004: Failed to parse config file
    ConfigParse = 1004,

    /// HOLLOW-2001: Input mesh has no usable bounds
    EmptyMesh = 2001,
    /// HOLLOW-2002: Voxel grid exceeds the size guard
    GridTooLarge = 2002,

    /// HOLLOW-3001: Underlying mesh/IO failure
    MeshFailed = 3001,
}

impl HollowErrorCode {
    /// Returns the error code as a string in the format `HOLLOW-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HollowErrorCode::InvalidThickness => "HOLLOW-1001",
            HollowErrorCode::InvalidClosingDistance => "HOLLOW-1002",
            HollowErrorCode::ConfigRead => "HOLLOW-1003",
            HollowErrorCode::ConfigParse => "HOLLOW-1004",
            HollowErrorCode::EmptyMesh => "HOLLOW-2001",
            HollowErrorCode::GridTooLarge => "HOLLOW-2002",
            HollowErrorCode::MeshFailed => "HOLLOW-3001",
        }
    }
}

impl std::fmt::Display for HollowErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for hollowing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HollowRecoverySuggestion {
    /// Change a configuration field.
    AdjustConfig { field: String, suggested: String },
    /// Lower the quality setting to shrink the voxel grid.
    ReduceQuality { current: f64, suggested: f64 },
    /// Inspect the input mesh file.
    CheckInputMesh,
    /// No specific suggestion.
    None,
}

impl std::fmt::Display for HollowRecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HollowRecoverySuggestion::AdjustConfig { field, suggested } => {
                write!(f, "Set {} to {}", field, suggested)
            }
            HollowRecoverySuggestion::ReduceQuality { current, suggested } => {
                write!(
                    f,
                    "Reduce quality from {:.2} to {:.2} to shrink the voxel grid",
                    current, suggested
                )
            }
            HollowRecoverySuggestion::CheckInputMesh => {
                write!(f, "Check that the input mesh is a closed, non-degenerate surface")
            }
            HollowRecoverySuggestion::None => {
                write!(f, "No specific suggestion available")
            }
        }
    }
}

/// Errors that can occur while hollowing a mesh.
#[derive(Debug, Error)]
pub enum HollowError {
    /// Wall thickness is zero or negative.
    #[error("min_thickness must be positive, got {value}")]
    InvalidThickness { value: f64 },

    /// Closing distance is negative.
    #[error("closing_distance must not be negative, got {value}")]
    InvalidClosingDistance { value: f64 },

    /// Error reading the config file.
    #[error("failed to read config from {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the config file.
    #[error("failed to parse config from {path}: {details}")]
    ConfigParse { path: PathBuf, details: String },

    /// Input mesh has no points to build a grid around.
    #[error("input mesh has no usable bounds")]
    EmptyMesh,

    /// Voxel grid would be too large.
    #[error("voxel grid too large: {dims:?} = {total} voxels exceeds limit of {max}")]
    GridTooLarge {
        dims: [usize; 3],
        total: usize,
        max: usize,
    },

    /// Underlying mesh container or IO error.
    #[error(transparent)]
    Mesh(#[from] hollow_mesh::MeshError),
}

// Diagnostic is implemented by hand instead of derived: the derive's
// `#[diagnostic(transparent)]` forwarding expands to `inner.code()`, which
// resolves to `MeshError`'s inherent `code()` (returning `MeshErrorCode`)
// rather than `Diagnostic::code`, and fails to type-check. The impl below is
// the derive's expansion with that one call fully qualified; the `Mesh`
// variant forwards to the inner error, all other variants carry the
// `hollow::*` codes and help text.
impl Diagnostic for HollowError {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            HollowError::InvalidThickness { .. } => {
                Some(Box::new("hollow::config::thickness"))
            }
            HollowError::InvalidClosingDistance { .. } => {
                Some(Box::new("hollow::config::closing_distance"))
            }
            HollowError::ConfigRead { .. } => Some(Box::new("hollow::config::read")),
            HollowError::ConfigParse { .. } => Some(Box::new("hollow::config::parse")),
            HollowError::EmptyMesh => Some(Box::new("hollow::volume::empty_input")),
            HollowError::GridTooLarge { .. } => {
                Some(Box::new("hollow::volume::grid_too_large"))
            }
            HollowError::Mesh(inner) => Diagnostic::code(inner),
        }
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            HollowError::InvalidThickness { .. } => Some(Box::new(
                "A non-positive wall thickness would produce a degenerate or inverted shell.",
            )),
            HollowError::InvalidClosingDistance { .. } => {
                Some(Box::new("Use 0 to disable closing, or a positive distance in mm."))
            }
            HollowError::ConfigRead { .. } => {
                Some(Box::new("Check that the file exists and is readable"))
            }
            HollowError::ConfigParse { .. } => Some(Box::new(
                "The config must be a JSON object; all fields are optional: min_thickness, quality, closing_distance, enabled",
            )),
            HollowError::EmptyMesh => Some(Box::new(
                "The mesh must contain at least one point and one face before volume conversion.",
            )),
            HollowError::GridTooLarge { .. } => Some(Box::new(
                "Reduce the quality setting or scale the model down; grid size grows with the cube of the oversampling factor.",
            )),
            HollowError::Mesh(inner) => Diagnostic::help(inner),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::severity(inner),
            _ => None,
        }
    }

    fn url(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::url(inner),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::labels(inner),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::source_code(inner),
            _ => None,
        }
    }

    fn related(&self) -> Option<Box<dyn Iterator<Item = &dyn Diagnostic> + '_>> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::related(inner),
            _ => None,
        }
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        match self {
            HollowError::Mesh(inner) => Diagnostic::diagnostic_source(inner),
            _ => None,
        }
    }
}

impl HollowError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> HollowErrorCode {
        match self {
            HollowError::InvalidThickness { .. } => HollowErrorCode::InvalidThickness,
            HollowError::InvalidClosingDistance { .. } => HollowErrorCode::InvalidClosingDistance,
            HollowError::ConfigRead { .. } => HollowErrorCode::ConfigRead,
            HollowError::ConfigParse { .. } => HollowErrorCode::ConfigParse,
            HollowError::EmptyMesh => HollowErrorCode::EmptyMesh,
            HollowError::GridTooLarge { .. } => HollowErrorCode::GridTooLarge,
            HollowError::Mesh(_) => HollowErrorCode::MeshFailed,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> HollowRecoverySuggestion {
        match self {
            HollowError::InvalidThickness { .. } => HollowRecoverySuggestion::AdjustConfig {
                field: "min_thickness".into(),
                suggested: "a positive wall thickness in mm (default 2.0)".into(),
            },
            HollowError::InvalidClosingDistance { .. } => HollowRecoverySuggestion::AdjustConfig {
                field: "closing_distance".into(),
                suggested: "0 or a positive distance in mm (default 0.5)".into(),
            },
            HollowError::ConfigRead { .. } | HollowError::ConfigParse { .. } => {
                HollowRecoverySuggestion::AdjustConfig {
                    field: "config file".into(),
                    suggested: "a JSON object with optional min_thickness/quality/closing_distance/enabled".into(),
                }
            }
            HollowError::EmptyMesh => HollowRecoverySuggestion::CheckInputMesh,
            HollowError::GridTooLarge { .. } => HollowRecoverySuggestion::ReduceQuality {
                current: 1.0,
                suggested: 0.5,
            },
            HollowError::Mesh(_) => HollowRecoverySuggestion::CheckInputMesh,
        }
    }

    // Constructor helpers

    /// Create an InvalidThickness error.
    pub fn invalid_thickness(value: f64) -> Self {
        HollowError::InvalidThickness { value }
    }

    /// Create an InvalidClosingDistance error.
    pub fn invalid_closing_distance(value: f64) -> Self {
        HollowError::InvalidClosingDistance { value }
    }

    /// Create a ConfigRead error.
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HollowError::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a ConfigParse error.
    pub fn config_parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        HollowError::ConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create a GridTooLarge error.
    pub fn grid_too_large(dims: [usize; 3], max: usize) -> Self {
        HollowError::GridTooLarge {
            dims,
            total: dims[0] * dims[1] * dims[2],
            max,
        }
    }
}
