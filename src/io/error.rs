//! Error types for pipeline operations and parent attribution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifies which of the two input faces an error or record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parent {
    /// First parent, also the reference frame for child landmarks
    A,
    /// Second parent
    B,
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "parent A"),
            Self::B => write!(f, "parent B"),
        }
    }
}

/// Main error type for all pipeline operations
///
/// Only the first three variants can be produced by the analysis core; the
/// rest surface from configuration loading and the command-line front end.
/// Recoverable conditions are reported as [`crate::pipeline::Degradation`]
/// values instead.
#[derive(Debug)]
pub enum KinError {
    /// Image bytes could not be decoded, or decoded to an empty buffer
    DecodeFailure {
        /// Parent whose image was unreadable
        parent: Parent,
        /// Decoder message or emptiness description
        reason: String,
    },

    /// The landmark detector found no face in the image
    NoFaceDetected {
        /// Parent whose image contained no face
        parent: Parent,
    },

    /// The detector returned a face with too few landmarks for the canonical indices
    IncompleteLandmarks {
        /// Parent whose face mesh was incomplete
        parent: Parent,
        /// Number of landmarks the metric formulas need
        required: usize,
        /// Number of landmarks the detector produced
        found: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A JSON configuration, landmark or record file could not be parsed or serialized
    ConfigParse {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying parser error
        source: serde_json::Error,
    },

    /// A record could not be encoded as JSON for writing
    RecordExport {
        /// Destination of the record
        path: PathBuf,
        /// Underlying encoder error
        source: serde_json::Error,
    },

    /// Failed to save the reference image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl KinError {
    /// Parent the error is attributed to, if it came from per-parent analysis
    pub const fn parent(&self) -> Option<Parent> {
        match self {
            Self::DecodeFailure { parent, .. }
            | Self::NoFaceDetected { parent }
            | Self::IncompleteLandmarks { parent, .. } => Some(*parent),
            _ => None,
        }
    }
}

impl fmt::Display for KinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailure { parent, reason } => {
                write!(f, "Failed to decode image for {parent}: {reason}")
            }
            Self::NoFaceDetected { parent } => {
                write!(f, "No face detected in image for {parent}")
            }
            Self::IncompleteLandmarks {
                parent,
                required,
                found,
            } => {
                write!(
                    f,
                    "Incomplete landmarks for {parent}: {found} found, {required} required"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ConfigParse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::RecordExport { path, source } => {
                write!(f, "Failed to encode record for '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for KinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::ConfigParse { source, .. } | Self::RecordExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, KinError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> KinError {
    KinError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> KinError {
    KinError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
