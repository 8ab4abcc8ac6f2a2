//! Error types for spec integrity checks
//!
//! Content defects are never errors here; they are reported through
//! [`ValidationReport`](crate::ValidationReport). Only documents that cannot
//! be parsed at all, and I/O failures, surface as `Err`.

use std::path::PathBuf;

/// Errors during validation
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Document is not parseable as a spec
    #[error("spec parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors while writing validation warnings into a spec document
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// Document is not parseable YAML
    #[error("syntax error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO error reading or writing the document
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Re-serializing the edited tree failed
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl AnnotateError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Unknown validation mode string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid validation mode {0:?}")]
pub struct InvalidMode(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mode_display() {
        let err = InvalidMode("strict".to_string());
        assert_eq!(err.to_string(), "invalid validation mode \"strict\"");
    }

    #[test]
    fn io_error_carries_path() {
        let err = AnnotateError::io_error(
            "/tmp/PRD-001.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("PRD-001.yaml"));
    }
}
