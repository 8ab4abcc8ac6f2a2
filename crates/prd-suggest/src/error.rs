//! Error types for suggestion handling
//!
//! Parsing never fails: sections that do not decode are simply absent.
//! Errors here cover locating artifacts on disk and rewriting specs.

use std::path::PathBuf;

/// Errors while locating or creating suggestion artifacts
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// No artifact exists for the spec id
    #[error("no suggestions for {0}")]
    NoSuggestions(String),

    /// IO error during artifact read or write
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SuggestError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors during suggestion application
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// Spec document is not parseable YAML
    #[error("syntax error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Spec document root is not a mapping
    #[error("spec document is not a mapping: {0}")]
    NotAMapping(PathBuf),

    /// Proposed section or edited tree failed to serialize
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// IO error reading or writing the spec
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApplyError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the document path to a path-less error
    #[must_use]
    pub(crate) fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse { source, .. } => Self::Parse {
                path: path.into(),
                source,
            },
            Self::NotAMapping(_) => Self::NotAMapping(path.into()),
            other => other,
        }
    }
}
