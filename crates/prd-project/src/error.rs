//! Error types for project operations
//!
//! Wraps the lower crates' errors so that callers deal with one type per
//! workflow.

use prd_integrity::{AnnotateError, ValidateError};
use prd_model::HashError;
use prd_suggest::{ApplyError, SuggestError};
use std::path::PathBuf;

/// Errors loading project configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `research_dir` is absolute or climbs out of the project root
    #[error("research_dir in {path} must be relative to the project root: {}", research_dir.display())]
    ResearchDirOutsideRoot { path: PathBuf, research_dir: PathBuf },
}

/// Project-level error
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// No `<id>.yaml` or `<id>.yml` in the specs directory
    #[error("spec not found: {0}")]
    SpecNotFound(String),

    /// IO error on a project file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spec document does not decode
    #[error("syntax error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("validation error: {0}")]
    Validate(#[from] ValidateError),

    #[error("annotation error: {0}")]
    Annotate(#[from] AnnotateError),

    #[error("suggestion error: {0}")]
    Suggest(#[from] SuggestError),

    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),

    #[error("hash error: {0}")]
    Hash(#[from] HashError),
}

impl ProjectError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_not_found_display() {
        let err = ProjectError::SpecNotFound("PRD-404".to_string());
        assert_eq!(err.to_string(), "spec not found: PRD-404");
    }

    #[test]
    fn error_conversions() {
        let err: ProjectError = SuggestError::NoSuggestions("PRD-001".to_string()).into();
        assert!(matches!(err, ProjectError::Suggest(_)));
        assert_eq!(err.to_string(), "suggestion error: no suggestions for PRD-001");
    }
}
