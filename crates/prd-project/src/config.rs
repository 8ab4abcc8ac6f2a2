//! Project configuration
//!
//! Read from `.prd/config.toml`. Every key is optional; a missing file
//! means defaults.

use crate::error::ConfigError;
use prd_integrity::{ValidationMode, DEFAULT_RESEARCH_DIR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Config written by `init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# PRD configuration

# Severity of completeness issues: "soft" warns, "hard" blocks.
validation_mode = "soft"

# Where research artifacts live, relative to the project root.
# research_dir = ".prd/research"
"#;

/// Project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Default validation mode
    pub validation_mode: ValidationMode,
    /// Research directory, relative to the project root
    pub research_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Soft,
            research_dir: PathBuf::from(DEFAULT_RESEARCH_DIR),
        }
    }
}

impl ProjectConfig {
    /// Load config from `path`, falling back to defaults when absent
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !is_inside_root(&config.research_dir) {
            return Err(ConfigError::ResearchDirOutsideRoot {
                path: path.to_path_buf(),
                research_dir: config.research_dir,
            });
        }
        Ok(config)
    }

    /// Decode config from TOML text
    ///
    /// # Errors
    /// Returns error on invalid TOML or unknown enum values.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Relative path that never climbs above its base
fn is_inside_root(dir: &Path) -> bool {
    dir.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
