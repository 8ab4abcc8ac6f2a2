//! On-disk project layout
//!
//! ```text
//! <root>/.prd/
//!   config.toml
//!   specs/        <id>.yaml
//!   research/     <id>-<timestamp>.md
//!   suggestions/  <id>-<timestamp>.md
//!   briefs/       <id>-<timestamp>.md
//! ```

use crate::config::DEFAULT_CONFIG_TOML;
use crate::error::{ProjectError, ProjectResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project directory under the root
pub const PROJECT_DIR: &str = ".prd";

/// Paths of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    #[must_use]
    pub fn specs_dir(&self) -> PathBuf {
        self.project_dir().join("specs")
    }

    /// Default research directory; config may point elsewhere
    #[must_use]
    pub fn research_dir(&self) -> PathBuf {
        self.project_dir().join("research")
    }

    #[must_use]
    pub fn suggestions_dir(&self) -> PathBuf {
        self.project_dir().join("suggestions")
    }

    #[must_use]
    pub fn briefs_dir(&self) -> PathBuf {
        self.project_dir().join("briefs")
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.project_dir().join("config.toml")
    }

    /// Create the directory tree and default config
    ///
    /// Idempotent; an existing config is left alone.
    ///
    /// # Errors
    /// Returns error if a directory or the config cannot be created.
    pub fn init(&self) -> ProjectResult<()> {
        for dir in [
            self.project_dir(),
            self.specs_dir(),
            self.research_dir(),
            self.suggestions_dir(),
            self.briefs_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|e| ProjectError::io_error(&dir, e))?;
        }

        let config = self.config_path();
        if !config.exists() {
            fs::write(&config, DEFAULT_CONFIG_TOML).map_err(|e| ProjectError::io_error(&config, e))?;
            tracing::info!(path = %config.display(), "wrote default config");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_project_dir() {
        let layout = ProjectLayout::new("/work");
        assert_eq!(layout.specs_dir(), PathBuf::from("/work/.prd/specs"));
        assert_eq!(layout.research_dir(), PathBuf::from("/work/.prd/research"));
        assert_eq!(layout.suggestions_dir(), PathBuf::from("/work/.prd/suggestions"));
        assert_eq!(layout.briefs_dir(), PathBuf::from("/work/.prd/briefs"));
        assert_eq!(layout.config_path(), PathBuf::from("/work/.prd/config.toml"));
    }

    #[test]
    fn init_creates_tree_and_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path());
        layout.init().unwrap();
        assert!(layout.specs_dir().is_dir());
        assert!(layout.research_dir().is_dir());
        assert!(layout.suggestions_dir().is_dir());
        assert!(layout.briefs_dir().is_dir());
        assert_eq!(
            fs::read_to_string(layout.config_path()).unwrap(),
            DEFAULT_CONFIG_TOML
        );

        fs::write(layout.config_path(), "validation_mode = \"hard\"\n").unwrap();
        layout.init().unwrap();
        assert_eq!(
            fs::read_to_string(layout.config_path()).unwrap(),
            "validation_mode = \"hard\"\n"
        );
    }
}
