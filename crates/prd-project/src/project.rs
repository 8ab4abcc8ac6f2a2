//! Opened project: layout plus loaded configuration

use crate::config::ProjectConfig;
use crate::error::ProjectResult;
use crate::layout::ProjectLayout;
use prd_integrity::{ValidationMode, ValidationOptions};
use std::path::{Path, PathBuf};

/// A project rooted at a directory
#[derive(Debug, Clone)]
pub struct Project {
    layout: ProjectLayout,
    config: ProjectConfig,
}

impl Project {
    /// Open the project at `root`, reading its config if present
    ///
    /// # Errors
    /// Returns error if the config exists but is unreadable or malformed.
    pub fn open(root: impl Into<PathBuf>) -> ProjectResult<Self> {
        let layout = ProjectLayout::new(root);
        let config = ProjectConfig::load(&layout.config_path())?;
        tracing::debug!(
            root = %layout.root().display(),
            mode = %config.validation_mode,
            "opened project"
        );
        Ok(Self { layout, config })
    }

    /// Create the project tree at `root`, then open it
    ///
    /// # Errors
    /// Returns error if the tree cannot be created or the config loaded.
    pub fn init(root: impl Into<PathBuf>) -> ProjectResult<Self> {
        let layout = ProjectLayout::new(root);
        layout.init()?;
        Self::open(layout.root())
    }

    /// Project with an explicit config, ignoring any config file
    #[must_use]
    pub fn with_config(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            layout: ProjectLayout::new(root),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Absolute research directory as configured
    #[must_use]
    pub fn research_dir(&self) -> PathBuf {
        self.root().join(&self.config.research_dir)
    }

    /// Validator options for this project; `mode` overrides the config
    #[must_use]
    pub fn validation_options(&self, mode: Option<ValidationMode>) -> ValidationOptions {
        ValidationOptions::new(mode.unwrap_or(self.config.validation_mode), self.root())
            .with_research_dir(&self.config.research_dir)
    }
}
