//! PRD Project
//!
//! Ties the engine crates to an on-disk project: layout, configuration,
//! the spec store and the workflows the CLI drives.
//!
//! # Architecture
//!
//! ```text
//! Project::open(root) ── config.toml → ProjectConfig
//!        │
//!        ├─ store      specs/<id>.yaml  (resolve, load, list, template)
//!        ├─ research   research/<id>-<ts>.md
//!        ├─ brief      briefs/<id>-<ts>.md  (context for suggestion templates)
//!        └─ workflow   validate → annotate | review | select → apply
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod brief;
pub mod config;
pub mod error;
pub mod layout;
pub mod project;
pub mod research;
pub mod store;
pub mod workflow;

pub use brief::{compose, compose_suggestion_brief, write_suggestion_brief, BriefInput};
pub use config::{ProjectConfig, DEFAULT_CONFIG_TOML};
pub use error::{ConfigError, ProjectError, ProjectResult};
pub use layout::{ProjectLayout, PROJECT_DIR};
pub use project::Project;
pub use research::create_research_artifact;
pub use store::{
    create_spec_template, load_spec, load_summaries, next_id, render_spec_template,
    resolve_spec_path, SpecSummary, SPEC_EXTENSIONS,
};
pub use workflow::{
    apply_suggestions, create_research, create_spec, create_suggestion_template, review_suggestions,
    spec_details, validate_spec, SpecDetails, SuggestionRequest, SuggestionReview,
    ValidationOutcome,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
