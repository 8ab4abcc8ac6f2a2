//! PRD Suggestions
//!
//! Proposal/merge workflow for spec documents.
//!
//! # Core Operations
//!
//! - **Parse**: suggestion artifact text → [`Suggestion`](prd_model::Suggestion)
//! - **Select**: caller narrows the suggestion to the accepted sections
//! - **Apply**: accepted sections overwrite the spec document in place
//!
//! # Architecture
//!
//! ```text
//! <id>-<timestamp>.md → SuggestionParser → Suggestion → select → apply_suggestion → <id>.yaml
//!        ↑ latest_artifact (lexicographic max)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod apply;
pub mod artifact;
pub mod error;
pub mod parser;

pub use apply::{apply_suggestion, apply_to_document};
pub use artifact::{
    artifact_file_name, create_template, latest_artifact, load_latest, render_template,
    ARTIFACT_EXTENSION,
};
pub use error::{ApplyError, SuggestError};
pub use parser::{parse_suggestion, SuggestionParser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
