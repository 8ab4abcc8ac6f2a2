//! PRD Integrity
//!
//! Consistency and completeness checks for spec documents, and the writer
//! that records soft-mode findings back into the document.
//!
//! # Core Operations
//!
//! - **Validate**: raw document → [`ValidationReport`] (errors + warnings)
//! - **Annotate**: warnings → `metadata.validation_warnings` in place
//!
//! # Architecture
//!
//! ```text
//! raw YAML → Spec → rules ─┬─ always errors (ids, priorities, required fields)
//!                          └─ mode-scaled (links, evidence) → errors | warnings
//!                                                                 ↓ (soft)
//!                                                      store_warnings(path)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod annotate;
pub mod error;
pub mod validate;

pub use annotate::{annotate_document, store_warnings, Annotation};
pub use error::{AnnotateError, InvalidMode, ValidateError};
pub use validate::{
    validate, validate_spec, ValidationMode, ValidationOptions, ValidationReport,
    DEFAULT_RESEARCH_DIR,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
