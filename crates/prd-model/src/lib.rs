//! PRD Document Model
//!
//! Shared vocabulary for product requirement documents (specs) and the
//! suggestions that revise them.
//!
//! # Core Concepts
//!
//! - [`Spec`]: typed view of a spec document
//! - [`Suggestion`]: optional per-section proposals for a spec
//! - [`SpecHash`]: content fingerprint that ignores bookkeeping fields
//! - [`Clock`]: injected time source for artifact naming
//! - [`splice`]: entry-level edits that keep the rest of a document's text
//!
//! # Example
//!
//! ```rust,ignore
//! use prd_model::{spec_hash, Spec};
//!
//! let spec: Spec = serde_yaml::from_str(&raw)?;
//! println!("content hash: {}", spec_hash(&spec)?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod clock;
mod hash;
mod id;
mod spec;
mod suggestion;

pub mod splice;

pub use clock::{artifact_timestamp, Clock, FixedClock, SystemClock, ARTIFACT_TIMESTAMP_FORMAT};
pub use hash::{spec_hash, story_hash, HashError, SpecHash};
pub use id::{format_spec_id, next_spec_id, spec_number_from_file_name, SPEC_ID_PREFIX};
pub use spec::{
    requirement_token, AcceptanceCriterion, CompetitiveLandscapeItem, CriticalUserJourney,
    CujPriority, EvidenceRef, FileChange, MarketResearchItem, Metadata, Spec, StrategicContext,
    UnknownPriority, UserStory, REQUIREMENT_PREFIX,
};
pub use suggestion::{Suggestion, SuggestionSection, UnknownSection};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
