//! Spec content fingerprints
//!
//! Provides [`SpecHash`], a 32-byte SHA-256 digest over the content fields
//! of a [`Spec`]. Bookkeeping fields (id, creation time, validation
//! warnings, metadata) are excluded so that renaming a spec or re-running
//! validation leaves the fingerprint unchanged.

use crate::spec::{
    AcceptanceCriterion, CompetitiveLandscapeItem, CriticalUserJourney, FileChange,
    MarketResearchItem, Spec,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte content fingerprint (SHA-256)
///
/// Cache key only; carries no security properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecHash([u8; 32]);

impl SpecHash {
    /// Create from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Create hash from byte slice
    ///
    /// # Errors
    /// Returns error if slice length is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| HashError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for SpecHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for SpecHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl serde::Serialize for SpecHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for SpecHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Canonical payload; field order here is the serialization order
#[derive(Serialize)]
struct HashPayload<'a> {
    story_text: &'a str,
    summary: &'a str,
    requirements: &'a [String],
    acceptance: &'a [AcceptanceCriterion],
    files_to_modify: &'a [FileChange],
    critical_user_journeys: &'a [CriticalUserJourney],
    market_research: &'a [MarketResearchItem],
    competitive_landscape: &'a [CompetitiveLandscapeItem],
}

impl<'a> From<&'a Spec> for HashPayload<'a> {
    fn from(spec: &'a Spec) -> Self {
        Self {
            story_text: &spec.user_story.text,
            summary: &spec.summary,
            requirements: &spec.requirements,
            acceptance: &spec.acceptance,
            files_to_modify: &spec.files_to_modify,
            critical_user_journeys: &spec.critical_user_journeys,
            market_research: &spec.market_research,
            competitive_landscape: &spec.competitive_landscape,
        }
    }
}

/// Fingerprint the content fields of a spec
///
/// # Errors
/// Returns error if the canonical payload fails to serialize
pub fn spec_hash(spec: &Spec) -> Result<SpecHash, HashError> {
    let json = serde_json::to_vec(&HashPayload::from(spec))?;
    Ok(SpecHash::compute(&json))
}

/// Fingerprint a user story text (fills `user_story.hash`)
#[inline]
#[must_use]
pub fn story_hash(text: &str) -> SpecHash {
    SpecHash::compute(text.as_bytes())
}

/// Errors that can occur when working with spec hashes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Invalid hash length
    #[error("invalid hash length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex encoding error
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{EvidenceRef, Metadata};
    use proptest::prelude::*;

    fn base_spec() -> Spec {
        Spec {
            id: "PRD-001".to_string(),
            user_story: crate::spec::UserStory {
                text: "Story".to_string(),
                hash: String::new(),
            },
            summary: "Summary".to_string(),
            requirements: vec!["REQ-001: R".to_string()],
            critical_user_journeys: vec![CriticalUserJourney {
                id: "CUJ-001".to_string(),
                title: "Journey".to_string(),
                priority: "high".to_string(),
                ..CriticalUserJourney::default()
            }],
            market_research: vec![MarketResearchItem {
                id: "MR-001".to_string(),
                claim: "Market".to_string(),
                evidence_refs: vec![EvidenceRef {
                    path: ".prd/research/PRD-001-20260115-000000.md".to_string(),
                    anchor: "section".to_string(),
                    note: "note".to_string(),
                }],
                ..MarketResearchItem::default()
            }],
            ..Spec::default()
        }
    }

    #[test]
    fn spec_hash_is_hex_sha256() {
        let hash = spec_hash(&base_spec()).unwrap();
        let s = hash.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn spec_hash_deterministic() {
        assert_eq!(
            spec_hash(&base_spec()).unwrap(),
            spec_hash(&base_spec()).unwrap()
        );
    }

    #[test]
    fn spec_hash_ignores_bookkeeping() {
        let a = base_spec();
        let mut b = base_spec();
        b.id = "PRD-999".to_string();
        b.created_at = "2026-01-15T00:00:00Z".to_string();
        b.metadata = Metadata {
            validation_warnings: vec!["market research is empty".to_string()],
        };
        assert_eq!(spec_hash(&a).unwrap(), spec_hash(&b).unwrap());
    }

    #[test]
    fn spec_hash_changes_with_cuj() {
        let a = base_spec();
        let mut b = base_spec();
        b.critical_user_journeys[0].title = "Different".to_string();
        assert_ne!(spec_hash(&a).unwrap(), spec_hash(&b).unwrap());
    }

    #[test]
    fn spec_hash_changes_with_evidence_path() {
        let a = base_spec();
        let mut b = base_spec();
        b.market_research[0].evidence_refs[0].path =
            ".prd/research/PRD-001-20260115-111111.md".to_string();
        assert_ne!(spec_hash(&a).unwrap(), spec_hash(&b).unwrap());
    }

    #[test]
    fn story_hash_stable() {
        assert_eq!(story_hash("Hello"), story_hash("Hello"));
        assert_ne!(story_hash("Hello"), story_hash("hello"));
    }

    #[test]
    fn display_and_parse() {
        let hash = spec_hash(&base_spec()).unwrap();
        let parsed: SpecHash = hash.to_string().parse().unwrap();
        assert_eq!(hash, parsed);
        assert!(hash.to_string().starts_with(&hash.short()));
    }

    #[test]
    fn from_slice_invalid_length() {
        let result = SpecHash::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, actual: 31 })
        ));
    }

    proptest! {
        #[test]
        fn summary_edits_change_hash(a in ".{0,40}", b in ".{0,40}") {
            prop_assume!(a != b);
            let mut left = base_spec();
            left.summary = a;
            let mut right = base_spec();
            right.summary = b;
            prop_assert_ne!(spec_hash(&left).unwrap(), spec_hash(&right).unwrap());
        }

        #[test]
        fn warnings_never_change_hash(warnings in proptest::collection::vec(".{0,20}", 0..5)) {
            let mut spec = base_spec();
            let before = spec_hash(&spec).unwrap();
            spec.metadata.validation_warnings = warnings;
            prop_assert_eq!(before, spec_hash(&spec).unwrap());
        }
    }
}
