//! Spec document model
//!
//! Typed, read-mostly view of a product requirement document. Every field
//! defaults when absent so that partially filled documents still decode;
//! structural checks are the validator's job, not the decoder's.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Prefix every requirement identifier token starts with
pub const REQUIREMENT_PREFIX: &str = "REQ-";

/// A product requirement document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spec {
    /// Stable identifier (`PRD-###`)
    pub id: String,
    pub title: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub strategic_context: StrategicContext,
    pub user_story: UserStory,
    pub summary: String,
    /// Requirement lines, conventionally `REQ-###: text`
    pub requirements: Vec<String>,
    #[serde(rename = "acceptance_criteria")]
    pub acceptance: Vec<AcceptanceCriterion>,
    pub files_to_modify: Vec<FileChange>,
    /// Research artifact paths
    pub research: Vec<String>,
    pub critical_user_journeys: Vec<CriticalUserJourney>,
    pub market_research: Vec<MarketResearchItem>,
    pub competitive_landscape: Vec<CompetitiveLandscapeItem>,
    pub metadata: Metadata,
    pub complexity: String,
    pub estimated_minutes: i64,
    pub priority: i64,
}

impl Spec {
    /// Requirement identifier tokens declared by this spec
    ///
    /// Takes the first whitespace-delimited field of each requirement,
    /// strips one trailing colon and keeps it only when it carries the
    /// requirement prefix.
    #[must_use]
    pub fn requirement_tokens(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter_map(|line| requirement_token(line))
            .collect()
    }
}

/// Extract the requirement identifier token from one requirement line
#[must_use]
pub fn requirement_token(line: &str) -> Option<&str> {
    let first = line.split_whitespace().next()?;
    let token = first.strip_suffix(':').unwrap_or(first);
    token.starts_with(REQUIREMENT_PREFIX).then_some(token)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicContext {
    pub cuj_id: String,
    pub cuj_name: String,
    pub feature_id: String,
    pub mvp_included: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStory {
    pub text: String,
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceCriterion {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChange {
    pub action: String,
    pub path: String,
    pub description: String,
}

/// Pointer from a research claim into a research artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceRef {
    /// Relative path under the research directory
    pub path: String,
    pub anchor: String,
    pub note: String,
}

/// Critical user journey (CUJ)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalUserJourney {
    pub id: String,
    pub title: String,
    /// Raw priority string; see [`CujPriority`] for the accepted values
    pub priority: String,
    pub steps: Vec<String>,
    pub success_criteria: Vec<String>,
    /// Requirement tokens this journey depends on
    pub linked_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketResearchItem {
    pub id: String,
    pub claim: String,
    pub evidence_refs: Vec<EvidenceRef>,
    pub confidence: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveLandscapeItem {
    pub id: String,
    pub name: String,
    pub positioning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risk: String,
    pub evidence_refs: Vec<EvidenceRef>,
}

/// Bookkeeping owned by tooling rather than authors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub validation_warnings: Vec<String>,
}

/// Closed set of CUJ priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CujPriority {
    Critical,
    High,
    Med,
    Low,
}

impl CujPriority {
    /// All accepted priorities, highest first
    pub const ALL: [CujPriority; 4] = [Self::Critical, Self::High, Self::Med, Self::Low];

    /// Canonical lowercase spelling
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Med => "med",
            Self::Low => "low",
        }
    }
}

impl Display for CujPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CujPriority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lowered)
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// Priority string outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0:?}")]
pub struct UnknownPriority(pub String);
