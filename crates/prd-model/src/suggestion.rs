//! Suggestion model
//!
//! A [`Suggestion`] proposes replacements for some subset of a spec's
//! sections. Every section is optional; `None` means "no proposal" and
//! leaves the spec untouched when merged.

use crate::spec::{CompetitiveLandscapeItem, CriticalUserJourney, MarketResearchItem};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Proposed revision of a spec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub summary: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub critical_user_journeys: Option<Vec<CriticalUserJourney>>,
    pub market_research: Option<Vec<MarketResearchItem>>,
    pub competitive_landscape: Option<Vec<CompetitiveLandscapeItem>>,
}

impl Suggestion {
    /// Sections that carry a non-empty proposal, in document order
    #[must_use]
    pub fn sections(&self) -> Vec<SuggestionSection> {
        SuggestionSection::ALL
            .into_iter()
            .filter(|s| self.has(*s))
            .collect()
    }

    /// Whether `section` carries a non-empty proposal
    #[must_use]
    pub fn has(&self, section: SuggestionSection) -> bool {
        match section {
            SuggestionSection::Summary => self
                .summary
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty()),
            SuggestionSection::Requirements => has_items(self.requirements.as_deref()),
            SuggestionSection::CriticalUserJourneys => {
                has_items(self.critical_user_journeys.as_deref())
            }
            SuggestionSection::MarketResearch => has_items(self.market_research.as_deref()),
            SuggestionSection::CompetitiveLandscape => {
                has_items(self.competitive_landscape.as_deref())
            }
        }
    }

    /// No section carries a proposal
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    /// Copy holding only the chosen sections
    #[must_use]
    pub fn select(&self, chosen: &[SuggestionSection]) -> Self {
        let keep = |s: SuggestionSection| chosen.contains(&s) && self.has(s);
        Self {
            summary: self
                .summary
                .clone()
                .filter(|_| keep(SuggestionSection::Summary)),
            requirements: self
                .requirements
                .clone()
                .filter(|_| keep(SuggestionSection::Requirements)),
            critical_user_journeys: self
                .critical_user_journeys
                .clone()
                .filter(|_| keep(SuggestionSection::CriticalUserJourneys)),
            market_research: self
                .market_research
                .clone()
                .filter(|_| keep(SuggestionSection::MarketResearch)),
            competitive_landscape: self
                .competitive_landscape
                .clone()
                .filter(|_| keep(SuggestionSection::CompetitiveLandscape)),
        }
    }

    /// Number of proposed entries in a list section (1 for a summary)
    #[must_use]
    pub fn item_count(&self, section: SuggestionSection) -> usize {
        match section {
            SuggestionSection::Summary => usize::from(self.has(section)),
            SuggestionSection::Requirements => self.requirements.as_ref().map_or(0, Vec::len),
            SuggestionSection::CriticalUserJourneys => {
                self.critical_user_journeys.as_ref().map_or(0, Vec::len)
            }
            SuggestionSection::MarketResearch => {
                self.market_research.as_ref().map_or(0, Vec::len)
            }
            SuggestionSection::CompetitiveLandscape => {
                self.competitive_landscape.as_ref().map_or(0, Vec::len)
            }
        }
    }
}

fn has_items<T>(items: Option<&[T]>) -> bool {
    items.is_some_and(|v| !v.is_empty())
}

/// Revisable spec section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuggestionSection {
    Summary,
    Requirements,
    CriticalUserJourneys,
    MarketResearch,
    CompetitiveLandscape,
}

impl SuggestionSection {
    /// All sections in document order
    pub const ALL: [SuggestionSection; 5] = [
        Self::Summary,
        Self::Requirements,
        Self::CriticalUserJourneys,
        Self::MarketResearch,
        Self::CompetitiveLandscape,
    ];

    /// Level-2 header text in suggestion artifacts
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Requirements => "Requirements",
            Self::CriticalUserJourneys => "Critical User Journeys",
            Self::MarketResearch => "Market Research",
            Self::CompetitiveLandscape => "Competitive Landscape",
        }
    }

    /// Top-level key of the matching spec field
    #[must_use]
    pub const fn spec_key(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Requirements => "requirements",
            Self::CriticalUserJourneys => "critical_user_journeys",
            Self::MarketResearch => "market_research",
            Self::CompetitiveLandscape => "competitive_landscape",
        }
    }

    /// Short command-line name
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Requirements => "requirements",
            Self::CriticalUserJourneys => "cujs",
            Self::MarketResearch => "market",
            Self::CompetitiveLandscape => "competitive",
        }
    }

    /// Match an artifact header (exact, after trimming)
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL.into_iter().find(|s| s.header() == header)
    }
}

impl Display for SuggestionSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for SuggestionSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sec| sec.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Section name outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown suggestion section: {0:?}")]
pub struct UnknownSection(pub String);
