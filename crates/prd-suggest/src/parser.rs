//! Suggestion artifact parser
//!
//! Artifacts are Markdown-like: a title line, then `## <Section>` headers,
//! each followed by a status line and a `- suggestion:` payload. The
//! payload is either quoted inline or an indented YAML list.
//!
//! Parsing is segment-first: headers split the text into blocks, then each
//! block is decoded on its own. A block that does not decode leaves its
//! section absent; it never aborts the rest of the parse.

use prd_model::{Suggestion, SuggestionSection};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::Value;

const HEADER_PREFIX: &str = "## ";
const PAYLOAD_MARKER: &str = "- suggestion:";

/// Suggestion artifact parser
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionParser;

impl SuggestionParser {
    /// Create new suggestion parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Recover the proposals in `content`
    ///
    /// Unknown headers are ignored. A repeated header replaces whatever an
    /// earlier occurrence produced, including with "absent".
    #[must_use]
    pub fn parse(&self, content: &str) -> Suggestion {
        let lines: Vec<&str> = content.lines().collect();
        let mut out = Suggestion::default();

        for (index, line) in lines.iter().enumerate() {
            let Some(header) = line.trim().strip_prefix(HEADER_PREFIX) else {
                continue;
            };
            let Some(section) = SuggestionSection::from_header(header) else {
                tracing::debug!(header = header.trim(), "ignoring unrecognized section");
                continue;
            };

            let block = payload_block(&lines[index + 1..]);
            match section {
                SuggestionSection::Summary => out.summary = block.and_then(parse_summary),
                SuggestionSection::Requirements => {
                    out.requirements = block.and_then(parse_requirements);
                }
                SuggestionSection::CriticalUserJourneys => {
                    out.critical_user_journeys = block.and_then(|b| decode_list(section, &b[1..]));
                }
                SuggestionSection::MarketResearch => {
                    out.market_research = block.and_then(|b| decode_list(section, &b[1..]));
                }
                SuggestionSection::CompetitiveLandscape => {
                    out.competitive_landscape = block.and_then(|b| decode_list(section, &b[1..]));
                }
            }
        }

        tracing::debug!(sections = ?out.sections(), "parsed suggestion artifact");
        out
    }
}

/// Parse a suggestion artifact with the default parser
#[inline]
#[must_use]
pub fn parse_suggestion(content: &str) -> Suggestion {
    SuggestionParser.parse(content)
}

/// Lines from the payload marker to the end of the section
///
/// `None` when the section has no payload marker before the next header.
fn payload_block<'a>(rest: &'a [&'a str]) -> Option<&'a [&'a str]> {
    let end = rest
        .iter()
        .position(|l| l.trim().starts_with(HEADER_PREFIX))
        .unwrap_or(rest.len());
    let section = &rest[..end];
    let start = section
        .iter()
        .position(|l| l.trim().starts_with(PAYLOAD_MARKER))?;
    Some(&section[start..])
}

fn parse_summary(block: &[&str]) -> Option<String> {
    if let Some(inline) = between_quotes(block[0]) {
        return Some(inline.to_string());
    }
    block[1..]
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("- "))
        .find_map(between_quotes)
        .map(str::to_string)
}

fn parse_requirements(block: &[&str]) -> Option<Vec<String>> {
    if let Some(inline) = between_quotes(block[0]) {
        return Some(vec![inline.to_string()]);
    }
    let items: Vec<Value> = decode_list(SuggestionSection::Requirements, &block[1..])?;
    let texts: Option<Vec<String>> = items.into_iter().map(scalar_text).collect();
    if texts.is_none() {
        tracing::debug!("requirements payload holds non-scalar items; treating as absent");
    }
    texts
}

/// Scalar list item as text; `None` for mappings and sequences
fn scalar_text(item: Value) -> Option<String> {
    match item {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Text between the first and last double quote, if non-empty
fn between_quotes(line: &str) -> Option<&str> {
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    (last > first + 1).then(|| &line[first + 1..last])
}

#[derive(Deserialize)]
struct ListPayload<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Decode indented list lines as `Vec<T>` under a synthetic `items:` key
fn decode_list<T: DeserializeOwned>(section: SuggestionSection, lines: &[&str]) -> Option<Vec<T>> {
    let body: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if body.is_empty() {
        return None;
    }

    let mut doc = String::from("items:\n");
    for line in body {
        doc.push_str(line);
        doc.push('\n');
    }

    match serde_yaml::from_str::<ListPayload<T>>(&doc) {
        Ok(payload) if !payload.items.is_empty() => Some(payload.items),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(%section, error = %e, "section payload did not decode; treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prd_model::CriticalUserJourney;

    const ARTIFACT: &str = r#"# Suggestions for PRD-001

## Summary
- status: pending
- suggestion: "New summary"

## Requirements
- status: pending
- suggestion:
  - "REQ-001: Sign in with email"
  - "REQ-002: Reset password"

## Critical User Journeys
- status: pending
- suggestion:
  - id: "CUJ-001"
    title: "Sign in"
    priority: "high"
    steps:
      - "Open app"
    success_criteria:
      - "Signed in"
    linked_requirements:
      - "REQ-001"

## Market Research
- status: pending
- suggestion:
  - id: "MR-001"
    claim: "Market claim"
    evidence_refs:
      - path: ".prd/research/PRD-001-20260115-000000.md"
        anchor: "section-1"
        note: "Source quote"
    confidence: "medium"
    date: "2026-01-15"

## Competitive Landscape
- status: pending
- suggestion:
  - id: "COMP-001"
    name: "Competitor"
    strengths:
      - "Speed"
    evidence_refs:
      - path: ".prd/research/PRD-001-20260115-000000.md"
        anchor: "section-2"
        note: "Source quote"
"#;

    #[test]
    fn parses_every_section() {
        let s = parse_suggestion(ARTIFACT);
        assert_eq!(s.summary.as_deref(), Some("New summary"));
        assert_eq!(
            s.requirements,
            Some(vec![
                "REQ-001: Sign in with email".to_string(),
                "REQ-002: Reset password".to_string(),
            ])
        );
        assert_eq!(
            s.critical_user_journeys,
            Some(vec![CriticalUserJourney {
                id: "CUJ-001".to_string(),
                title: "Sign in".to_string(),
                priority: "high".to_string(),
                steps: vec!["Open app".to_string()],
                success_criteria: vec!["Signed in".to_string()],
                linked_requirements: vec!["REQ-001".to_string()],
            }])
        );
        let market = s.market_research.unwrap();
        assert_eq!(market[0].evidence_refs[0].anchor, "section-1");
        let comp = s.competitive_landscape.unwrap();
        assert_eq!(comp[0].name, "Competitor");
        assert_eq!(comp[0].strengths, vec!["Speed".to_string()]);
    }

    #[test]
    fn empty_summary_payload_is_absent() {
        let s = parse_suggestion("## Summary\n- status: pending\n- suggestion: \"\"\n");
        assert_eq!(s.summary, None);
        assert!(s.is_empty());
    }

    #[test]
    fn header_without_payload_is_absent() {
        let s = parse_suggestion("## Requirements\n- status: pending\n\n## Summary\n- suggestion: \"x\"\n");
        assert_eq!(s.requirements, None);
        assert_eq!(s.summary.as_deref(), Some("x"));
    }

    #[test]
    fn empty_list_payload_is_absent() {
        let s = parse_suggestion("## Requirements\n- status: pending\n- suggestion:\n\n");
        assert_eq!(s.requirements, None);
    }

    #[test]
    fn inline_requirement() {
        let s = parse_suggestion("## Requirements\n- suggestion: \"REQ-009: Only one\"\n");
        assert_eq!(s.requirements, Some(vec!["REQ-009: Only one".to_string()]));
    }

    #[test]
    fn summary_quoted_on_following_line() {
        let s = parse_suggestion("## Summary\n- suggestion:\n  - \"Below the marker\"\n");
        assert_eq!(s.summary.as_deref(), Some("Below the marker"));
    }

    #[test]
    fn bad_section_does_not_poison_others() {
        let raw = "## Critical User Journeys\n- suggestion:\n  - id: [broken\n\n## Summary\n- suggestion: \"Still here\"\n";
        let s = parse_suggestion(raw);
        assert_eq!(s.critical_user_journeys, None);
        assert_eq!(s.summary.as_deref(), Some("Still here"));
    }

    #[test]
    fn wrong_shape_is_absent() {
        let raw = "## Requirements\n- suggestion:\n  - id: \"REQ-001\"\n    text: \"a record, not a string\"\n";
        assert_eq!(parse_suggestion(raw).requirements, None);
    }

    #[test]
    fn scalar_requirements_read_as_text() {
        let raw = "## Requirements\n- suggestion:\n  - 42\n  - true\n  - 1.5\n  - \"REQ-001: Quoted\"\n";
        assert_eq!(
            parse_suggestion(raw).requirements,
            Some(vec![
                "42".to_string(),
                "true".to_string(),
                "1.5".to_string(),
                "REQ-001: Quoted".to_string(),
            ])
        );
    }

    #[test]
    fn unknown_headers_are_ignored() {
        let raw = "## Notes\n- suggestion: \"ignored\"\n## Summary\n- suggestion: \"kept\"\n";
        let s = parse_suggestion(raw);
        assert_eq!(s.summary.as_deref(), Some("kept"));
        assert_eq!(s.sections(), vec![SuggestionSection::Summary]);
    }

    #[test]
    fn duplicate_header_last_wins() {
        let raw = "## Summary\n- suggestion: \"first\"\n## Summary\n- suggestion: \"second\"\n";
        assert_eq!(parse_suggestion(raw).summary.as_deref(), Some("second"));
    }

    #[test]
    fn later_empty_duplicate_clears_section() {
        let raw = "## Summary\n- suggestion: \"first\"\n## Summary\n- status: pending\n";
        assert_eq!(parse_suggestion(raw).summary, None);
    }

    #[test]
    fn crlf_line_endings() {
        let raw = "## Summary\r\n- suggestion: \"windows\"\r\n";
        assert_eq!(parse_suggestion(raw).summary.as_deref(), Some("windows"));
    }

    #[test]
    fn empty_input() {
        assert!(parse_suggestion("").is_empty());
    }

    #[test]
    fn between_quotes_edges() {
        assert_eq!(between_quotes("- suggestion: \"a \"b\" c\""), Some("a \"b\" c"));
        assert_eq!(between_quotes("- suggestion: \"\""), None);
        assert_eq!(between_quotes("- suggestion: \"unterminated"), None);
        assert_eq!(between_quotes("- suggestion:"), None);
    }
}
