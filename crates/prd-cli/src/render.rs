//! Plain-text output

use prd_project::{SpecDetails, SpecSummary, SuggestionReview, ValidationOutcome};
use prd_model::SuggestionSection;
use std::fmt::Write;

pub(crate) fn list_line(summary: &SpecSummary) -> String {
    format!("{}\t{}", summary.id, summary.title)
}

pub(crate) fn spec_details(details: &SpecDetails) -> String {
    let spec = &details.spec;
    let mut out = String::new();
    out.push_str(details.raw.trim_end());
    out.push_str("\n\n");
    let _ = writeln!(out, "Title: {}", spec.title);
    let _ = writeln!(out, "Summary: {}", spec.summary.trim());
    let _ = writeln!(out, "Hash: {}", details.hash);
    let _ = writeln!(out, "CUJ: {}", spec.critical_user_journeys.len());
    let _ = writeln!(out, "Market: {}", spec.market_research.len());
    let _ = write!(out, "Competitive: {}", spec.competitive_landscape.len());
    out
}

fn review_label(section: SuggestionSection) -> &'static str {
    match section {
        SuggestionSection::Summary => "Summary",
        SuggestionSection::Requirements => "Requirements",
        SuggestionSection::CriticalUserJourneys => "CUJ",
        SuggestionSection::MarketResearch => "Market",
        SuggestionSection::CompetitiveLandscape => "Competitive",
    }
}

pub(crate) fn review(review: &SuggestionReview) -> String {
    let mut lines = vec![format!("File: {}", review.file_name)];
    for (section, count) in review.counts() {
        let value = match section {
            SuggestionSection::Summary if count > 0 => "yes".to_string(),
            SuggestionSection::Summary => "no".to_string(),
            _ => count.to_string(),
        };
        lines.push(format!("{}: {value}", review_label(section)));
    }
    lines.join("\n")
}

/// Text verdict of a validation run; `Err` carries the failure message
pub(crate) fn validation(outcome: &ValidationOutcome) -> Result<String, String> {
    let report = &outcome.report;
    if report.has_errors() {
        return Err(format!("validation failed: {}", report.errors.join("; ")));
    }
    if report.warnings.is_empty() {
        return Ok("OK".to_string());
    }
    Ok(report
        .warnings
        .iter()
        .map(|w| format!("WARN: {w}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub(crate) fn applied(id: &str, sections: &[SuggestionSection]) -> String {
    if sections.is_empty() {
        return format!("No sections selected; {id} unchanged");
    }
    let names: Vec<&str> = sections.iter().map(|s| s.header()).collect();
    format!("Applied suggestions to {id}: {}", names.join(", "))
}
