//! Selective merge of suggestions into spec documents
//!
//! Whitelist merge: only sections populated in the [`Suggestion`] replace
//! the matching top-level key. Everything else in the document, including
//! keys the typed model does not know and their comments, stays as written. The engine makes
//! no judgment about which sections to take; callers narrow the suggestion
//! with [`Suggestion::select`] first.

use crate::error::ApplyError;
use prd_model::splice::{first_faithful, render_entry, replace_entry};
use prd_model::{Suggestion, SuggestionSection};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Apply `suggestion` to the spec document at `path`, rewriting it in place
///
/// Returns the sections that were written. An empty suggestion leaves the
/// file untouched.
///
/// # Errors
/// Returns error if the spec cannot be read, parsed or written back.
pub fn apply_suggestion(
    path: &Path,
    suggestion: &Suggestion,
) -> Result<Vec<SuggestionSection>, ApplyError> {
    if suggestion.is_empty() {
        tracing::debug!(path = %path.display(), "nothing selected; spec left untouched");
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path).map_err(|e| ApplyError::io_error(path, e))?;
    let (updated, applied) = apply_to_document(&raw, suggestion).map_err(|e| e.at(path))?;
    fs::write(path, updated).map_err(|e| ApplyError::io_error(path, e))?;

    tracing::info!(path = %path.display(), sections = ?applied, "applied suggestion sections");
    Ok(applied)
}

/// Apply `suggestion` to a document held in memory
///
/// Only the text of the replaced entries changes; comments, quoting and
/// layout elsewhere are kept. Documents whose layout cannot be edited entry
/// by entry are re-serialized whole.
///
/// # Errors
/// Returns error if `raw` does not parse to a mapping or a section fails to
/// serialize.
pub fn apply_to_document(
    raw: &str,
    suggestion: &Suggestion,
) -> Result<(String, Vec<SuggestionSection>), ApplyError> {
    let applied = suggestion.sections();
    if applied.is_empty() {
        return Ok((raw.to_string(), applied));
    }

    let mut doc: Value = serde_yaml::from_str(raw).map_err(|source| ApplyError::Parse {
        path: "<memory>".into(),
        source,
    })?;
    let Value::Mapping(root) = &mut doc else {
        return Err(ApplyError::NotAMapping("<memory>".into()));
    };

    let mut text = raw.to_string();
    for section in &applied {
        let Some(value) = proposal(suggestion, *section)? else {
            continue;
        };
        let key = section.spec_key();
        text = replace_entry(&text, key, &render_entry(key, &value, 0)?);
        root.insert(Value::String(key.to_string()), value);
    }

    if let Some(text) = first_faithful(&doc, [text]) {
        return Ok((text, applied));
    }
    tracing::debug!("document layout not editable entry by entry; rewriting whole tree");
    Ok((serde_yaml::to_string(&doc)?, applied))
}

/// Proposed value of one section, if populated
fn proposal(suggestion: &Suggestion, section: SuggestionSection) -> Result<Option<Value>, ApplyError> {
    let value = match section {
        SuggestionSection::Summary => suggestion.summary.as_ref().map(serde_yaml::to_value),
        SuggestionSection::Requirements => {
            suggestion.requirements.as_ref().map(serde_yaml::to_value)
        }
        SuggestionSection::CriticalUserJourneys => suggestion
            .critical_user_journeys
            .as_ref()
            .map(serde_yaml::to_value),
        SuggestionSection::MarketResearch => {
            suggestion.market_research.as_ref().map(serde_yaml::to_value)
        }
        SuggestionSection::CompetitiveLandscape => suggestion
            .competitive_landscape
            .as_ref()
            .map(serde_yaml::to_value),
    };
    Ok(value.transpose()?)
}
