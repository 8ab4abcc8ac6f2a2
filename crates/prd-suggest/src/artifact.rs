//! Suggestion artifacts on disk
//!
//! One spec can accumulate many artifacts named
//! `<id>-<YYYYMMDD-HHMMSS>.md`. The timestamp is fixed-width, so the
//! lexicographically greatest name is the latest and the only one that
//! counts.

use crate::error::SuggestError;
use crate::parser::parse_suggestion;
use prd_model::{artifact_timestamp, Clock, Suggestion};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File extension of suggestion artifacts
pub const ARTIFACT_EXTENSION: &str = "md";

/// Artifact file name for spec `id` at the clock's current time
#[must_use]
pub fn artifact_file_name(id: &str, clock: &dyn Clock) -> String {
    format!(
        "{id}-{}.{ARTIFACT_EXTENSION}",
        artifact_timestamp(clock.now())
    )
}

/// Path of the latest artifact for `id` in `dir`, if any
///
/// # Errors
/// Returns error if `dir` cannot be listed.
pub fn latest_artifact(dir: &Path, id: &str) -> Result<Option<PathBuf>, SuggestError> {
    let prefix = format!("{id}-");
    let suffix = format!(".{ARTIFACT_EXTENSION}");

    let entries = fs::read_dir(dir).map_err(|e| SuggestError::io_error(dir, e))?;
    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.map_err(|e| SuggestError::io_error(dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(&prefix) || !name.ends_with(&suffix) {
            continue;
        }
        if latest.as_ref().map_or(true, |current| name > *current) {
            latest = Some(name);
        }
    }
    Ok(latest.map(|name| dir.join(name)))
}

/// Parse the latest artifact for `id`
///
/// # Errors
/// Returns [`SuggestError::NoSuggestions`] when no artifact exists, or an
/// IO error if the directory or file cannot be read.
pub fn load_latest(dir: &Path, id: &str) -> Result<(Suggestion, PathBuf), SuggestError> {
    let path = latest_artifact(dir, id)?.ok_or_else(|| SuggestError::NoSuggestions(id.to_string()))?;
    let raw = fs::read_to_string(&path).map_err(|e| SuggestError::io_error(&path, e))?;
    tracing::debug!(path = %path.display(), "loading latest suggestion artifact");
    Ok((parse_suggestion(&raw), path))
}

/// Write a fresh artifact template for `id` into `dir`
///
/// Never overwrites an existing artifact.
///
/// # Errors
/// Returns error if the file exists already or cannot be written.
pub fn create_template(dir: &Path, id: &str, clock: &dyn Clock) -> Result<PathBuf, SuggestError> {
    let path = dir.join(artifact_file_name(id, clock));
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| SuggestError::io_error(&path, e))?;
    file.write_all(render_template(id).as_bytes())
        .map_err(|e| SuggestError::io_error(&path, e))?;
    tracing::info!(path = %path.display(), "created suggestion template");
    Ok(path)
}

/// Canonical artifact template for spec `id`
#[must_use]
pub fn render_template(id: &str) -> String {
    format!(
        r#"# Suggestions for {id}

## Summary
- status: pending
- suggestion: ""

## Requirements
- status: pending
- suggestion:
  - "REQ-001: Add requirement"

## Critical User Journeys
- status: pending
- suggestion:
  - id: "CUJ-001"
    title: "Primary Journey"
    priority: "high"
    steps:
      - "Step"
    success_criteria:
      - "Outcome"
    linked_requirements:
      - "REQ-001"

## Market Research
- status: pending
- suggestion:
  - id: "MR-001"
    claim: "Market claim"
    evidence_refs:
      - path: ".prd/research/{id}-YYYYMMDD-HHMMSS.md"
        anchor: "section-1"
        note: "Source quote"
    confidence: "medium"
    date: "2026-01-15"

## Competitive Landscape
- status: pending
- suggestion:
  - id: "COMP-001"
    name: "Competitor"
    positioning: "Positioning"
    strengths:
      - "Strength"
    weaknesses:
      - "Weakness"
    risk: "Medium"
    evidence_refs:
      - path: ".prd/research/{id}-YYYYMMDD-HHMMSS.md"
        anchor: "section-2"
        note: "Source quote"
"#
    )
}
