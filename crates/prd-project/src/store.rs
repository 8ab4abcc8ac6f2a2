//! Spec documents in the specs directory

use crate::error::{ProjectError, ProjectResult};
use chrono::{DateTime, SecondsFormat, Utc};
use prd_model::{next_spec_id, story_hash, Clock, Spec};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Extensions tried when resolving a spec id, in order
pub const SPEC_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

const TEMPLATE_STORY: &str = "As a user, I want X so that Y.";

/// Listing entry for one spec document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub path: PathBuf,
}

#[derive(Deserialize)]
struct SummaryFields {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
}

/// Path of the document for `id`, trying `.yaml` before `.yml`
///
/// # Errors
/// Returns [`ProjectError::SpecNotFound`] when neither file exists.
pub fn resolve_spec_path(specs_dir: &Path, id: &str) -> ProjectResult<PathBuf> {
    SPEC_EXTENSIONS
        .iter()
        .map(|ext| specs_dir.join(format!("{id}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| ProjectError::SpecNotFound(id.to_string()))
}

/// Read and decode the spec document at `path`
///
/// # Errors
/// Returns error if the file cannot be read or decoded.
pub fn load_spec(path: &Path) -> ProjectResult<Spec> {
    let raw = fs::read_to_string(path).map_err(|e| ProjectError::io_error(path, e))?;
    serde_yaml::from_str(&raw).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Summaries of every spec document in `specs_dir`, sorted by file name
///
/// Unreadable or undecodable documents are skipped and reported in the
/// returned warnings. A missing directory lists as empty.
#[must_use]
pub fn load_summaries(specs_dir: &Path) -> (Vec<SpecSummary>, Vec<String>) {
    let Ok(entries) = fs::read_dir(specs_dir) else {
        return (Vec::new(), Vec::new());
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SPEC_EXTENSIONS.contains(&ext))
        })
        .collect();
    paths.sort();

    let mut summaries = Vec::with_capacity(paths.len());
    let mut warnings = Vec::new();
    for path in paths {
        let Ok(raw) = fs::read_to_string(&path) else {
            warnings.push(format!("read failed: {}", path.display()));
            continue;
        };
        match serde_yaml::from_str::<SummaryFields>(&raw) {
            Ok(fields) => summaries.push(SpecSummary {
                id: fields.id,
                title: fields.title,
                summary: fields.summary,
                path,
            }),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "spec does not decode");
                warnings.push(format!("parse failed: {}", path.display()));
            }
        }
    }
    (summaries, warnings)
}

/// Next free spec id in `specs_dir`
///
/// # Errors
/// Returns error if the directory exists but cannot be listed.
pub fn next_id(specs_dir: &Path) -> ProjectResult<String> {
    let entries = match fs::read_dir(specs_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(next_spec_id([])),
        Err(e) => return Err(ProjectError::io_error(specs_dir, e)),
    };
    let names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    Ok(next_spec_id(names.iter().map(String::as_str)))
}

/// Write a new spec template under the next free id
///
/// # Errors
/// Returns error if the specs directory or the document cannot be written.
pub fn create_spec_template(specs_dir: &Path, clock: &dyn Clock) -> ProjectResult<PathBuf> {
    fs::create_dir_all(specs_dir).map_err(|e| ProjectError::io_error(specs_dir, e))?;
    let id = next_id(specs_dir)?;
    let path = specs_dir.join(format!("{id}.yaml"));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| ProjectError::io_error(&path, e))?;
    file.write_all(render_spec_template(&id, clock.now()).as_bytes())
        .map_err(|e| ProjectError::io_error(&path, e))?;

    tracing::info!(%id, path = %path.display(), "created spec template");
    Ok(path)
}

/// Starter document for spec `id`
#[must_use]
pub fn render_spec_template(id: &str, now: DateTime<Utc>) -> String {
    let created_at = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let hash = story_hash(TEMPLATE_STORY);
    format!(
        r#"id: "{id}"
title: "Example PRD Title"
created_at: "{created_at}"
strategic_context:
  cuj_id: "CUJ-1"
  cuj_name: "Example Journey"
  feature_id: "example-feature"
  mvp_included: true
user_story:
  text: "{TEMPLATE_STORY}"
  hash: "{hash}"
summary: |
  One paragraph describing what to build and why.
requirements:
  - "REQ-001: Requirement one"
acceptance_criteria:
  - id: "ac-1"
    description: "Acceptance criterion one"
files_to_modify:
  - action: "create"
    path: "path/to/file"
    description: "Why this file"
critical_user_journeys:
  - id: "CUJ-001"
    title: "Primary Journey"
    priority: "high"
    steps:
      - "Step one"
    success_criteria:
      - "Success outcome"
    linked_requirements:
      - "REQ-001"
  - id: "CUJ-002"
    title: "Maintenance"
    priority: "low"
    steps:
      - "Routine upkeep"
    success_criteria:
      - "System remains stable"
    linked_requirements:
      - "REQ-001"
market_research:
  - id: "MR-001"
    claim: "Market is growing"
    evidence_refs:
      - path: ".prd/research/{id}-YYYYMMDD-HHMMSS.md"
        anchor: "section-1"
        note: "Source quote"
    confidence: "medium"
    date: "2026-01-15"
competitive_landscape:
  - id: "COMP-001"
    name: "Competitor"
    positioning: "Low cost"
    strengths:
      - "Speed"
    weaknesses:
      - "Reliability"
    risk: "Medium"
    evidence_refs:
      - path: ".prd/research/{id}-YYYYMMDD-HHMMSS.md"
        anchor: "section-2"
        note: "Source quote"
research:
  - ".prd/research/{id}-YYYYMMDD-HHMMSS.md"
complexity: "medium"
estimated_minutes: 25
priority: 1
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use prd_model::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap())
    }

    #[test]
    fn resolve_prefers_yaml_over_yml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PRD-001.yml"), "id: PRD-001\n").unwrap();
        assert_eq!(
            resolve_spec_path(dir.path(), "PRD-001").unwrap(),
            dir.path().join("PRD-001.yml")
        );

        fs::write(dir.path().join("PRD-001.yaml"), "id: PRD-001\n").unwrap();
        assert_eq!(
            resolve_spec_path(dir.path(), "PRD-001").unwrap(),
            dir.path().join("PRD-001.yaml")
        );
    }

    #[test]
    fn resolve_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_spec_path(dir.path(), "PRD-009"),
            Err(ProjectError::SpecNotFound(id)) if id == "PRD-009"
        ));
    }

    #[test]
    fn template_decodes_with_matching_story_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_spec_template(dir.path(), &clock()).unwrap();
        assert_eq!(path, dir.path().join("PRD-001.yaml"));

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.id, "PRD-001");
        assert_eq!(spec.created_at, "2026-01-15T09:30:00Z");
        assert_eq!(spec.user_story.hash, story_hash(&spec.user_story.text).to_string());
        assert_eq!(spec.requirement_tokens(), vec!["REQ-001"]);
        assert_eq!(spec.critical_user_journeys.len(), 2);
        assert_eq!(spec.estimated_minutes, 25);
    }

    #[test]
    fn templates_take_successive_ids() {
        let dir = tempfile::tempdir().unwrap();
        create_spec_template(dir.path(), &clock()).unwrap();
        fs::write(dir.path().join("PRD-007.yml"), "id: PRD-007\n").unwrap();
        let path = create_spec_template(dir.path(), &clock()).unwrap();
        assert_eq!(path, dir.path().join("PRD-008.yaml"));
    }

    #[test]
    fn next_id_of_missing_dir_is_first() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(next_id(&dir.path().join("absent")).unwrap(), "PRD-001");
    }

    #[test]
    fn summaries_skip_broken_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("PRD-002.yaml"),
            "id: PRD-002\ntitle: Second\nsummary: two\n",
        )
        .unwrap();
        fs::write(dir.path().join("PRD-001.yml"), "id: PRD-001\ntitle: First\n").unwrap();
        fs::write(dir.path().join("PRD-003.yaml"), "id: [unclosed\n").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        fs::create_dir(dir.path().join("archive.yaml")).unwrap();

        let (summaries, warnings) = load_summaries(dir.path());
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["PRD-001", "PRD-002"]);
        assert_eq!(summaries[1].summary, "two");
        assert_eq!(
            warnings,
            vec![format!("parse failed: {}", dir.path().join("PRD-003.yaml").display())]
        );
    }

    #[test]
    fn summaries_of_missing_dir_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (summaries, warnings) = load_summaries(&dir.path().join("absent"));
        assert!(summaries.is_empty());
        assert!(warnings.is_empty());
    }
}
