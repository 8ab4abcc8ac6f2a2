//! Suggestion briefs
//!
//! A brief gives whoever fills in a suggestion template the spec's current
//! content and tells them where to write. Briefs land in
//! `.prd/briefs/<id>-<timestamp>.md` and are never overwritten.

use crate::error::{ProjectError, ProjectResult};
use prd_model::{artifact_timestamp, Clock, Spec};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Spec content a brief is composed from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefInput {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub requirements: Vec<String>,
    pub acceptance: Vec<String>,
    pub research_files: Vec<String>,
}

impl BriefInput {
    /// Brief content of `spec`; blank acceptance criteria are dropped
    #[must_use]
    pub fn from_spec(spec: &Spec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            summary: spec.summary.trim_end().to_string(),
            requirements: spec.requirements.clone(),
            acceptance: spec
                .acceptance
                .iter()
                .map(|criterion| criterion.description.as_str())
                .filter(|description| !description.trim().is_empty())
                .map(str::to_string)
                .collect(),
            research_files: spec.research.clone(),
        }
    }
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "\n{heading}:");
    if items.is_empty() {
        out.push_str("(none)\n");
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

/// Brief text for `input`
#[must_use]
pub fn compose(input: &BriefInput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PRD: {}", input.id);
    let _ = writeln!(out, "Title: {}", input.title);
    let _ = writeln!(out, "\nSummary:\n{}", input.summary);
    push_list(&mut out, "Requirements", &input.requirements);
    push_list(&mut out, "Acceptance Criteria", &input.acceptance);
    push_list(&mut out, "Research", &input.research_files);
    out
}

/// Brief for filling in the suggestion template at `template`
#[must_use]
pub fn compose_suggestion_brief(spec: &Spec, template: &Path) -> String {
    let mut out = compose(&BriefInput::from_spec(spec));
    out.push_str("\nInstructions:\n");
    out.push_str(
        "- Create per-section suggestions for Summary, Requirements, CUJs, Market Research, Competitive Landscape.\n",
    );
    out.push_str("- Use evidence refs for all research claims.\n");
    let _ = writeln!(
        out,
        "- Write results into the suggestions template at:\n  {}",
        template.display()
    );
    out
}

/// Write the suggestion brief for `spec` into `dir`
///
/// # Errors
/// Returns error if the directory or the brief cannot be written, or a
/// brief with the same timestamp already exists.
pub fn write_suggestion_brief(
    dir: &Path,
    spec: &Spec,
    template: &Path,
    clock: &dyn Clock,
) -> ProjectResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ProjectError::io_error(dir, e))?;
    let path = dir.join(format!("{}-{}.md", spec.id, artifact_timestamp(clock.now())));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| ProjectError::io_error(&path, e))?;
    file.write_all(compose_suggestion_brief(spec, template).as_bytes())
        .map_err(|e| ProjectError::io_error(&path, e))?;

    tracing::info!(id = %spec.id, path = %path.display(), "wrote suggestion brief");
    Ok(path)
}
