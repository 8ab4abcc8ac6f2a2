//! End-to-end spec workflows
//!
//! Each function resolves files through the [`Project`], delegates to the
//! engine crates and returns a plain result the caller can render.

use crate::brief::write_suggestion_brief;
use crate::error::{ProjectError, ProjectResult};
use crate::project::Project;
use crate::research::create_research_artifact;
use crate::store::{create_spec_template, load_spec, resolve_spec_path};
use prd_integrity::{store_warnings, validate, Annotation, ValidateError, ValidationMode, ValidationReport};
use prd_model::{spec_hash, Clock, Spec, SpecHash, Suggestion, SuggestionSection};
use prd_suggest::{apply_suggestion, create_template, load_latest};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Result of validating one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub id: String,
    pub mode: ValidationMode,
    pub path: PathBuf,
    pub report: ValidationReport,
    /// Set when soft-mode warnings were written back to the document
    pub annotation: Option<Annotation>,
}

#[derive(Serialize)]
struct ValidationJson<'a> {
    id: &'a str,
    mode: ValidationMode,
    errors: &'a [String],
    warnings: &'a [String],
}

impl ValidationOutcome {
    /// Pretty JSON `{id, mode, errors, warnings}`
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ValidationJson {
            id: &self.id,
            mode: self.mode,
            errors: &self.report.errors,
            warnings: &self.report.warnings,
        })
    }
}

/// Validate spec `id`; `mode` overrides the configured one
///
/// In soft mode, warnings of an error-free run are stored in the document's
/// `metadata.validation_warnings`. A clean run empties a previously stored
/// list and otherwise leaves the file alone.
///
/// # Errors
/// Returns error if the spec is missing, unreadable, not decodable, or the
/// warnings cannot be written back.
pub fn validate_spec(
    project: &Project,
    id: &str,
    mode: Option<ValidationMode>,
) -> ProjectResult<ValidationOutcome> {
    let path = resolve_spec_path(&project.layout().specs_dir(), id)?;
    let raw = fs::read_to_string(&path).map_err(|e| ProjectError::io_error(&path, e))?;

    let options = project.validation_options(mode);
    let report = validate(&raw, &options).map_err(|e| match e {
        ValidateError::Parse(source) => ProjectError::Parse {
            path: path.clone(),
            source,
        },
    })?;

    let annotation = if options.mode == ValidationMode::Soft
        && !report.has_errors()
        && (!report.warnings.is_empty() || has_stored_warnings(&raw))
    {
        Some(store_warnings(&path, &report.warnings)?)
    } else {
        None
    };

    Ok(ValidationOutcome {
        id: id.to_string(),
        mode: options.mode,
        path,
        report,
        annotation,
    })
}

fn has_stored_warnings(raw: &str) -> bool {
    serde_yaml::from_str::<Spec>(raw)
        .is_ok_and(|spec| !spec.metadata.validation_warnings.is_empty())
}

/// A decoded spec with its content hash
#[derive(Debug, Clone)]
pub struct SpecDetails {
    pub path: PathBuf,
    pub raw: String,
    pub spec: Spec,
    pub hash: SpecHash,
}

/// Load spec `id` for display
///
/// # Errors
/// Returns error if the spec is missing, unreadable or not decodable.
pub fn spec_details(project: &Project, id: &str) -> ProjectResult<SpecDetails> {
    let path = resolve_spec_path(&project.layout().specs_dir(), id)?;
    let raw = fs::read_to_string(&path).map_err(|e| ProjectError::io_error(&path, e))?;
    let spec = load_spec(&path)?;
    let hash = spec_hash(&spec)?;
    Ok(SpecDetails {
        path,
        raw,
        spec,
        hash,
    })
}

/// Latest suggestion artifact of one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionReview {
    pub file_name: String,
    pub path: PathBuf,
    pub suggestion: Suggestion,
}

impl SuggestionReview {
    /// Proposed entries per section, in document order
    #[must_use]
    pub fn counts(&self) -> Vec<(SuggestionSection, usize)> {
        SuggestionSection::ALL
            .into_iter()
            .map(|section| (section, self.suggestion.item_count(section)))
            .collect()
    }
}

/// Load the latest suggestion artifact for `id`
///
/// # Errors
/// Returns error if no artifact exists or it cannot be read.
pub fn review_suggestions(project: &Project, id: &str) -> ProjectResult<SuggestionReview> {
    let (suggestion, path) = load_latest(&project.layout().suggestions_dir(), id)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SuggestionReview {
        file_name,
        path,
        suggestion,
    })
}

/// Merge the chosen sections of the latest suggestion into spec `id`
///
/// Returns the sections written; an empty selection writes nothing.
///
/// # Errors
/// Returns error if the artifact or spec is missing, or the merge fails.
pub fn apply_suggestions(
    project: &Project,
    id: &str,
    selection: &[SuggestionSection],
) -> ProjectResult<Vec<SuggestionSection>> {
    let (suggestion, artifact) = load_latest(&project.layout().suggestions_dir(), id)?;
    let path = resolve_spec_path(&project.layout().specs_dir(), id)?;
    tracing::debug!(
        artifact = %artifact.display(),
        spec = %path.display(),
        ?selection,
        "applying suggestions"
    );
    Ok(apply_suggestion(&path, &suggestion.select(selection))?)
}

/// Files written when suggestions are requested for a spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Blank suggestion artifact to fill in
    pub template: PathBuf,
    /// Brief describing the spec and pointing at the template
    pub brief: PathBuf,
}

/// Create a blank suggestion artifact and its brief for an existing spec
///
/// # Errors
/// Returns error if the spec is missing or undecodable, or either file
/// cannot be written.
pub fn create_suggestion_template(
    project: &Project,
    id: &str,
    clock: &dyn Clock,
) -> ProjectResult<SuggestionRequest> {
    let spec = load_spec(&resolve_spec_path(&project.layout().specs_dir(), id)?)?;
    let dir = project.layout().suggestions_dir();
    fs::create_dir_all(&dir).map_err(|e| ProjectError::io_error(&dir, e))?;
    let template = create_template(&dir, id, clock)?;
    let brief = write_suggestion_brief(&project.layout().briefs_dir(), &spec, &template, clock)?;
    Ok(SuggestionRequest { template, brief })
}

/// Create a research artifact for `id` in the configured research directory
///
/// # Errors
/// Returns error if the artifact cannot be written.
pub fn create_research(project: &Project, id: &str, clock: &dyn Clock) -> ProjectResult<PathBuf> {
    create_research_artifact(&project.research_dir(), id, clock)
}

/// Create a new spec template under the next free id
///
/// # Errors
/// Returns error if the template cannot be written.
pub fn create_spec(project: &Project, clock: &dyn Clock) -> ProjectResult<PathBuf> {
    create_spec_template(&project.layout().specs_dir(), clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prd_test_utils::{
        fixed_clock, TestProject, SAMPLE_RESEARCH_PATH, SAMPLE_SPEC, SAMPLE_SUGGESTION,
    };

    fn open(fixture: &TestProject) -> Project {
        Project::open(fixture.root()).unwrap()
    }

    #[test]
    fn clean_spec_validates_without_writing() {
        let fixture = TestProject::sample();
        let outcome = validate_spec(&open(&fixture), "PRD-001", Some(ValidationMode::Hard)).unwrap();
        assert!(outcome.report.is_clean(), "{:?}", outcome.report);
        assert_eq!(outcome.annotation, None);
        assert_eq!(fixture.read_spec("PRD-001"), SAMPLE_SPEC);
    }

    #[test]
    fn unknown_spec_is_not_found() {
        let fixture = TestProject::new();
        let err = validate_spec(&open(&fixture), "PRD-404", None).unwrap_err();
        assert!(matches!(err, ProjectError::SpecNotFound(id) if id == "PRD-404"));
    }

    #[test]
    fn undecodable_spec_reports_path() {
        let fixture = TestProject::new().with_spec("PRD-001", "id: [unclosed\n");
        let err = validate_spec(&open(&fixture), "PRD-001", None).unwrap_err();
        assert!(matches!(err, ProjectError::Parse { path, .. } if path == fixture.spec_path("PRD-001")));
    }

    #[test]
    fn soft_mode_stores_warnings() {
        // Research file absent: evidence issues become warnings.
        let fixture = TestProject::new().with_spec("PRD-001", SAMPLE_SPEC);
        let outcome = validate_spec(&open(&fixture), "PRD-001", Some(ValidationMode::Soft)).unwrap();
        assert!(outcome.report.errors.is_empty());
        assert_eq!(outcome.report.warnings.len(), 2);
        assert_eq!(outcome.annotation, Some(Annotation::Stored));

        let stored = load_spec(&fixture.spec_path("PRD-001")).unwrap();
        assert_eq!(stored.metadata.validation_warnings, outcome.report.warnings);
    }

    #[test]
    fn hard_mode_never_writes() {
        let fixture = TestProject::new().with_spec("PRD-001", SAMPLE_SPEC);
        let outcome = validate_spec(&open(&fixture), "PRD-001", Some(ValidationMode::Hard)).unwrap();
        assert_eq!(outcome.report.errors.len(), 2);
        assert_eq!(outcome.annotation, None);
        assert_eq!(fixture.read_spec("PRD-001"), SAMPLE_SPEC);
    }

    #[test]
    fn clean_soft_run_clears_stale_warnings() {
        let fixture = TestProject::sample();
        let project = open(&fixture);
        let path = fixture.spec_path("PRD-001");
        store_warnings(&path, &["market research is empty".to_string()]).unwrap();

        let outcome = validate_spec(&project, "PRD-001", Some(ValidationMode::Soft)).unwrap();
        assert!(outcome.report.is_clean(), "{:?}", outcome.report);
        assert_eq!(outcome.annotation, Some(Annotation::Stored));
        assert!(load_spec(&path).unwrap().metadata.validation_warnings.is_empty());

        let cleared = fixture.read_spec("PRD-001");
        let again = validate_spec(&project, "PRD-001", Some(ValidationMode::Soft)).unwrap();
        assert_eq!(again.annotation, None);
        assert_eq!(fixture.read_spec("PRD-001"), cleared);
    }

    #[test]
    fn outcome_json_shape() {
        let outcome = ValidationOutcome {
            id: "PRD-001".to_string(),
            mode: ValidationMode::Soft,
            path: PathBuf::from("PRD-001.yaml"),
            report: ValidationReport {
                errors: Vec::new(),
                warnings: vec!["market research is empty".to_string()],
            },
            annotation: None,
        };
        let json: serde_json::Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "PRD-001",
                "mode": "soft",
                "errors": [],
                "warnings": ["market research is empty"],
            })
        );
    }

    #[test]
    fn details_hash_ignores_warnings() {
        let fixture = TestProject::sample();
        let project = open(&fixture);
        let before = spec_details(&project, "PRD-001").unwrap();
        assert_eq!(before.spec.title, "Offline sync");

        store_warnings(&before.path, &["nag".to_string()]).unwrap();
        let after = spec_details(&project, "PRD-001").unwrap();
        assert_eq!(before.hash, after.hash);
    }

    #[test]
    fn review_counts_latest_artifact() {
        let fixture = TestProject::sample()
            .with_suggestion("PRD-001", "20260101-000000", "# Suggestions for PRD-001\n")
            .with_suggestion("PRD-001", "20260115-093000", SAMPLE_SUGGESTION);
        let review = review_suggestions(&open(&fixture), "PRD-001").unwrap();
        assert_eq!(review.file_name, "PRD-001-20260115-093000.md");
        assert_eq!(
            review.counts(),
            vec![
                (SuggestionSection::Summary, 1),
                (SuggestionSection::Requirements, 3),
                (SuggestionSection::CriticalUserJourneys, 1),
                (SuggestionSection::MarketResearch, 0),
                (SuggestionSection::CompetitiveLandscape, 0),
            ]
        );
    }

    #[test]
    fn review_without_artifacts_fails() {
        let fixture = TestProject::sample();
        let err = review_suggestions(&open(&fixture), "PRD-001").unwrap_err();
        assert!(matches!(err, ProjectError::Suggest(_)));
    }

    #[test]
    fn apply_only_selected_sections() {
        let fixture = TestProject::sample().with_suggestion(
            "PRD-001",
            "20260115-093000",
            SAMPLE_SUGGESTION,
        );
        let project = open(&fixture);
        let applied =
            apply_suggestions(&project, "PRD-001", &[SuggestionSection::Requirements]).unwrap();
        assert_eq!(applied, vec![SuggestionSection::Requirements]);

        let spec = load_spec(&fixture.spec_path("PRD-001")).unwrap();
        assert_eq!(spec.requirements.len(), 3);
        assert_eq!(
            spec.summary,
            "Queue edits locally and replay them when the device reconnects."
        );
    }

    #[test]
    fn empty_selection_leaves_spec_untouched() {
        let fixture = TestProject::sample().with_suggestion(
            "PRD-001",
            "20260115-093000",
            SAMPLE_SUGGESTION,
        );
        let applied = apply_suggestions(&open(&fixture), "PRD-001", &[]).unwrap();
        assert!(applied.is_empty());
        assert_eq!(fixture.read_spec("PRD-001"), SAMPLE_SPEC);
    }

    #[test]
    fn suggestion_template_requires_spec() {
        let fixture = TestProject::new();
        let project = open(&fixture);
        assert!(matches!(
            create_suggestion_template(&project, "PRD-001", &fixed_clock()),
            Err(ProjectError::SpecNotFound(_))
        ));

        let fixture = TestProject::sample();
        let request = create_suggestion_template(&open(&fixture), "PRD-001", &fixed_clock()).unwrap();
        assert_eq!(
            request.template,
            fixture.suggestions_dir().join("PRD-001-20260115-093000.md")
        );
        assert_eq!(
            request.brief,
            fixture.root().join(".prd/briefs/PRD-001-20260115-093000.md")
        );

        let brief = fs::read_to_string(&request.brief).unwrap();
        assert!(brief.starts_with("PRD: PRD-001\nTitle: Offline sync\n"));
        assert!(brief.contains("Acceptance Criteria:\n- Edits made offline appear on the server after reconnect\n"));
        assert!(brief.contains(&format!("Research:\n- {SAMPLE_RESEARCH_PATH}\n")));
        assert!(brief.ends_with(&format!("  {}\n", request.template.display())));
    }

    #[test]
    fn research_goes_to_configured_dir() {
        let fixture = TestProject::new();
        fs::write(
            fixture.root().join(".prd/config.toml"),
            "research_dir = \"docs/research\"\n",
        )
        .unwrap();
        let path = create_research(&open(&fixture), "PRD-001", &fixed_clock()).unwrap();
        assert_eq!(
            path,
            fixture.root().join("docs/research/PRD-001-20260115-093000.md")
        );
    }

    #[test]
    fn new_spec_takes_next_id() {
        let fixture = TestProject::sample();
        let path = create_spec(&open(&fixture), &fixed_clock()).unwrap();
        assert_eq!(path, fixture.spec_path("PRD-002"));
    }
}
