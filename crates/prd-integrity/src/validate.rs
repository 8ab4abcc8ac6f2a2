//! Spec validation rules
//!
//! Every rule runs on every call; nothing short-circuits. Structural
//! defects (required fields, ids, priorities) are always errors. Gaps in
//! completeness (links, evidence) are routed by [`ValidationMode`]: errors
//! in hard mode, warnings in soft mode.

use crate::error::{InvalidMode, ValidateError};
use prd_model::{
    CompetitiveLandscapeItem, CujPriority, EvidenceRef, MarketResearchItem, Spec,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Research directory relative to the project root
pub const DEFAULT_RESEARCH_DIR: &str = ".prd/research";

/// Severity regime for completeness issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Completeness issues block
    Hard,
    /// Completeness issues nag
    #[default]
    Soft,
}

impl ValidationMode {
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hard => "hard",
            Self::Soft => "soft",
        }
    }
}

impl Display for ValidationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hard" => Ok(Self::Hard),
            "soft" => Ok(Self::Soft),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}

/// Inputs that shape a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub mode: ValidationMode,
    /// Project root; evidence paths resolve against it
    pub root: PathBuf,
    /// Research directory, relative to `root`
    pub research_dir: PathBuf,
}

impl ValidationOptions {
    /// Options with the default research directory
    #[must_use]
    pub fn new(mode: ValidationMode, root: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            root: root.into(),
            research_dir: PathBuf::from(DEFAULT_RESEARCH_DIR),
        }
    }

    /// With a different research directory
    #[must_use]
    pub fn with_research_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.research_dir = dir.into();
        self
    }
}

/// Accumulated findings of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Routes findings into errors or warnings
struct Findings {
    mode: ValidationMode,
    report: ValidationReport,
}

impl Findings {
    fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            report: ValidationReport::default(),
        }
    }

    fn error(&mut self, message: String) {
        tracing::debug!(%message, "validation error");
        self.report.errors.push(message);
    }

    fn warning(&mut self, message: String) {
        tracing::debug!(%message, "validation warning");
        self.report.warnings.push(message);
    }

    /// Completeness issue: severity follows the mode
    fn issue(&mut self, message: String) {
        match self.mode {
            ValidationMode::Hard => self.error(message),
            ValidationMode::Soft => self.warning(message),
        }
    }
}

/// Parse and validate a raw spec document
///
/// # Errors
/// Returns [`ValidateError::Parse`] only when the document cannot be
/// decoded; rule violations are reported in the returned report.
pub fn validate(raw: &str, options: &ValidationOptions) -> Result<ValidationReport, ValidateError> {
    let spec: Spec = serde_yaml::from_str(raw)?;
    Ok(validate_spec(&spec, options))
}

/// Validate an already decoded spec
#[must_use]
pub fn validate_spec(spec: &Spec, options: &ValidationOptions) -> ValidationReport {
    let mut findings = Findings::new(options.mode);

    check_required_fields(spec, &mut findings);
    check_journeys(spec, &mut findings);

    let evidence = EvidenceCheck::new(options);
    check_research_items("market research", &spec.market_research, &evidence, &mut findings);
    check_research_items(
        "competitive landscape",
        &spec.competitive_landscape,
        &evidence,
        &mut findings,
    );

    let report = findings.report;
    tracing::debug!(
        id = %spec.id,
        mode = %options.mode,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated spec"
    );
    report
}

fn check_required_fields(spec: &Spec, findings: &mut Findings) {
    for (name, value) in [
        ("id", &spec.id),
        ("title", &spec.title),
        ("summary", &spec.summary),
    ] {
        if value.trim().is_empty() {
            findings.error(format!("missing required field: {name}"));
        }
    }
}

fn check_journeys(spec: &Spec, findings: &mut Findings) {
    let known: HashSet<&str> = spec.requirement_tokens().into_iter().collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, cuj) in spec.critical_user_journeys.iter().enumerate() {
        let id = cuj.id.trim();
        let label = item_label("cuj", id, index);

        // Independent checks: a repeated blank id fires both.
        if id.is_empty() {
            findings.error(format!("{label} missing id"));
        }
        if !seen.insert(id) {
            findings.error(format!("duplicate cuj id: {id}"));
        }

        if cuj.priority.parse::<CujPriority>().is_err() {
            findings.error(format!(
                "{label} has invalid priority {:?} (expected one of critical, high, med, low)",
                cuj.priority
            ));
        }

        if cuj.linked_requirements.is_empty() {
            findings.issue(format!("{label} has no linked requirements"));
        }
        for link in &cuj.linked_requirements {
            let link = link.trim();
            if !known.contains(link) {
                findings.issue(format!("{label} links unknown requirement {link:?}"));
            }
        }
    }
}

/// Claim backed by research evidence
trait ResearchItem {
    fn id(&self) -> &str;
    fn evidence_refs(&self) -> &[EvidenceRef];
}

impl ResearchItem for MarketResearchItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }
}

impl ResearchItem for CompetitiveLandscapeItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }
}

fn check_research_items<T: ResearchItem>(
    section: &str,
    items: &[T],
    evidence: &EvidenceCheck<'_>,
    findings: &mut Findings,
) {
    if items.is_empty() {
        findings.warning(format!("{section} is empty"));
        return;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let id = item.id().trim();
        let label = item_label(section, id, index);

        if id.is_empty() {
            findings.error(format!("{label} missing id"));
        }
        if !seen.insert(id) {
            findings.error(format!("duplicate {section} id: {id}"));
        }

        evidence.check(&label, item.evidence_refs(), findings);
    }
}

fn item_label(section: &str, id: &str, index: usize) -> String {
    if id.is_empty() {
        format!("{section}[{index}]")
    } else {
        format!("{section} {id}")
    }
}

/// Evidence path resolution against the research directory
struct EvidenceCheck<'a> {
    root: &'a Path,
    research_dir: PathBuf,
}

impl<'a> EvidenceCheck<'a> {
    fn new(options: &'a ValidationOptions) -> Self {
        Self {
            root: &options.root,
            research_dir: normalize_relative(&options.research_dir)
                .unwrap_or_else(|| options.research_dir.clone()),
        }
    }

    fn check(&self, label: &str, refs: &[EvidenceRef], findings: &mut Findings) {
        if refs.is_empty() {
            findings.issue(format!("{label} has no evidence refs"));
            return;
        }

        for (index, evidence) in refs.iter().enumerate() {
            let raw = evidence.path.trim();
            if raw.is_empty() {
                findings.issue(format!("{label} evidence ref {index} has empty path"));
                continue;
            }
            let Some(relative) = self.within_research_dir(raw) else {
                findings.issue(format!(
                    "{label} evidence path outside {}: {raw}",
                    self.research_dir.display()
                ));
                continue;
            };
            if !self.root.join(&relative).is_file() {
                findings.issue(format!("{label} evidence file not found: {raw}"));
            }
        }
    }

    fn within_research_dir(&self, raw: &str) -> Option<PathBuf> {
        normalize_relative(Path::new(raw)).filter(|p| p.starts_with(&self.research_dir))
    }
}

/// Relative path with `.` segments removed; `None` for absolute paths or
/// paths that climb with `..`
fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
