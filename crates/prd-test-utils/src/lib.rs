//! Testing utilities for PRD workspace
//! 
//! Shared fixtures and a throwaway project directory builder.

#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use prd_model::FixedClock;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Research file every evidence ref in [`SAMPLE_SPEC`] points at
pub const SAMPLE_RESEARCH_PATH: &str = ".prd/research/PRD-001-20260115-000000.md";

/// Complete, valid spec; passes hard mode once the research file exists
pub const SAMPLE_SPEC: &str = r#"id: "PRD-001"
title: "Offline sync"
created_at: "2026-01-15T00:00:00Z"
strategic_context:
  cuj_id: "CUJ-1"
  cuj_name: "Sync on the go"
  feature_id: "offline-sync"
  mvp_included: true
user_story:
  text: "As a field worker, I want edits to sync later so that I can work offline."
  hash: "pending"
summary: "Queue edits locally and replay them when the device reconnects."
requirements:
  - "REQ-001: Queue edits while offline"
  - "REQ-002: Replay queued edits in order"
acceptance_criteria:
  - id: "ac-1"
    description: "Edits made offline appear on the server after reconnect"
files_to_modify:
  - action: "create"
    path: "src/sync/queue.rs"
    description: "Edit queue"
critical_user_journeys:
  - id: "CUJ-001"
    title: "Edit offline"
    priority: "high"
    steps:
      - "Disconnect"
      - "Edit a record"
    success_criteria:
      - "Edit is queued"
    linked_requirements:
      - "REQ-001"
  - id: "CUJ-002"
    title: "Reconnect"
    priority: "critical"
    steps:
      - "Reconnect"
    success_criteria:
      - "Queue drains"
    linked_requirements:
      - "REQ-002"
market_research:
  - id: "MR-001"
    claim: "Field teams lose connectivity daily"
    evidence_refs:
      - path: ".prd/research/PRD-001-20260115-000000.md"
        anchor: "connectivity"
        note: "Survey result"
    confidence: "medium"
    date: "2026-01-15"
competitive_landscape:
  - id: "COMP-001"
    name: "SyncCo"
    positioning: "Enterprise"
    strengths:
      - "Mature"
    weaknesses:
      - "Expensive"
    risk: "Medium"
    evidence_refs:
      - path: ".prd/research/PRD-001-20260115-000000.md"
        anchor: "competitors"
        note: "Pricing page"
research:
  - ".prd/research/PRD-001-20260115-000000.md"
complexity: "medium"
estimated_minutes: 25
priority: 1
"#;

/// Suggestion artifact proposing a new summary and one extra requirement
pub const SAMPLE_SUGGESTION: &str = r#"# Suggestions for PRD-001

## Summary
- status: pending
- suggestion: "Queue edits locally, replay them in order, and surface conflicts."

## Requirements
- status: pending
- suggestion:
  - "REQ-001: Queue edits while offline"
  - "REQ-002: Replay queued edits in order"
  - "REQ-003: Report conflicting edits"

## Critical User Journeys
- status: pending
- suggestion:
  - id: "CUJ-001"
    title: "Edit offline"
    priority: "high"
    steps:
      - "Disconnect"
      - "Edit a record"
    success_criteria:
      - "Edit is queued"
    linked_requirements:
      - "REQ-001"
"#;

/// Clock pinned to 2026-01-15T09:30:00Z
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap())
}

/// Temporary project directory with the `.prd` tree in place
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["specs", "research", "suggestions", "briefs"] {
            fs::create_dir_all(dir.path().join(".prd").join(sub)).unwrap();
        }
        Self { dir }
    }

    /// Project holding [`SAMPLE_SPEC`] and its research file
    pub fn sample() -> Self {
        Self::new()
            .with_spec("PRD-001", SAMPLE_SPEC)
            .with_research(SAMPLE_RESEARCH_PATH)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn spec_path(&self, id: &str) -> PathBuf {
        self.root().join(".prd/specs").join(format!("{id}.yaml"))
    }

    pub fn suggestions_dir(&self) -> PathBuf {
        self.root().join(".prd/suggestions")
    }

    pub fn with_spec(self, id: &str, content: &str) -> Self {
        fs::write(self.spec_path(id), content).unwrap();
        self
    }

    /// Create an empty file at `rel` under the project root
    pub fn with_research(self, rel: &str) -> Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "# Research\n").unwrap();
        self
    }

    /// Write a suggestion artifact named `<id>-<stamp>.md`
    pub fn with_suggestion(self, id: &str, stamp: &str, content: &str) -> Self {
        fs::write(self.suggestions_dir().join(format!("{id}-{stamp}.md")), content).unwrap();
        self
    }

    pub fn read_spec(&self, id: &str) -> String {
        fs::read_to_string(self.spec_path(id)).unwrap()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
