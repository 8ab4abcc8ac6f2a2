//! Research artifacts
//!
//! Timestamped Markdown notes that evidence refs point into.

use crate::error::{ProjectError, ProjectResult};
use prd_model::{artifact_timestamp, Clock};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create an empty research artifact for spec `id` in `dir`
///
/// # Errors
/// Returns error if the directory or file cannot be created, or the
/// artifact for this timestamp already exists.
pub fn create_research_artifact(dir: &Path, id: &str, clock: &dyn Clock) -> ProjectResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ProjectError::io_error(dir, e))?;
    let path = dir.join(format!("{id}-{}.md", artifact_timestamp(clock.now())));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| ProjectError::io_error(&path, e))?;
    file.write_all(research_body(id).as_bytes())
        .map_err(|e| ProjectError::io_error(&path, e))?;

    tracing::info!(%id, path = %path.display(), "created research artifact");
    Ok(path)
}

fn research_body(id: &str) -> String {
    format!("# Research for {id}\n\n- Competitive analysis:\n- Market summary:\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prd_model::FixedClock;

    #[test]
    fn artifact_is_named_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let research = dir.path().join("research");
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap());

        let path = create_research_artifact(&research, "PRD-001", &clock).unwrap();
        assert_eq!(path, research.join("PRD-001-20260115-000000.md"));
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("# Research for PRD-001\n"));

        assert!(create_research_artifact(&research, "PRD-001", &clock).is_err());
    }
}
