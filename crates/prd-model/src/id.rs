//! Spec identifiers
//!
//! Specs are numbered `PRD-001`, `PRD-002`, ... and stored one per file as
//! `<id>.yaml` (or `<id>.yml`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier prefix shared by all specs
pub const SPEC_ID_PREFIX: &str = "PRD-";

static SPEC_FILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PRD-(\d+)\.ya?ml$").expect("static pattern"));

/// Format the id for spec number `n` (zero-padded to three digits)
#[inline]
#[must_use]
pub fn format_spec_id(n: u32) -> String {
    format!("{SPEC_ID_PREFIX}{n:03}")
}

/// Spec number encoded in a spec file name, if it is one
#[must_use]
pub fn spec_number_from_file_name(name: &str) -> Option<u32> {
    SPEC_FILE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Next id after the highest number among `file_names`
#[must_use]
pub fn next_spec_id<'a>(file_names: impl IntoIterator<Item = &'a str>) -> String {
    let highest = file_names
        .into_iter()
        .filter_map(spec_number_from_file_name)
        .max()
        .unwrap_or(0);
    format_spec_id(highest.saturating_add(1))
}
