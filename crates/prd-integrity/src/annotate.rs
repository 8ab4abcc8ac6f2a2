//! Validation warning annotation
//!
//! Writes `metadata.validation_warnings` into an existing spec document.
//! Only the lines of that one entry change; the rest of the file keeps its
//! text byte for byte. The generic YAML tree, never the typed
//! [`Spec`](prd_model::Spec), is the reference the edited text must parse
//! back to, so keys the model does not know survive.

use crate::error::AnnotateError;
use prd_model::splice::{first_faithful, render_entry, replace_entry, replace_nested_entry};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const METADATA_KEY: &str = "metadata";
const WARNINGS_KEY: &str = "validation_warnings";

/// What the annotation writer did to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Warnings were stored
    Stored,
    /// Document root is not a mapping; left as is
    Skipped,
}

/// Store `warnings` in the spec document at `path`
///
/// # Errors
/// Returns error if the file cannot be read, parsed or written back.
pub fn store_warnings(path: &Path, warnings: &[String]) -> Result<Annotation, AnnotateError> {
    let raw = fs::read_to_string(path).map_err(|e| AnnotateError::io_error(path, e))?;
    let (annotated, outcome) = annotate_document(&raw, warnings).map_err(|e| match e {
        AnnotateError::Parse { source, .. } => AnnotateError::parse_error(path, source),
        other => other,
    })?;

    match outcome {
        Annotation::Stored => {
            fs::write(path, annotated).map_err(|e| AnnotateError::io_error(path, e))?;
            tracing::info!(path = %path.display(), count = warnings.len(), "stored validation warnings");
        }
        Annotation::Skipped => {
            tracing::warn!(path = %path.display(), "spec root is not a mapping; warnings not stored");
        }
    }
    Ok(outcome)
}

/// Annotate a document held in memory
///
/// Returns the rewritten text, or the input unchanged with
/// [`Annotation::Skipped`] when the root is not a mapping.
///
/// # Errors
/// Returns error if `raw` is not parseable YAML.
pub fn annotate_document(
    raw: &str,
    warnings: &[String],
) -> Result<(String, Annotation), AnnotateError> {
    let mut doc: Value =
        serde_yaml::from_str(raw).map_err(|e| AnnotateError::parse_error("<memory>", e))?;

    let Value::Mapping(root) = &mut doc else {
        return Ok((raw.to_string(), Annotation::Skipped));
    };
    set_warnings(root, warnings);

    let mut candidates = Vec::with_capacity(2);
    if let Some(text) = replace_nested_entry(raw, METADATA_KEY, WARNINGS_KEY, warnings)
        .map_err(AnnotateError::Serialize)?
    {
        candidates.push(text);
    }
    if let Some(metadata) = doc.get(METADATA_KEY) {
        let rendered = render_entry(METADATA_KEY, metadata, 0).map_err(AnnotateError::Serialize)?;
        candidates.push(replace_entry(raw, METADATA_KEY, &rendered));
    }

    let out = match first_faithful(&doc, candidates) {
        Some(text) => text,
        None => {
            tracing::debug!("document layout not editable entry by entry; rewriting whole tree");
            serde_yaml::to_string(&doc).map_err(AnnotateError::Serialize)?
        }
    };
    Ok((out, Annotation::Stored))
}

/// Locate or create `metadata` and overwrite its warnings in place
fn set_warnings(root: &mut Mapping, warnings: &[String]) {
    let list = Value::Sequence(warnings.iter().cloned().map(Value::String).collect());
    let slot = root
        .entry(Value::String(METADATA_KEY.to_string()))
        .or_insert_with(|| Value::Mapping(Mapping::new()));

    match slot {
        Value::Mapping(meta) => {
            meta.insert(Value::String(WARNINGS_KEY.to_string()), list);
        }
        other => {
            let mut meta = Mapping::new();
            meta.insert(Value::String(WARNINGS_KEY.to_string()), list);
            *other = Value::Mapping(meta);
        }
    }
}
