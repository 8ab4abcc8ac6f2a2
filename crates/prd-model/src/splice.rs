//! Line-level edits of block-style YAML mappings
//!
//! Replaces the text of single mapping entries and leaves every other line
//! exactly as written, so comments, quoting and indentation outside the
//! edited entry survive. Only block mappings are recognized. Callers check
//! each candidate with [`first_faithful`] and fall back to re-serializing
//! the whole tree when the text has a shape this module does not handle.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::ops::Range;

/// One `key: value` entry of a block mapping, as a range of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    /// Line holding the key
    pub start: usize,
    /// One past the last value line; trailing blank and comment lines
    /// belong to whatever follows
    pub end: usize,
    /// Text after the colon is a value, not blank or a comment
    pub inline: bool,
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_filler(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Key and remainder of a `key: ...` line indented by exactly `indent`
fn split_key(line: &str, indent: usize) -> Option<(String, &str)> {
    if indent_of(line) != indent {
        return None;
    }
    let body = line[indent..].trim_end_matches(['\n', '\r']);
    let first = body.chars().next()?;
    if matches!(first, '#' | '[' | '{' | '?' | '&' | '*' | '!' | '|' | '>' | '%' | '@' | '`') {
        return None;
    }
    if body.starts_with("---") || body.starts_with("...") {
        return None;
    }
    if body == "-" || body.starts_with("- ") {
        return None;
    }

    if first == '"' || first == '\'' {
        let close = body[1..].find(first)? + 1;
        let rest = body[close + 1..].trim_start().strip_prefix(':')?;
        return Some((body[1..close].to_string(), rest));
    }
    let colon = body.char_indices().find_map(|(i, c)| {
        let after = &body[i + c.len_utf8()..];
        (c == ':' && after.chars().next().map_or(true, char::is_whitespace)).then_some(i)
    })?;
    Some((body[..colon].trim_end().to_string(), &body[colon + 1..]))
}

/// Entries whose keys sit at `indent` within `lines[range]`
#[must_use]
pub fn entries(lines: &[&str], indent: usize, range: Range<usize>) -> Vec<Entry> {
    let starts: Vec<(usize, String, bool)> = range
        .clone()
        .filter_map(|i| {
            split_key(lines[i], indent).map(|(key, rest)| {
                let rest = rest.trim();
                (i, key, !rest.is_empty() && !rest.starts_with('#'))
            })
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, (start, key, inline))| {
            let limit = starts.get(n + 1).map_or(range.end, |next| next.0);
            let mut end = limit;
            while end > start + 1 && is_filler(lines[end - 1]) {
                end -= 1;
            }
            Entry {
                key: key.clone(),
                start: *start,
                end,
                inline: *inline,
            }
        })
        .collect()
}

/// Lines of `raw`, each keeping its terminator
#[must_use]
pub fn lines(raw: &str) -> Vec<&str> {
    raw.split_inclusive('\n').collect()
}

/// Block YAML for `key: value`, every line indented by `indent` spaces
///
/// # Errors
/// Returns error if `value` does not serialize.
pub fn render_entry<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
    indent: usize,
) -> Result<String, serde_yaml::Error> {
    let mut map = Mapping::new();
    map.insert(Value::String(key.to_string()), serde_yaml::to_value(value)?);
    let text = serde_yaml::to_string(&map)?;

    let pad = " ".repeat(indent);
    Ok(text
        .lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{pad}{line}\n")
            }
        })
        .collect())
}

fn splice(lines: &[&str], range: Range<usize>, rendered: &str) -> String {
    let mut out: String = lines[..range.start].concat();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(rendered);
    out.push_str(&lines[range.end..].concat());
    out
}

/// Swap the top-level entry `key` for `rendered`, appending when absent
#[must_use]
pub fn replace_entry(raw: &str, key: &str, rendered: &str) -> String {
    let lines = lines(raw);
    let range = entries(&lines, 0, 0..lines.len())
        .into_iter()
        .find(|entry| entry.key == key)
        .map_or(lines.len()..lines.len(), |entry| entry.start..entry.end);
    splice(&lines, range, rendered)
}

/// Set `key` inside the top-level block mapping `parent`
///
/// The new entry takes the indentation of the parent's existing children
/// (two spaces for an empty parent) and goes after them when absent.
/// Returns `None` when `parent` is missing or written inline.
///
/// # Errors
/// Returns error if `value` does not serialize.
pub fn replace_nested_entry<T: Serialize + ?Sized>(
    raw: &str,
    parent: &str,
    key: &str,
    value: &T,
) -> Result<Option<String>, serde_yaml::Error> {
    let lines = lines(raw);
    let Some(outer) = entries(&lines, 0, 0..lines.len())
        .into_iter()
        .find(|entry| entry.key == parent)
    else {
        return Ok(None);
    };
    if outer.inline {
        return Ok(None);
    }

    let body = outer.start + 1..outer.end;
    let indent = body
        .clone()
        .map(|i| lines[i])
        .find(|line| !is_filler(line))
        .map_or(2, indent_of);
    if indent == 0 {
        return Ok(None);
    }

    let range = entries(&lines, indent, body)
        .into_iter()
        .find(|entry| entry.key == key)
        .map_or(outer.end..outer.end, |entry| entry.start..entry.end);
    Ok(Some(splice(&lines, range, &render_entry(key, value, indent)?)))
}

/// First candidate text that parses back to `expected`
#[must_use]
pub fn first_faithful<I>(expected: &Value, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .find(|text| serde_yaml::from_str::<Value>(text).is_ok_and(|value| &value == expected))
}
