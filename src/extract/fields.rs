// Value-object field extraction and column naming

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::FieldSet;
use crate::error::{GeneratorError, Result};

static FIELD_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*private\s+[^;\n]*;").expect("field pattern is valid"));

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

static CAMEL_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("camel boundary pattern is valid"));

/// Collect the private instance fields of a value object.
///
/// `source` names the file in the error when nothing matches.
pub fn extract_fields(content: &str, source: &str) -> Result<FieldSet> {
    let fields: Vec<String> = FIELD_LINE_RE
        .find_iter(content)
        .filter_map(|m| field_name(m.as_str()))
        .collect();

    if fields.is_empty() {
        return Err(GeneratorError::NoFieldsFound(source.to_string()));
    }

    debug!("Extracted {} fields from {}: {:?}", fields.len(), source, fields);
    Ok(FieldSet::from_camel(fields))
}

/// Third token of `private Type name;`, minus the terminator and any initializer.
/// Anything that is not a plain identifier (`getName()`, `Long>`) is dropped.
fn field_name(line: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // Constants are not columns
    if tokens.contains(&"static") {
        return None;
    }

    let raw = tokens.get(2)?;
    let name = raw.trim_end_matches(';');
    let name = name.split('=').next().unwrap_or(name).trim();

    if IDENTIFIER_RE.is_match(name) {
        Some(name.to_string())
    } else {
        debug!("Skipping non-field line: {}", line.trim());
        None
    }
}

/// `userId` -> `user_id`. Already snake-cased input comes back unchanged.
///
/// A run of capitals stays one word: `userID` -> `user_id`, `URLPath` -> `urlpath`.
pub fn to_snake_case(name: &str) -> String {
    CAMEL_BOUNDARY_RE.replace_all(name, "${1}_${2}").to_lowercase()
}
