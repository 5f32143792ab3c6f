// Method signature extraction
//
// A single regex, not a grammar: optional modifiers, a (possibly generic) return
// type, the method name and a list of `Type ident` parameters. Only the first
// match in the snippet is used.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::FunctionInfo;
use crate::error::{GeneratorError, Result};

static SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:static\s+)?(?:public|private|protected)?\s+)?(\w+(?:<.*?>)?)\s+(\w+)\s*\(\s*((?:\w+(?:<.*?>)?\s+\w+(?:\s*,\s*)?)*)\s*\)",
    )
    .expect("signature pattern is valid")
});

/// Parse the first method-like declaration in `snippet`
pub fn extract_function_info(snippet: &str) -> Result<FunctionInfo> {
    let captures = SIGNATURE_RE
        .captures(snippet)
        .ok_or(GeneratorError::NoSignatureMatch)?;

    let raw_return = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let function_name = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    let raw_params = captures.get(3).map(|m| m.as_str()).unwrap_or_default();

    debug!("Matched signature: {} {}({})", raw_return, function_name, raw_params);

    let params = split_params(raw_params)
        .into_iter()
        .filter_map(param_type)
        .map(|ty| unwrap_list(&ty))
        .collect();

    Ok(FunctionInfo {
        function_name: function_name.to_string(),
        return_type: unwrap_list(raw_return),
        params,
    })
}

/// `List<UserVO>` -> `UserVO`; anything without `List` is returned as is
pub fn unwrap_list(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.contains("List") {
        return raw.to_string();
    }

    let Some(open) = raw.find('<') else {
        return raw.to_string();
    };

    let mut depth = 0usize;
    for (offset, ch) in raw[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return raw[open + 1..open + offset].trim().to_string();
                }
            }
            _ => {}
        }
    }

    // Unbalanced: keep everything after the first '<'
    raw[open + 1..].trim().to_string()
}

/// Split a parameter list on commas that are not inside `<...>`
fn split_params(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, ch) in raw.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Type part of `Type ident`; the identifier is dropped
fn param_type(param: &str) -> Option<String> {
    let param = param.trim();
    match param.rfind(char::is_whitespace) {
        Some(idx) => Some(param[..idx].trim().to_string()),
        None if !param.is_empty() => Some(param.to_string()),
        None => None,
    }
}
