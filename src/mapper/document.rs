// Textual mapper document operations
//
// The document is never parsed as XML. Appending splices the fragment in front
// of the closing root tag, which is assumed to sit on the last line.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

pub const CLOSING_TAG: &str = "</mapper>";

const DOCTYPE: &str = r#"<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">"#;

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<mapper\s+namespace\s*=\s*"([^"]*)""#).expect("namespace pattern is valid"));

/// An empty mapper document for `namespace`
pub fn new_document(namespace: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}\n<mapper namespace=\"{}\">\n{}\n",
        DOCTYPE, namespace, CLOSING_TAG
    )
}

/// Insert `fragment` before the closing `</mapper>` line.
///
/// A document written with CRLF line endings keeps them, fragment lines included.
pub fn append_fragment(document: &str, fragment: &str) -> String {
    let eol = line_ending(document);
    let mut lines: Vec<&str> = document.lines().collect();

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    match lines.last() {
        Some(last) if last.trim() == CLOSING_TAG => {
            lines.pop();
        }
        Some(last) => warn!("Last line of mapper document is not {}: {:?}", CLOSING_TAG, last),
        None => warn!("Mapper document is empty"),
    }

    lines.extend(fragment.lines());
    lines.push(CLOSING_TAG);

    let mut out = lines.join(eol);
    out.push_str(eol);
    out
}

fn line_ending(document: &str) -> &'static str {
    if document.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// The root element's `namespace` attribute
pub fn read_namespace(document: &str) -> Option<String> {
    NAMESPACE_RE
        .captures(document)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
