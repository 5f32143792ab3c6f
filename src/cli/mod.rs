// CLI command implementations

pub mod config;
pub mod fields;
pub mod generate;
pub mod parse;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Resolve the selected text from `--selection` or `--selection-file`.
/// `--selection -` reads stdin.
pub fn read_selection(selection: Option<String>, selection_file: Option<&Path>) -> Result<Option<String>> {
    if let Some(path) = selection_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read selection file: {}", path.display()))?;
        return Ok(Some(text));
    }

    match selection.as_deref() {
        Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read selection from stdin")?;
            Ok(Some(text))
        }
        _ => Ok(selection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_selection_file_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snippet.txt");
        std::fs::write(&path, "int countAll();").unwrap();

        let text = read_selection(Some("UserVO selectUser(UserVO vo)".to_string()), Some(&path)).unwrap();
        assert_eq!(text.as_deref(), Some("int countAll();"));
    }

    #[test]
    fn test_inline_selection() {
        let text = read_selection(Some("int countAll();".to_string()), None).unwrap();
        assert_eq!(text.as_deref(), Some("int countAll();"));
        assert_eq!(read_selection(None, None).unwrap(), None);
    }

    #[test]
    fn test_missing_selection_file() {
        let dir = tempdir().unwrap();
        assert!(read_selection(None, Some(&dir.path().join("missing.txt"))).is_err());
    }
}
