// Mapper file location and document handling

pub mod document;

use std::path::{Path, PathBuf};

use crate::config::LayoutConfig;
use crate::error::{GeneratorError, Result};

pub use document::{append_fragment, new_document, read_namespace};

/// Where a data-access interface's queries are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperTarget {
    /// Dotted interface path, e.g. `com.acme.user.UserMapper`
    pub namespace: String,
    /// e.g. `User_SQL.xml`
    pub file_name: String,
    pub path: PathBuf,
}

/// Derive the mapper namespace and output file from the interface's source path.
///
/// `src/main/java/com/acme/UserMapper.java` gives namespace `com.acme.UserMapper`
/// and file `<workspace>/<mapper_dir>/User_SQL.xml`.
pub fn derive_target(current_file: &Path, workspace_root: &Path, layout: &LayoutConfig) -> Result<MapperTarget> {
    let raw = current_file.to_string_lossy();
    let normalized = raw.replace('\\', "/");
    let marker = layout.source_root_marker.replace('\\', "/");

    let mismatch = |marker: &str| GeneratorError::PathPatternMismatch {
        path: raw.to_string(),
        marker: marker.to_string(),
    };

    let idx = normalized.find(&marker).ok_or_else(|| mismatch(&marker))?;
    let relative = &normalized[idx + marker.len()..];
    let relative = relative.strip_suffix(&layout.source_suffix).unwrap_or(relative);
    let namespace = relative.trim_matches('/').replace('/', ".");

    let source_name = normalized.rsplit('/').next().unwrap_or(&normalized);
    let stem_len = source_name
        .find(&layout.mapper_suffix)
        .ok_or_else(|| mismatch(&layout.mapper_suffix))?;
    let file_name = format!("{}{}", &source_name[..stem_len], layout.output_suffix);

    let path = workspace_root.join(&layout.mapper_dir).join(&file_name);

    Ok(MapperTarget {
        namespace,
        file_name,
        path,
    })
}
