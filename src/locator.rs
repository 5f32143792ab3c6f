// Value-object file lookup

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::extract::{extract_fields, FieldSet, FunctionInfo};
use crate::host::Workspace;
use crate::query::{FieldSides, SidesNeeded};

/// Candidate VO source files per side. `None` means the side was not looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoFileReference {
    pub return_vo: Option<Vec<PathBuf>>,
    pub param_vo: Option<Vec<PathBuf>>,
}

/// Look up the VO files for the return type and the first parameter.
/// Sides that are not needed, or have no type name, are skipped.
pub async fn locate_vo_files<W: Workspace>(
    info: &FunctionInfo,
    needed: SidesNeeded,
    workspace: &W,
    config: &Config,
) -> Result<VoFileReference> {
    let mut reference = VoFileReference::default();

    if needed.ret && !info.return_type.is_empty() {
        reference.return_vo = Some(find_vo(&info.return_type, workspace, config).await?);
    }

    if needed.param {
        if let Some(param) = info.first_param() {
            reference.param_vo = Some(find_vo(param, workspace, config).await?);
        }
    }

    Ok(reference)
}

async fn find_vo<W: Workspace>(type_name: &str, workspace: &W, config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = config.vo_glob(type_name);
    let found = workspace.find_files(&pattern).await?;

    if found.len() > 1 {
        warn!(
            "{} files match {}, using the first: {:?}",
            found.len(),
            pattern,
            found
        );
    }
    debug!("{} -> {:?}", pattern, found.first());

    Ok(found)
}

/// Read and extract fields for every side that was looked up
pub async fn load_field_sides<W: Workspace>(
    reference: &VoFileReference,
    info: &FunctionInfo,
    workspace: &W,
    config: &Config,
) -> Result<FieldSides> {
    let param_type = info.first_param().unwrap_or_default();

    let ret = match &reference.return_vo {
        Some(paths) => Some(load_fields(paths, &info.return_type, workspace, config).await?),
        None => None,
    };
    let param = match &reference.param_vo {
        Some(paths) => Some(load_fields(paths, param_type, workspace, config).await?),
        None => None,
    };

    Ok(FieldSides { param, ret })
}

async fn load_fields<W: Workspace>(
    paths: &[PathBuf],
    type_name: &str,
    workspace: &W,
    config: &Config,
) -> Result<FieldSet> {
    let path = paths
        .first()
        .ok_or_else(|| GeneratorError::FileNotFound(config.vo_glob(type_name)))?;

    let content = workspace.read_text(path).await?;
    extract_fields(&content, &path.display().to_string())
}
