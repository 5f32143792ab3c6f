// One generation run, from selected text to an updated mapper file

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::extract::{extract_function_info, FunctionInfo};
use crate::host::{InvocationContext, Prompter, Workspace};
use crate::locator::{load_field_sides, locate_vo_files, VoFileReference};
use crate::mapper::{append_fragment, derive_target, new_document, read_namespace, MapperTarget};
use crate::query::{generate_query, QueryKind};

/// Answers supplied up front instead of prompting
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub kind: Option<QueryKind>,
    pub table: Option<String>,
    /// Render everything but skip the final write
    pub dry_run: bool,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub info: FunctionInfo,
    pub kind: QueryKind,
    pub table: String,
    pub vo_files: VoFileReference,
    pub target: MapperTarget,
    pub fragment: String,
    /// Full mapper document after the append
    pub document: String,
    /// The mapper file did not exist before this run
    pub created: bool,
    pub written: bool,
}

/// Run the whole pipeline.
///
/// Every prompt and lookup happens before the single write at the end, so a
/// cancelled or failed run leaves the workspace untouched.
pub async fn generate<W, P>(
    ctx: &InvocationContext,
    config: &Config,
    workspace: &W,
    prompter: &mut P,
    options: &GenerateOptions,
) -> Result<GenerationReport>
where
    W: Workspace,
    P: Prompter,
{
    let selection = ctx
        .selection
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(GeneratorError::NoActiveContext)?;

    let info = extract_function_info(selection)?;
    info!(
        "Method {} returns {} with params {:?}",
        info.function_name, info.return_type, info.params
    );

    let kind = match options.kind {
        Some(kind) => kind,
        None => ask_kind(prompter).await?,
    };

    let table = match options.table.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(table) => table.to_string(),
        None => prompter
            .input("Table name")
            .await
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(GeneratorError::UserCancelled)?,
    };

    let workspace_root = ctx.workspace_root.as_deref().ok_or(GeneratorError::NoWorkspace)?;
    let current_file = ctx.current_file.as_deref().ok_or(GeneratorError::NoActiveContext)?;
    let target = derive_target(current_file, workspace_root, &config.layout)?;
    debug!("Mapper target: {} ({})", target.path.display(), target.namespace);

    let vo_files = locate_vo_files(&info, kind.needs(&info), workspace, config).await?;
    let sides = load_field_sides(&vo_files, &info, workspace, config).await?;

    let fragment = generate_query(&info, kind, &sides, &table)?;

    let created = !workspace.exists(&target.path).await;
    let existing = if created {
        info!("Creating mapper file {}", target.path.display());
        new_document(&target.namespace)
    } else {
        let existing = workspace.read_text(&target.path).await?;
        match read_namespace(&existing) {
            Some(ns) if ns == target.namespace => {}
            Some(ns) => warn!("{} declares namespace {}, expected {}", target.path.display(), ns, target.namespace),
            None => warn!("{} has no mapper namespace", target.path.display()),
        }
        existing
    };
    let document = append_fragment(&existing, &fragment);

    let written = if options.dry_run {
        info!("Dry run, not writing {}", target.path.display());
        false
    } else {
        workspace.write_text(&target.path, &document).await?;
        info!("Appended {} to {}", kind, target.path.display());
        true
    };

    Ok(GenerationReport {
        info,
        kind,
        table,
        vo_files,
        target,
        fragment,
        document,
        created,
        written,
    })
}

async fn ask_kind<P: Prompter>(prompter: &mut P) -> Result<QueryKind> {
    let options: Vec<&str> = QueryKind::ALL.iter().map(|k| k.as_str()).collect();
    let choice = prompter
        .choose(&options, "Select query type")
        .await
        .ok_or(GeneratorError::UserCancelled)?;
    choice.parse()
}
