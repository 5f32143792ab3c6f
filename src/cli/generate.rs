use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::load_config;
use crate::error::GeneratorError;
use crate::host::{InvocationContext, LocalWorkspace, TerminalPrompter};
use crate::pipeline::{self, GenerateOptions, GenerationReport};
use crate::query::QueryKind;

/// Generate a query fragment for the selected signature and append it to the mapper file
pub async fn generate_query(
    selection: Option<String>,
    file: Option<PathBuf>,
    workspace: PathBuf,
    kind: Option<String>,
    table: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let kind = kind.map(|k| k.parse::<QueryKind>()).transpose()?;

    let config = load_config(&workspace);
    let ctx = InvocationContext {
        selection,
        current_file: file,
        workspace_root: workspace.is_dir().then(|| workspace.clone()),
    };
    let options = GenerateOptions { kind, table, dry_run };

    let host = LocalWorkspace::new(&workspace, config.clone());
    info!("Workspace: {}", host.root().display());
    let mut prompter = TerminalPrompter::new();

    match pipeline::generate(&ctx, &config, &host, &mut prompter, &options).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) if e.is_user_facing() => {
            // Nothing was written; report and exit cleanly
            eprintln!("{}", e);
            Ok(())
        }
        Err(e @ GeneratorError::WriteFailure { .. }) => Err(anyhow::anyhow!("Could not save mapper file: {}", e)),
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &GenerationReport) {
    println!("{} {} -> {}", report.kind, report.info.function_name, report.table);
    if let Some(path) = report.vo_files.param_vo.as_ref().and_then(|p| p.first()) {
        println!("Parameter VO: {}", path.display());
    }
    if let Some(path) = report.vo_files.return_vo.as_ref().and_then(|p| p.first()) {
        println!("Result VO: {}", path.display());
    }
    println!("Mapper: {} (namespace {})", report.target.file_name, report.target.namespace);

    if report.written {
        let action = if report.created { "Created" } else { "Updated" };
        println!("{} {}", action, report.target.path.display());
        println!("\n{}", report.fragment);
    } else {
        println!("Dry run, {} not written:\n", report.target.path.display());
        print!("{}", report.document);
    }
}
