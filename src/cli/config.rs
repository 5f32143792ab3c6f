use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{load_config, CONFIG_FILE_NAME};

/// Print the effective configuration for a workspace as TOML
pub async fn show_config(workspace: PathBuf) -> Result<()> {
    let config = load_config(&workspace);
    let source = workspace.join(CONFIG_FILE_NAME);

    println!(
        "# {}",
        if source.exists() { source.display().to_string() } else { "defaults".to_string() }
    );
    print!("{}", toml::to_string_pretty(&config).context("Failed to serialize configuration")?);

    Ok(())
}
