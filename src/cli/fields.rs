use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::extract::extract_fields;

/// List the fields of a value-object file with their column names
pub async fn show_fields(file: PathBuf, format: String) -> Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let fields = extract_fields(&content, &file.display().to_string())?;

    match format.as_str() {
        "json" => {
            let pairs: Vec<serde_json::Value> = fields
                .pairs()
                .map(|(column, field)| serde_json::json!({ "field": field, "column": column }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&pairs)?);
        }
        "text" => {
            println!("{} fields in {}", fields.len(), file.display());
            let width = fields.camel().iter().map(|f| f.len()).max().unwrap_or(0);
            for (column, field) in fields.pairs() {
                println!("  {:width$}  {}", field, column, width = width);
            }
        }
        _ => return Err(anyhow::anyhow!("Unknown format: {}", format)),
    }

    Ok(())
}
