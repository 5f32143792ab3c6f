use anyhow::{Context, Result};

use crate::extract::extract_function_info;

/// Show what the signature extractor makes of a snippet
pub async fn parse_selection(selection: Option<String>, format: String) -> Result<()> {
    let selection = selection.context("No selection given; use --selection or --selection-file")?;
    let info = extract_function_info(&selection)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&info)?),
        "text" => {
            println!("Function: {}", info.function_name);
            println!("Returns: {}", info.return_type);
            if info.params.is_empty() {
                println!("Params: (none)");
            } else {
                println!("Params: {}", info.params.join(", "));
            }
        }
        _ => return Err(anyhow::anyhow!("Unknown format: {}", format)),
    }

    Ok(())
}
