//! Output formatting module

use std::path::Path;

use mapperino_app::app::PlannedTile;
use mapperino_domain::{render_commands, MapCommand};
use mapperino_types::{OutputFormat, Result};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct CommandRow<'a> {
    index: usize,
    url: &'a str,
    command: String,
}

pub fn format_commands(output_format: OutputFormat, commands: &[MapCommand]) -> Result<String> {
    if output_format == OutputFormat::Json {
        let rows: Vec<_> = commands
            .iter()
            .enumerate()
            .map(|(index, cmd)| CommandRow {
                index,
                url: &cmd.url,
                command: cmd.to_string(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    Ok(render_commands(commands))
}

pub fn format_plan(output_format: OutputFormat, plan: &[PlannedTile]) -> Result<String> {
    if output_format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(plan)?);
    }

    let mut out = String::new();
    let size = plan.first().map(|t| t.placement.size).unwrap_or(0);
    out.push_str(&format!("{} tiles of {}x{} px (upload skipped)\n", plan.len(), size, size));
    out.push_str(&format!("{:<6} {:>6} {:>6}  {}\n", "Tile", "X", "Y", "Remote name"));
    for tile in plan {
        out.push_str(&format!(
            "{:<6} {:>6} {:>6}  {}\n",
            tile.placement.index, tile.placement.x, tile.placement.y, tile.remote_name
        ));
    }
    Ok(out.trim_end().to_string())
}

/// Print to stdout, or write the file when a path is given
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{}", content),
    }
    Ok(())
}
