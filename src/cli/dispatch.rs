//! Command dispatch logic extracted from binary to keep main small.

use super::{
    args::{Cli, Commands},
    handlers::{handle_edges, handle_render, handle_summary},
};
use crate::config::Config;
use anyhow::Result;

/// Loads configuration, applies command-line overrides and runs the command.
///
/// # Errors
/// Returns error if config loading or the command handler fails.
pub fn execute(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    match cli.command {
        Commands::Render { out_dir, dot_only } => {
            handle_render(config, out_dir.as_deref(), dot_only)
        }
        Commands::Edges { json } => handle_edges(&config, json),
        Commands::Summary { top } => handle_summary(&config, top),
    }
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.source.root.clone_from(root);
    }
    if let Some(tests) = &cli.tests {
        config.source.tests = Some(tests.clone());
    }
    Ok(config)
}
