// src/cli/handlers.rs
use crate::config::Config;
use crate::graph::{RepoGraph, RepoGraphBuilder};
use crate::render::{DotBackend, GraphRenderer, GraphvizBackend, RenderBackend};
use crate::report;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

fn build(config: &Config) -> Result<RepoGraph> {
    config.validate()?;
    RepoGraphBuilder::from_config(config)
        .build()
        .with_context(|| format!("Failed to analyze {}", config.source.root.display()))
}

/// Handles the render command.
///
/// # Errors
/// Returns error if the graph cannot be built or a backend fails.
pub fn handle_render(mut config: Config, out_dir: Option<&Path>, dot_only: bool) -> Result<()> {
    if let Some(dir) = out_dir {
        config.redirect_outputs(dir);
    }
    let graph = build(&config)?;
    let renderer = GraphRenderer::new(&graph);
    let backend: &dyn RenderBackend = if dot_only { &DotBackend } else { &GraphvizBackend };

    for request in &config.requests {
        renderer
            .render(request, backend)
            .with_context(|| format!("Failed to render {}", request.output.display()))?;
        let written = if dot_only {
            DotBackend::target(&request.output)
        } else {
            request.output.clone()
        };
        println!("{} {}", "[OK]".green().bold(), written.display());
    }
    Ok(())
}

/// Handles the edges command.
///
/// # Errors
/// Returns error if the graph cannot be built or serialized.
pub fn handle_edges(config: &Config, json: bool) -> Result<()> {
    let graph = build(config)?;
    if json {
        println!("{}", graph.to_json()?);
    } else {
        print!("{}", report::edge_list(&graph));
    }
    Ok(())
}

/// Handles the summary command.
///
/// # Errors
/// Returns error if the graph cannot be built.
pub fn handle_summary(config: &Config, top: usize) -> Result<()> {
    let graph = build(config)?;
    print!("{}", report::summarize(&graph, top));
    Ok(())
}
