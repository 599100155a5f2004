// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "modgraph",
    version,
    about = "Import dependency graphs for Python codebases"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Config file (defaults to ./modgraph.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Source root, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Test root, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub tests: Option<PathBuf>,
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every configured render request
    Render {
        /// Write outputs into this directory instead of the configured paths
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Emit DOT source only; Graphviz is not needed
        #[arg(long)]
        dot_only: bool,
    },
    /// Print every import edge
    Edges {
        #[arg(long)]
        json: bool,
    },
    /// Print module counts and the most imported modules
    Summary {
        #[arg(long, default_value = "10")]
        top: usize,
    },
}
