// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{ModgraphToml, ParsePolicy, SourceConfig};

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{ModgraphError, Result};
use crate::render::{self, RenderOptions};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "modgraph.toml";

/// Directory default render requests write into.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Directories never descended into during discovery.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    "node_modules",
    "build",
    "dist",
    ".mypy_cache",
    ".pytest_cache",
];

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub exclude_patterns: Vec<Regex>,
    pub requests: Vec<RenderOptions>,
}

impl Config {
    /// Defaults: current directory as root, the three stock render requests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: SourceConfig::default(),
            exclude_patterns: Vec::new(),
            requests: render::default_requests(Path::new(ARTIFACTS_DIR)),
        }
    }

    /// Loads `path`, or `modgraph.toml` if present, or falls back to defaults.
    ///
    /// # Errors
    /// Returns an error if an explicitly named file is missing, or if any
    /// config file is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_toml(io::read_toml(p)?),
            None if Path::new(CONFIG_FILE).is_file() => {
                Self::from_toml(io::read_toml(Path::new(CONFIG_FILE))?)
            }
            None => Ok(Self::new()),
        }
    }

    /// Builds a config from parsed TOML.
    ///
    /// # Errors
    /// Returns an error if an exclude pattern is not a valid regex.
    pub fn from_toml(toml: ModgraphToml) -> Result<Self> {
        let exclude_patterns = io::compile_patterns(&toml.source.exclude)?;
        let requests = if toml.render.is_empty() {
            render::default_requests(Path::new(ARTIFACTS_DIR))
        } else {
            toml.render
        };
        Ok(Self {
            source: toml.source,
            exclude_patterns,
            requests,
        })
    }

    /// Re-roots every relative output path under `dir`.
    pub fn redirect_outputs(&mut self, dir: &Path) {
        for request in &mut self.requests {
            if request.output.is_relative() {
                let name = request
                    .output
                    .file_name()
                    .map_or_else(|| PathBuf::from("modgraph.png"), PathBuf::from);
                request.output = dir.join(name);
            }
        }
    }

    /// Checks preconditions before any work starts.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a root is missing or a request is invalid.
    pub fn validate(&self) -> Result<()> {
        require_dir(&self.source.root)?;
        if let Some(tests) = &self.source.tests {
            require_dir(tests)?;
        }
        self.requests.iter().try_for_each(RenderOptions::validate)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ModgraphError::InvalidInput(format!(
            "source root {} does not exist or is not a directory",
            path.display()
        )))
    }
}
