// src/config/io.rs
//! Reading `modgraph.toml` from disk.

use std::fs;
use std::path::Path;

use regex::Regex;

use super::types::ModgraphToml;
use crate::error::{ModgraphError, Result};

/// Reads and parses a config file.
///
/// # Errors
/// Returns an I/O error if the file is unreadable, or a config error if it
/// is not valid TOML for [`ModgraphToml`].
pub fn read_toml(path: &Path) -> Result<ModgraphToml> {
    let content = fs::read_to_string(path).map_err(|e| ModgraphError::io(e, path))?;
    parse_toml(path, &content)
}

/// Parses config text; `path` is only used in error messages.
///
/// # Errors
/// Returns [`ModgraphError::Config`] on malformed input.
pub fn parse_toml(path: &Path, content: &str) -> Result<ModgraphToml> {
    toml::from_str(content).map_err(|e| ModgraphError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Compiles exclude patterns.
///
/// # Errors
/// Returns the first invalid regex.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(ModgraphError::from))
        .collect()
}
