use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::RenderOptions;

/// What to do with a file that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Leave the file out of the graph and warn.
    #[default]
    Skip,
    /// Fail the whole build.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub tests: Option<PathBuf>,
    /// Regexes matched against root-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub on_parse_error: ParsePolicy,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            tests: None,
            exclude: Vec::new(),
            on_parse_error: ParsePolicy::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// On-disk shape of `modgraph.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModgraphToml {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub render: Vec<RenderOptions>,
}
