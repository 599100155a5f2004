// src/render/options.rs
//! Per-request visualization options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::colors::ColorScale;
use crate::error::{ModgraphError, Result};

/// Smallest node edge length, so no module disappears.
pub const MIN_NODE_SIZE: f64 = 0.2;
pub const MAX_NODE_SIZE: f64 = 1.0;
/// Size used when no line count drives it.
pub const MEAN_NODE_SIZE: f64 = (MIN_NODE_SIZE + MAX_NODE_SIZE) / 2.0;

/// Graphviz layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
}

impl LayoutAlgorithm {
    /// Name of the Graphviz executable implementing this layout.
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Neato => "neato",
            Self::Fdp => "fdp",
            Self::Sfdp => "sfdp",
            Self::Circo => "circo",
            Self::Twopi => "twopi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl RankDir {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
        }
    }
}

/// Node styling for one module kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Fixed color; disables the import-count color scale.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_color_scale")]
    pub color_scale: String,
    /// Fixed size; disables the line-count size mapping.
    #[serde(default)]
    pub size: Option<f64>,
    /// Put the module id outside the node instead of inside.
    #[serde(default)]
    pub xlabels: bool,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: None,
            color_scale: default_color_scale(),
            size: None,
            xlabels: false,
        }
    }
}

impl NodeStyle {
    #[must_use]
    pub fn fixed(color: &str, size: f64) -> Self {
        Self {
            color: Some(color.to_string()),
            size: Some(size),
            ..Self::default()
        }
    }
}

/// One visualization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub layout: LayoutAlgorithm,
    #[serde(default = "default_true")]
    pub include_internal_edges: bool,
    #[serde(default = "default_true")]
    pub include_external_edges: bool,
    #[serde(default)]
    pub internal: NodeStyle,
    #[serde(default)]
    pub external: NodeStyle,
    #[serde(default = "default_size_multiplier")]
    pub size_multiplier: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Inclusive lower bound on a module's import count.
    #[serde(default)]
    pub min_import_count: Option<usize>,
    /// Inclusive upper bound on a module's import count.
    #[serde(default)]
    pub max_import_count: Option<usize>,
    #[serde(default)]
    pub rank_dir: Option<RankDir>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output: default_output(),
            layout: LayoutAlgorithm::default(),
            include_internal_edges: true,
            include_external_edges: true,
            internal: NodeStyle::default(),
            external: NodeStyle::default(),
            size_multiplier: default_size_multiplier(),
            font_size: default_font_size(),
            padding: default_padding(),
            min_import_count: None,
            max_import_count: None,
            rank_dir: None,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// True if `count` lies inside the import-count window.
    #[must_use]
    pub fn admits(&self, count: usize) -> bool {
        self.min_import_count.map_or(true, |min| count >= min)
            && self.max_import_count.map_or(true, |max| count <= max)
    }

    /// Rejects options no renderer could honor.
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        self.internal.color_scale.parse::<ColorScale>()?;
        self.external.color_scale.parse::<ColorScale>()?;

        if let (Some(min), Some(max)) = (self.min_import_count, self.max_import_count) {
            if min > max {
                return Err(invalid(format!(
                    "min_import_count {min} exceeds max_import_count {max}"
                )));
            }
        }
        for (field, value) in [
            ("size_multiplier", self.size_multiplier),
            ("font_size", self.font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{field} must be positive, got {value}")));
            }
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(invalid(format!("padding must not be negative, got {}", self.padding)));
        }
        Ok(())
    }
}

/// The stock trio: internal coupling, external reliance, and both together.
#[must_use]
pub fn default_requests(dir: &Path) -> Vec<RenderOptions> {
    vec![
        RenderOptions {
            output: dir.join("internal-dependencies.png"),
            layout: LayoutAlgorithm::Circo,
            include_external_edges: false,
            size_multiplier: 1.7,
            font_size: 25.0,
            padding: 1.8,
            ..RenderOptions::default()
        },
        RenderOptions {
            output: dir.join("external-dependencies.png"),
            layout: LayoutAlgorithm::Fdp,
            include_internal_edges: false,
            internal: NodeStyle::fixed("dodgerblue", MEAN_NODE_SIZE),
            font_size: 20.0,
            rank_dir: Some(RankDir::LeftRight),
            ..RenderOptions::default()
        },
        RenderOptions {
            output: dir.join("spaghetti-dependencies.png"),
            layout: LayoutAlgorithm::Fdp,
            internal: NodeStyle::fixed("dodgerblue", MEAN_NODE_SIZE),
            external: NodeStyle {
                color: Some("firebrick1".to_string()),
                ..NodeStyle::default()
            },
            font_size: 25.0,
            ..RenderOptions::default()
        },
    ]
}

fn invalid(message: String) -> ModgraphError {
    ModgraphError::InvalidInput(message)
}

fn default_output() -> PathBuf {
    PathBuf::from("modgraph.png")
}

fn default_color_scale() -> String {
    "plasma".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_size_multiplier() -> f64 {
    1.0
}

const fn default_font_size() -> f64 {
    14.0
}

const fn default_padding() -> f64 {
    0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_are_inclusive() {
        let options = RenderOptions {
            min_import_count: Some(2),
            max_import_count: Some(4),
            ..RenderOptions::default()
        };
        assert!(!options.admits(1));
        assert!(options.admits(2));
        assert!(options.admits(4));
        assert!(!options.admits(5));
        assert!(RenderOptions::default().admits(0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inverted = RenderOptions {
            min_import_count: Some(5),
            max_import_count: Some(1),
            ..RenderOptions::default()
        };
        assert!(inverted.validate().is_err());

        let mut unknown_scale = RenderOptions::default();
        unknown_scale.external.color_scale = "rainbow-unicorn".to_string();
        assert!(unknown_scale.validate().is_err());

        let zero_size = RenderOptions {
            size_multiplier: 0.0,
            ..RenderOptions::default()
        };
        assert!(zero_size.validate().is_err());

        assert!(RenderOptions::default().validate().is_ok());
    }

    #[test]
    fn test_default_requests_are_valid() {
        for request in default_requests(Path::new("artifacts")) {
            assert!(request.validate().is_ok(), "{:?}", request.output);
        }
    }
}
