// src/render/request.rs
//! What the core hands to a layout backend.

use serde::Serialize;

use super::options::{LayoutAlgorithm, RankDir};
use crate::graph::ModuleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Circle,
    Box,
}

impl NodeShape {
    #[must_use]
    pub fn for_kind(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::Internal => Self::Circle,
            ModuleKind::External => Self::Box,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Box => "box",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub kind: ModuleKind,
    /// Edge length in inches (width and height).
    pub size: f64,
    /// Graphviz color: `#rrggbb` or a color name.
    pub color: String,
    pub shape: NodeShape,
    pub font_size: f64,
    /// Label drawn outside the node instead of inside.
    pub external_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    pub source: String,
    pub target: String,
    pub kind: ModuleKind,
    pub color: &'static str,
    pub arrow_size: f64,
    /// Number of import references collapsed into this edge.
    pub weight: usize,
}

impl VisualEdge {
    /// Edge color by target kind.
    #[must_use]
    pub fn color_for(kind: ModuleKind) -> &'static str {
        match kind {
            ModuleKind::Internal => "blue",
            ModuleKind::External => "red",
        }
    }
}

/// A complete, backend-agnostic drawing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub layout: LayoutAlgorithm,
    pub padding: f64,
    pub rank_dir: Option<RankDir>,
}

impl RenderRequest {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }
}
