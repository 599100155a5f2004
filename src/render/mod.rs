// src/render/mod.rs
//! Mapping of the dependency graph onto visual attributes, and the backends
//! that draw it.

pub mod backend;
pub mod colors;
pub mod dot;
pub mod options;
pub mod renderer;
pub mod request;

pub use backend::{DotBackend, GraphvizBackend, OutputFormat, RenderBackend};
pub use colors::{ColorScale, Rgb};
pub use dot::to_dot;
pub use options::{default_requests, LayoutAlgorithm, NodeStyle, RankDir, RenderOptions};
pub use renderer::GraphRenderer;
pub use request::{NodeShape, RenderRequest, VisualEdge, VisualNode};
