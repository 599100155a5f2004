// src/render/renderer.rs
//! Maps a dependency graph onto visual nodes and edges.

use std::collections::{BTreeMap, HashSet};

use log::info;

use super::backend::RenderBackend;
use super::colors::ColorScale;
use super::options::{NodeStyle, RenderOptions, MAX_NODE_SIZE, MEAN_NODE_SIZE, MIN_NODE_SIZE};
use super::request::{NodeShape, RenderRequest, VisualEdge, VisualNode};
use crate::error::Result;
use crate::graph::{Module, ModuleKind, RepoGraph};
use crate::metrics::MetricNormalizer;
use crate::source::SourceFile;

const ARROW_SIZE: f64 = 0.5;

/// Turns one analyzed graph into render requests.
///
/// Normalizers are computed once per population at construction; a
/// population that is empty has no normalizer and never needs one.
pub struct GraphRenderer<'g> {
    graph: &'g RepoGraph,
    internal_colors: Option<MetricNormalizer>,
    external_colors: Option<MetricNormalizer>,
    loc_sizes: Option<MetricNormalizer>,
}

impl<'g> GraphRenderer<'g> {
    #[must_use]
    pub fn new(graph: &'g RepoGraph) -> Self {
        let counts = |kind| {
            MetricNormalizer::from_counts(
                graph.registry().of_kind(kind).map(Module::import_count),
                0.0,
                1.0,
            )
            .ok()
        };
        let loc_sizes = MetricNormalizer::from_counts(
            graph.files().map(SourceFile::loc),
            MIN_NODE_SIZE,
            MAX_NODE_SIZE,
        )
        .ok();

        Self {
            graph,
            internal_colors: counts(ModuleKind::Internal),
            external_colors: counts(ModuleKind::External),
            loc_sizes,
        }
    }

    /// Builds the backend request for `options`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the options do not validate.
    pub fn build_request(&self, options: &RenderOptions) -> Result<RenderRequest> {
        options.validate()?;
        let internal_scale: ColorScale = options.internal.color_scale.parse()?;
        let external_scale: ColorScale = options.external.color_scale.parse()?;

        let nodes: Vec<VisualNode> = self
            .graph
            .modules()
            .filter(|m| m.is_internal() || options.include_external_edges)
            .filter(|m| options.admits(m.import_count()))
            .map(|m| match m.kind() {
                ModuleKind::Internal => self.node(m, &options.internal, internal_scale, options),
                ModuleKind::External => self.node(m, &options.external, external_scale, options),
            })
            .collect();

        let edges = self.edges(&nodes, options);
        Ok(RenderRequest {
            nodes,
            edges,
            layout: options.layout,
            padding: options.padding,
            rank_dir: options.rank_dir,
        })
    }

    /// Builds the request and hands it to `backend`.
    ///
    /// # Errors
    /// Returns option validation errors and backend failures.
    pub fn render(&self, options: &RenderOptions, backend: &dyn RenderBackend) -> Result<()> {
        let request = self.build_request(options)?;
        info!(
            "rendering {} nodes, {} edges to {}",
            request.nodes.len(),
            request.edges.len(),
            options.output.display()
        );
        backend.render(&request, &options.output)
    }

    fn node(
        &self,
        module: &Module,
        style: &NodeStyle,
        scale: ColorScale,
        options: &RenderOptions,
    ) -> VisualNode {
        let color = style
            .color
            .clone()
            .unwrap_or_else(|| self.fill_for(module, scale));
        let size = style.size.unwrap_or_else(|| self.size_for(module));

        VisualNode {
            id: module.id().to_string(),
            kind: module.kind(),
            size: size * options.size_multiplier,
            color,
            shape: NodeShape::for_kind(module.kind()),
            font_size: options.font_size,
            external_label: style.xlabels,
        }
    }

    fn fill_for(&self, module: &Module, scale: ColorScale) -> String {
        let norm = match module.kind() {
            ModuleKind::Internal => self.internal_colors.as_ref(),
            ModuleKind::External => self.external_colors.as_ref(),
        };
        let t = norm.map_or(0.5, |n| n.normalize_count(module.import_count()));
        scale.node_fill(t)
    }

    /// Line-count size for discovered modules, mean size otherwise.
    fn size_for(&self, module: &Module) -> f64 {
        match (module.source(), &self.loc_sizes) {
            (Some(file), Some(norm)) if module.is_internal() => norm.normalize_count(file.loc()),
            _ => MEAN_NODE_SIZE,
        }
    }

    /// One visual edge per (consumer, dependency) pair that survives the kind
    /// and node filters; repeated references raise its weight.
    fn edges(&self, nodes: &[VisualNode], options: &RenderOptions) -> Vec<VisualEdge> {
        let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let mut merged: BTreeMap<(String, String), VisualEdge> = BTreeMap::new();

        for edge in self.graph.edges() {
            let wanted = match edge.kind() {
                ModuleKind::Internal => options.include_internal_edges,
                ModuleKind::External => options.include_external_edges,
            };
            let source = edge.consumer.as_str();
            let target = edge.dependency.id().as_str();
            if !wanted || !visible.contains(source) || !visible.contains(target) {
                continue;
            }

            merged
                .entry((source.to_string(), target.to_string()))
                .and_modify(|e| e.weight += 1)
                .or_insert_with(|| VisualEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    kind: edge.kind(),
                    color: VisualEdge::color_for(edge.kind()),
                    arrow_size: ARROW_SIZE,
                    weight: 1,
                });
        }
        merged.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsePolicy;
    use crate::graph::build_from_files;
    use std::path::Path;

    fn graph(files: &[(&str, &str)]) -> Result<RepoGraph> {
        let files = files
            .iter()
            .map(|(p, t)| SourceFile::from_text(Path::new(p), *t))
            .collect();
        build_from_files(files, Vec::new(), ParsePolicy::Skip)
    }

    #[test]
    fn test_sizes_follow_line_counts() -> Result<()> {
        let g = graph(&[("big.py", "a = 1\nb = 2\nc = 3\n"), ("small.py", "a = 1\n")])?;
        let request = GraphRenderer::new(&g).build_request(&RenderOptions::default())?;

        let big = request.node("big").map(|n| n.size);
        let small = request.node("small").map(|n| n.size);
        assert_eq!(big, Some(MAX_NODE_SIZE));
        assert_eq!(small, Some(MIN_NODE_SIZE));
        Ok(())
    }

    #[test]
    fn test_external_nodes_need_external_edges() -> Result<()> {
        let g = graph(&[("a.py", "import os\n")])?;
        let options = RenderOptions {
            include_external_edges: false,
            ..RenderOptions::default()
        };
        let request = GraphRenderer::new(&g).build_request(&options)?;
        assert!(request.node("a").is_some());
        assert!(request.node("os").is_none());
        assert!(request.edges.is_empty());
        Ok(())
    }

    #[test]
    fn test_repeated_imports_collapse() -> Result<()> {
        let g = graph(&[("a.py", "import os\nimport os.path\n")])?;
        let request = GraphRenderer::new(&g).build_request(&RenderOptions::default())?;
        assert_eq!(request.edges.len(), 1);
        assert_eq!(request.edges[0].weight, 2);
        assert_eq!(request.edges[0].color, "red");
        Ok(())
    }

    #[test]
    fn test_overrides_win() -> Result<()> {
        let g = graph(&[("a.py", "import os\n")])?;
        let options = RenderOptions {
            internal: NodeStyle::fixed("dodgerblue", 0.4),
            size_multiplier: 2.0,
            ..RenderOptions::default()
        };
        let request = GraphRenderer::new(&g).build_request(&options)?;
        let node = request.node("a");
        assert_eq!(node.map(|n| n.color.as_str()), Some("dodgerblue"));
        assert_eq!(node.map(|n| n.size), Some(0.8));
        assert_eq!(request.node("os").map(|n| n.shape), Some(NodeShape::Box));
        Ok(())
    }
}
