// src/render/dot.rs
//! Graphviz DOT serialization of a [`RenderRequest`].

use std::fmt::Write;

use super::request::{RenderRequest, VisualEdge, VisualNode};

/// Serializes `request` as a strict directed graph.
#[must_use]
pub fn to_dot(request: &RenderRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "strict digraph modgraph {{");
    let _ = writeln!(out, "    pad={};", request.padding);
    if let Some(dir) = request.rank_dir {
        let _ = writeln!(out, "    rankdir={};", dir.as_str());
    }
    let _ = writeln!(out, "    node [style=filled, fixedsize=true];");

    for node in &request.nodes {
        write_node(&mut out, node);
    }
    for edge in &request.edges {
        write_edge(&mut out, edge);
    }
    out.push_str("}\n");
    out
}

fn write_node(out: &mut String, node: &VisualNode) {
    let id = quote(&node.id);
    let label = if node.external_label {
        format!("label=\"\", xlabel={id}")
    } else {
        format!("label={id}")
    };
    let _ = writeln!(
        out,
        "    {id} [{label}, shape={}, width={size}, height={size}, \
         color={color}, fillcolor={color}, fontsize={}];",
        node.shape.as_str(),
        node.font_size,
        size = node.size,
        color = quote(&node.color),
    );
}

fn write_edge(out: &mut String, edge: &VisualEdge) {
    let _ = writeln!(
        out,
        "    {} -> {} [color={}, arrowsize={}, weight={}];",
        quote(&edge.source),
        quote(&edge.target),
        edge.color,
        edge.arrow_size,
        edge.weight
    );
}

/// Double-quoted DOT identifier.
fn quote(raw: &str) -> String {
    let mut s = String::with_capacity(raw.len() + 2);
    s.push('"');
    for c in raw.chars() {
        match c {
            '"' | '\\' => {
                s.push('\\');
                s.push(c);
            }
            '\n' => s.push_str("\\n"),
            _ => s.push(c),
        }
    }
    s.push('"');
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ModuleKind;
    use crate::render::options::{LayoutAlgorithm, RankDir};
    use crate::render::request::NodeShape;

    fn node(id: &str, kind: ModuleKind, external_label: bool) -> VisualNode {
        VisualNode {
            id: id.to_string(),
            kind,
            size: 0.6,
            color: "#aabbcc".to_string(),
            shape: NodeShape::for_kind(kind),
            font_size: 14.0,
            external_label,
        }
    }

    #[test]
    fn test_strict_digraph_shape() {
        let request = RenderRequest {
            nodes: vec![
                node("pkg.a", ModuleKind::Internal, false),
                node("os", ModuleKind::External, true),
            ],
            edges: vec![VisualEdge {
                source: "pkg.a".to_string(),
                target: "os".to_string(),
                kind: ModuleKind::External,
                color: "red",
                arrow_size: 0.5,
                weight: 2,
            }],
            layout: LayoutAlgorithm::Fdp,
            padding: 0.8,
            rank_dir: Some(RankDir::LeftRight),
        };
        let dot = to_dot(&request);

        assert!(dot.starts_with("strict digraph modgraph {"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("\"pkg.a\" [label=\"pkg.a\", shape=circle"));
        assert!(dot.contains("\"os\" [label=\"\", xlabel=\"os\", shape=box"));
        assert!(dot.contains("height=0.6, color=\"#aabbcc\", fillcolor=\"#aabbcc\", fontsize=14"));
        assert!(dot.contains("\"pkg.a\" -> \"os\" [color=red, arrowsize=0.5, weight=2];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
