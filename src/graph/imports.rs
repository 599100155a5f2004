// src/graph/imports.rs
//! Extracts import statements from a parsed Python syntax tree.

use tree_sitter::{Node, Tree};

/// Name recorded for `from x import *`.
pub const WILDCARD: &str = "*";

/// One import statement, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `import a.b, c as d`: names are the dotted originals, aliases dropped.
    Plain { line: usize, names: Vec<String> },
    /// `from ..pkg import a, b`: `level` counts the leading dots.
    From {
        line: usize,
        level: usize,
        source: Option<String>,
        names: Vec<String>,
    },
}

impl ImportStatement {
    /// 1-based line of the statement.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Plain { line, .. } | Self::From { line, .. } => *line,
        }
    }
}

/// Visits every node of `tree` and collects its import statements.
///
/// Imports nested in functions, classes or conditional blocks are included.
#[must_use]
pub fn extract(tree: &Tree, source: &str) -> Vec<ImportStatement> {
    let mut out = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        let statement = match node.kind() {
            "import_statement" => Some(plain_import(node, source)),
            "import_from_statement" => Some(from_import(node, source)),
            "future_import_statement" => Some(future_import(node, source)),
            _ => None,
        };

        match statement {
            Some(s) => out.push(s),
            None if cursor.goto_first_child() => continue,
            None => {}
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return out;
            }
        }
    }
}

fn plain_import(node: Node, source: &str) -> ImportStatement {
    ImportStatement::Plain {
        line: line_of(node),
        names: imported_names(node, source),
    }
}

fn from_import(node: Node, source: &str) -> ImportStatement {
    let (level, module) = match node.child_by_field_name("module_name") {
        Some(m) if m.kind() == "relative_import" => relative_parts(m, source),
        Some(m) => (0, text_of(m, source)),
        None => (0, None),
    };

    ImportStatement::From {
        line: line_of(node),
        level,
        source: module,
        names: from_names(node, source),
    }
}

fn future_import(node: Node, source: &str) -> ImportStatement {
    ImportStatement::From {
        line: line_of(node),
        level: 0,
        source: Some("__future__".to_string()),
        names: imported_names(node, source),
    }
}

/// `relative_import` is an `import_prefix` of dots plus an optional dotted name.
fn relative_parts(node: Node, source: &str) -> (usize, Option<String>) {
    let mut level = 0;
    let mut module = None;
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_prefix" => {
                level = text_of(child, source).map_or(0, |t| t.matches('.').count());
            }
            "dotted_name" => module = text_of(child, source),
            _ => {}
        }
    }
    (level, module)
}

fn from_names(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let wildcard = node
        .children(&mut cursor)
        .any(|c| c.kind() == "wildcard_import");
    if wildcard {
        return vec![WILDCARD.to_string()];
    }
    imported_names(node, source)
}

fn imported_names(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| {
            let target = if name.kind() == "aliased_import" {
                name.child_by_field_name("name")?
            } else {
                name
            };
            text_of(target, source)
        })
        .collect()
}

fn text_of(node: Node, source: &str) -> Option<String> {
    let text = node.utf8_text(source.as_bytes()).ok()?;
    let cleaned: String = text.split_whitespace().collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}
