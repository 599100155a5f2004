// src/source.rs
//! A discovered Python file with its derived module id and cached views.

use std::cell::OnceCell;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tree_sitter::{Parser, Tree};

use crate::error::{ModgraphError, Result};
use crate::graph::ModuleId;

/// Extension of the files this crate analyzes.
pub const SOURCE_EXT: &str = "py";

/// File stem of a package initializer.
pub const PACKAGE_INIT: &str = "__init__";

/// One source file under the analysis root.
///
/// The syntax tree and the logical line count are computed on first access
/// and cached for the lifetime of the value.
#[derive(Debug)]
pub struct SourceFile {
    name: String,
    segments: Vec<String>,
    module_id: ModuleId,
    text: String,
    tree: OnceCell<Tree>,
    loc: OnceCell<usize>,
}

impl SourceFile {
    /// Reads `relative` (resolved against `root`) from disk.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read as UTF-8 text.
    pub fn load(root: &Path, relative: &Path) -> Result<Self> {
        let full = root.join(relative);
        let text = fs::read_to_string(&full).map_err(|e| ModgraphError::io(e, &full))?;
        Ok(Self::from_text(relative, text))
    }

    /// Builds a file from in-memory text; `relative` is the path from the root.
    #[must_use]
    pub fn from_text(relative: &Path, text: impl Into<String>) -> Self {
        let segments = path_segments(relative);
        let name = segments.last().cloned().unwrap_or_default();
        let module_id = module_id_for(&segments);
        Self {
            name,
            segments,
            module_id,
            text: text.into(),
            tree: OnceCell::new(),
            loc: OnceCell::new(),
        }
    }

    /// File basename, extension included.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path segments from the analysis root, basename last.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_package_init(&self) -> bool {
        stem(&self.name) == PACKAGE_INIT
    }

    /// Number of logical lines (see [`is_logical_line`]).
    pub fn loc(&self) -> usize {
        *self
            .loc
            .get_or_init(|| self.text.lines().filter(|l| is_logical_line(l)).count())
    }

    /// Parsed syntax tree.
    ///
    /// # Errors
    /// Returns [`ModgraphError::Parse`] if the text is not valid Python.
    /// A failed parse is not cached; the next call parses again.
    pub fn tree(&self) -> Result<&Tree> {
        if let Some(tree) = self.tree.get() {
            return Ok(tree);
        }
        let tree = parse_python(&self.text).ok_or_else(|| ModgraphError::Parse {
            path: self.relative_path(),
        })?;
        Ok(self.tree.get_or_init(|| tree))
    }
}

/// Derives the dotted module id from root-relative path segments.
///
/// `pkg/sub/mod.py` becomes `pkg.sub.mod`; `pkg/sub/__init__.py` becomes
/// `pkg.sub`. A package initializer at the root keeps `__init__` as its id.
#[must_use]
pub fn module_id_for(segments: &[String]) -> ModuleId {
    let Some((last, dirs)) = segments.split_last() else {
        return ModuleId::new("");
    };
    let last = stem(last);

    let mut parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
    if last != PACKAGE_INIT || parts.is_empty() {
        parts.push(last);
    }
    ModuleId::new(parts.join("."))
}

/// Returns false for lines that carry no code: blank lines, `#` comments,
/// bare docstring delimiters and lines made only of closing brackets.
#[must_use]
pub fn is_logical_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return false;
    }
    if line == "'''" || line == "\"\"\"" {
        return false;
    }
    !line
        .chars()
        .all(|c| matches!(c, ')' | ']' | '}') || c.is_whitespace())
}

fn stem(name: &str) -> &str {
    name.strip_suffix(".py").unwrap_or(name)
}

fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn parse_python(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    if parser.set_language(tree_sitter_python::language()).is_err() {
        return None;
    }
    let tree = parser.parse(source, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    Some(tree)
}
