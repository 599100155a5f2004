// src/graph/builder.rs
//! Graph construction: discovery, registration, then resolution.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{info, warn};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use super::module::{Module, ModuleId, ModuleKind, Origin};
use super::registry::ModuleRegistry;
use super::resolver::ImportResolver;
use crate::config::{Config, ParsePolicy};
use crate::discovery;
use crate::error::{ModgraphError, Result};
use crate::source::SourceFile;

/// A file left out of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// One import reference: `consumer` depends on `dependency`.
#[derive(Debug, Clone, Copy)]
pub struct DependencyEdge<'g> {
    pub consumer: &'g ModuleId,
    pub dependency: &'g Module,
}

impl DependencyEdge<'_> {
    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        self.dependency.kind()
    }
}

/// Configures and runs a graph build over a source root.
#[derive(Debug, Clone)]
pub struct RepoGraphBuilder {
    root: PathBuf,
    tests: Option<PathBuf>,
    exclude: Vec<Regex>,
    policy: ParsePolicy,
}

impl RepoGraphBuilder {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tests: None,
            exclude: Vec::new(),
            policy: ParsePolicy::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.source.root.clone(),
            tests: config.source.tests.clone(),
            exclude: config.exclude_patterns.clone(),
            policy: config.source.on_parse_error,
        }
    }

    /// Test sources are listed but never enter the graph.
    #[must_use]
    pub fn with_tests(mut self, tests: impl Into<PathBuf>) -> Self {
        self.tests = Some(tests.into());
        self
    }

    #[must_use]
    pub fn exclude(mut self, patterns: Vec<Regex>) -> Self {
        self.exclude = patterns;
        self
    }

    #[must_use]
    pub fn on_parse_error(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Discovers, parses and resolves every source file.
    ///
    /// Files that cannot be read as UTF-8 text are handled like files that
    /// do not parse.
    ///
    /// # Errors
    /// Returns an error if a root is missing, or if a file cannot be read or
    /// parsed under [`ParsePolicy::Abort`].
    pub fn build(&self) -> Result<RepoGraph> {
        let mut skipped = Vec::new();
        let files = load_all(&self.root, &self.exclude, self.policy, &mut skipped)?;
        let test_files = match &self.tests {
            Some(tests) => load_all(tests, &self.exclude, self.policy, &mut skipped)?,
            None => Vec::new(),
        };
        assemble(files, test_files, skipped, self.policy)
    }
}

/// Builds a graph from already loaded files.
///
/// Every internal module is registered before the first import is resolved,
/// so relative imports always find their sibling files.
///
/// # Errors
/// Returns a parse error under [`ParsePolicy::Abort`].
pub fn build_from_files(
    files: Vec<SourceFile>,
    test_files: Vec<SourceFile>,
    policy: ParsePolicy,
) -> Result<RepoGraph> {
    assemble(files, test_files, Vec::new(), policy)
}

fn assemble(
    files: Vec<SourceFile>,
    test_files: Vec<SourceFile>,
    mut skipped: Vec<SkippedFile>,
    policy: ParsePolicy,
) -> Result<RepoGraph> {
    let parsed = parse_all(files, policy, &mut skipped)?;

    // A file whose id is already taken stays out of the graph entirely.
    let mut registry = ModuleRegistry::new();
    let mut files = Vec::with_capacity(parsed.len());
    for file in parsed {
        let file = Rc::new(file);
        if registry.register_source(Rc::clone(&file)) {
            files.push(file);
        } else {
            let reason = format!(
                "module {} is already provided by another file",
                file.module_id()
            );
            warn!("skipping {}: {reason}", file.relative_path().display());
            skipped.push(SkippedFile {
                path: file.relative_path(),
                reason,
            });
        }
    }

    let mut imports = Vec::with_capacity(files.len());
    let mut resolver = ImportResolver::new(&mut registry);
    for file in &files {
        imports.push(resolver.resolve_file(file)?);
    }

    let graph = RepoGraph {
        registry,
        files,
        imports,
        test_files,
        skipped,
    };
    info!(
        "graph built: {} files, {} modules, {} edges, {} skipped",
        graph.files.len(),
        graph.registry.len(),
        graph.edge_count(),
        graph.skipped.len()
    );
    Ok(graph)
}

/// Reads every discovered file in parallel; unreadable files go through
/// `policy`.
fn load_all(
    root: &Path,
    exclude: &[Regex],
    policy: ParsePolicy,
    skipped: &mut Vec<SkippedFile>,
) -> Result<Vec<SourceFile>> {
    let paths = discovery::discover(root, exclude)?;
    let loaded: Vec<_> = paths
        .into_par_iter()
        .map(|rel| {
            let outcome = SourceFile::load(root, &rel);
            (rel, outcome)
        })
        .collect();

    let mut kept = Vec::with_capacity(loaded.len());
    for (rel, outcome) in loaded {
        match outcome {
            Ok(file) => kept.push(file),
            Err(e) => skip_or_abort(rel, e, policy, skipped)?,
        }
    }
    Ok(kept)
}

/// Parses every file in parallel, caching each tree.
fn parse_all(
    files: Vec<SourceFile>,
    policy: ParsePolicy,
    skipped: &mut Vec<SkippedFile>,
) -> Result<Vec<SourceFile>> {
    let parsed: Vec<_> = files
        .into_par_iter()
        .map(|file| {
            let outcome = file.tree().map(|_| ());
            (file, outcome)
        })
        .collect();

    let mut kept = Vec::with_capacity(parsed.len());
    for (file, outcome) in parsed {
        match outcome {
            Ok(()) => kept.push(file),
            Err(e) => skip_or_abort(file.relative_path(), e, policy, skipped)?,
        }
    }
    Ok(kept)
}

fn skip_or_abort(
    path: PathBuf,
    error: ModgraphError,
    policy: ParsePolicy,
    skipped: &mut Vec<SkippedFile>,
) -> Result<()> {
    if policy == ParsePolicy::Abort {
        return Err(error);
    }
    warn!("skipping {}: {error}", path.display());
    skipped.push(SkippedFile {
        path,
        reason: error.to_string(),
    });
    Ok(())
}

/// The finished dependency graph in adjacency form.
#[derive(Debug)]
pub struct RepoGraph {
    registry: ModuleRegistry,
    files: Vec<Rc<SourceFile>>,
    /// Resolved imports, index-aligned with `files`.
    imports: Vec<Vec<ModuleId>>,
    test_files: Vec<SourceFile>,
    skipped: Vec<SkippedFile>,
}

impl RepoGraph {
    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.registry.get(id)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.registry.all()
    }

    /// Source files that made it into the graph, in discovery order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().map(Rc::as_ref)
    }

    #[must_use]
    pub fn test_files(&self) -> &[SourceFile] {
        &self.test_files
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Each file paired with its ordered import list.
    pub fn adjacency(&self) -> impl Iterator<Item = (&SourceFile, &[ModuleId])> {
        self.files
            .iter()
            .zip(&self.imports)
            .map(|(file, imports)| (file.as_ref(), imports.as_slice()))
    }

    /// Imports of the file backing module `id`.
    #[must_use]
    pub fn imports_of(&self, id: &str) -> Option<&[ModuleId]> {
        self.adjacency()
            .find(|(file, _)| file.module_id().as_str() == id)
            .map(|(_, imports)| imports)
    }

    /// Every import reference, in file order then statement order.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge<'_>> {
        self.adjacency().flat_map(move |(file, imports)| {
            imports.iter().filter_map(move |id| {
                self.registry.get(id.as_str()).map(|dependency| DependencyEdge {
                    consumer: file.module_id(),
                    dependency,
                })
            })
        })
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.imports.iter().map(Vec::len).sum()
    }

    /// Mean logical line count of graph sources.
    #[must_use]
    pub fn mean_loc(&self) -> Option<f64> {
        mean(self.files().map(SourceFile::loc))
    }

    /// Mean logical line count of test sources.
    #[must_use]
    pub fn mean_test_loc(&self) -> Option<f64> {
        mean(self.test_files.iter().map(SourceFile::loc))
    }

    /// Modules and edges as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let modules = self
            .modules()
            .map(|m| ModuleRecord {
                id: m.id(),
                kind: m.kind(),
                origin: m.origin(),
                import_count: m.import_count(),
                loc: m.source().map(SourceFile::loc),
            })
            .collect();
        let edges = self
            .edges()
            .map(|e| EdgeRecord {
                source: e.consumer,
                target: e.dependency.id(),
                kind: e.kind(),
            })
            .collect();
        let doc = GraphDocument {
            modules,
            edges,
            skipped: &self.skipped,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = usize>) -> Option<f64> {
    let (sum, count) = values.fold((0usize, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

#[derive(Serialize)]
struct GraphDocument<'g> {
    modules: Vec<ModuleRecord<'g>>,
    edges: Vec<EdgeRecord<'g>>,
    skipped: &'g [SkippedFile],
}

#[derive(Serialize)]
struct ModuleRecord<'g> {
    id: &'g ModuleId,
    kind: ModuleKind,
    origin: Origin,
    import_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    loc: Option<usize>,
}

#[derive(Serialize)]
struct EdgeRecord<'g> {
    source: &'g ModuleId,
    target: &'g ModuleId,
    kind: ModuleKind,
}
