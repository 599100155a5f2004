// src/graph/resolver.rs
//! Resolves import statements to canonical module ids.

use log::{debug, warn};

use super::imports::{self, ImportStatement, WILDCARD};
use super::module::{ModuleId, ModuleKind};
use super::registry::ModuleRegistry;
use crate::error::Result;
use crate::source::SourceFile;

/// Outcome of resolving a single import reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target was already registered.
    Existing(ModuleId),
    /// The target did not exist and was created on this reference.
    Created(ModuleId),
    /// The reference could not be mapped to a module id.
    Unresolved { line: usize, reason: String },
}

impl Resolution {
    /// The module id, if resolution succeeded.
    #[must_use]
    pub fn id(&self) -> Option<&ModuleId> {
        match self {
            Self::Existing(id) | Self::Created(id) => Some(id),
            Self::Unresolved { .. } => None,
        }
    }
}

/// Where one import reference points, before touching the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub id: ModuleId,
    pub kind: ModuleKind,
}

pub type TargetResult = std::result::Result<ImportTarget, String>;

/// Maps a statement to its targets: one per name for plain imports and for
/// source-less relative imports, otherwise one per statement. An `Err` entry
/// carries the reason a reference could not be mapped.
#[must_use]
pub fn targets(file: &SourceFile, statement: &ImportStatement) -> Vec<TargetResult> {
    match statement {
        ImportStatement::Plain { names, .. } => names
            .iter()
            .map(|name| Ok(external(name.split('.').next().unwrap_or(name))))
            .collect(),
        ImportStatement::From {
            level: 0, source, ..
        } => match source {
            Some(source) => vec![Ok(external(source))],
            None => vec![Err("from-import without a module".to_string())],
        },
        ImportStatement::From {
            level,
            source,
            names,
            ..
        } => relative_targets(file, *level, source.as_deref(), names),
    }
}

fn relative_targets(
    file: &SourceFile,
    level: usize,
    source: Option<&str>,
    names: &[String],
) -> Vec<TargetResult> {
    let Some(base) = relative_base(file.segments(), level) else {
        return vec![Err(format!(
            "relative import of level {level} climbs above the analysis root"
        ))];
    };

    if let Some(source) = source {
        return vec![Ok(internal(&base, source))];
    }

    names
        .iter()
        .map(|name| {
            if name != WILDCARD {
                Ok(internal(&base, name))
            } else if base.is_empty() {
                Err("wildcard import of the analysis root".to_string())
            } else {
                Ok(ImportTarget {
                    id: ModuleId::new(base.join(".")),
                    kind: ModuleKind::Internal,
                })
            }
        })
        .collect()
}

/// Drops the basename plus `level - 1` trailing directories.
fn relative_base(segments: &[String], level: usize) -> Option<Vec<&str>> {
    let dirs = segments.split_last().map_or(&[][..], |(_, dirs)| dirs);
    let keep = dirs.len().checked_sub(level.checked_sub(1)?)?;
    Some(dirs.iter().take(keep).map(String::as_str).collect())
}

fn internal(base: &[&str], tail: &str) -> ImportTarget {
    let mut parts = base.to_vec();
    parts.push(tail);
    ImportTarget {
        id: ModuleId::new(parts.join(".")),
        kind: ModuleKind::Internal,
    }
}

fn external(id: &str) -> ImportTarget {
    ImportTarget {
        id: ModuleId::new(id),
        kind: ModuleKind::External,
    }
}

/// Resolves the imports of source files against a registry.
pub struct ImportResolver<'r> {
    registry: &'r mut ModuleRegistry,
}

impl<'r> ImportResolver<'r> {
    pub fn new(registry: &'r mut ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Returns the ordered imports of `file`, one entry per reference.
    ///
    /// Counts are registered on the first call only; later calls return the
    /// cached list without touching the registry.
    ///
    /// # Errors
    /// Returns a parse error if the file's syntax tree cannot be built.
    pub fn resolve_file(&mut self, file: &SourceFile) -> Result<Vec<ModuleId>> {
        let key = file.relative_path();
        if let Some(cached) = self.registry.cached_imports(&key) {
            return Ok(cached.to_vec());
        }

        let tree = file.tree()?;
        let mut resolved = Vec::new();
        for statement in imports::extract(tree, file.text()) {
            for resolution in self.resolve_statement(file, &statement) {
                match resolution {
                    Resolution::Existing(id) | Resolution::Created(id) => resolved.push(id),
                    Resolution::Unresolved { line, reason } => {
                        warn!("{}:{line}: unresolved import ({reason})", key.display());
                    }
                }
            }
        }

        debug!("{} -> {} imports", file.module_id(), resolved.len());
        self.registry.cache_imports(key, resolved.clone());
        Ok(resolved)
    }

    /// Resolves one statement and counts every successful reference.
    pub fn resolve_statement(
        &mut self,
        file: &SourceFile,
        statement: &ImportStatement,
    ) -> Vec<Resolution> {
        targets(file, statement)
            .into_iter()
            .map(|target| match target {
                Ok(target) => self.resolve_target(&target),
                Err(reason) => Resolution::Unresolved {
                    line: statement.line(),
                    reason,
                },
            })
            .collect()
    }

    fn resolve_target(&mut self, target: &ImportTarget) -> Resolution {
        let existed = self.registry.contains(target.id.as_str());
        let module = self.registry.get_or_create(&target.id, target.kind);
        if !existed && module.is_unbacked_internal() {
            debug!("inferred internal module {}", module.id());
        }
        self.registry.register_import(&target.id);

        if existed {
            Resolution::Existing(target.id.clone())
        } else {
            Resolution::Created(target.id.clone())
        }
    }
}
