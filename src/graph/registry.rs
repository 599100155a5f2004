// src/graph/registry.rs
//! The single source of truth for module identity and import counts.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::module::{Module, ModuleId, ModuleKind, Origin};
use crate::source::SourceFile;

/// Maps module ids to their records. Grows only; nothing is ever removed.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleId, Module>,
    /// Per-file resolution results, keyed by root-relative path.
    resolved: HashMap<PathBuf, Vec<ModuleId>>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the internal module backed by `file`.
    ///
    /// Returns false if a module with the same id already exists; the
    /// existing record is kept untouched.
    pub fn register_source(&mut self, file: Rc<SourceFile>) -> bool {
        if self.modules.contains_key(file.module_id()) {
            return false;
        }
        let module = Module::discovered(file);
        self.modules.insert(module.id().clone(), module);
        true
    }

    /// Returns the module for `id`, creating it with `kind` if absent.
    ///
    /// An existing module keeps its original kind.
    pub fn get_or_create(&mut self, id: &ModuleId, kind: ModuleKind) -> &Module {
        self.modules
            .entry(id.clone())
            .or_insert_with(|| Module::inferred(id.clone(), kind))
    }

    /// Increments the import count of `id`; returns the new count.
    ///
    /// Unknown ids are left alone and yield `None`.
    pub fn register_import(&mut self, id: &ModuleId) -> Option<usize> {
        self.modules.get_mut(id).map(Module::bump)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// All modules, ordered by id.
    pub fn all(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn of_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &Module> {
        self.modules.values().filter(move |m| m.kind() == kind)
    }

    /// Internal modules the resolver created without a backing file.
    pub fn inferred(&self) -> impl Iterator<Item = &Module> {
        self.of_kind(ModuleKind::Internal)
            .filter(|m| m.origin() == Origin::Inferred)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn cached_imports(&self, file: &Path) -> Option<&[ModuleId]> {
        self.resolved.get(file).map(Vec::as_slice)
    }

    pub(crate) fn cache_imports(&mut self, file: PathBuf, imports: Vec<ModuleId>) {
        self.resolved.insert(file, imports);
    }
}
