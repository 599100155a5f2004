// src/graph/module.rs
//! Module identity and classification.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::source::SourceFile;

/// Canonical dotted module identifier (`pkg.sub.mod`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Lives inside the analyzed tree.
    Internal,
    /// Referenced but not discovered; third-party or standard library.
    External,
}

impl ModuleKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// How a module record came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Backed by a discovered source file.
    Discovered,
    /// Created on first reference by the resolver.
    Inferred,
}

/// A node of the dependency graph.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    kind: ModuleKind,
    origin: Origin,
    source: Option<Rc<SourceFile>>,
    import_count: usize,
}

impl Module {
    #[must_use]
    pub(crate) fn discovered(file: Rc<SourceFile>) -> Self {
        Self {
            id: file.module_id().clone(),
            kind: ModuleKind::Internal,
            origin: Origin::Discovered,
            source: Some(file),
            import_count: 0,
        }
    }

    #[must_use]
    pub(crate) fn inferred(id: ModuleId, kind: ModuleKind) -> Self {
        Self {
            id,
            kind,
            origin: Origin::Inferred,
            source: None,
            import_count: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Backing file, present only for discovered internal modules.
    #[must_use]
    pub fn source(&self) -> Option<&SourceFile> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn import_count(&self) -> usize {
        self.import_count
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.kind == ModuleKind::Internal
    }

    /// Internal module that no discovered file backs.
    #[must_use]
    pub fn is_unbacked_internal(&self) -> bool {
        self.is_internal() && self.source.is_none()
    }

    pub(crate) fn bump(&mut self) -> usize {
        self.import_count += 1;
        self.import_count
    }
}
