// src/graph/mod.rs
//! Module identity, import resolution and graph assembly.

pub mod builder;
pub mod imports;
pub mod module;
pub mod registry;
pub mod resolver;

pub use builder::{build_from_files, DependencyEdge, RepoGraph, RepoGraphBuilder, SkippedFile};
pub use imports::ImportStatement;
pub use module::{Module, ModuleId, ModuleKind, Origin};
pub use registry::ModuleRegistry;
pub use resolver::{ImportResolver, ImportTarget, Resolution};
