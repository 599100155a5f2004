// src/lib.rs
//! Import-level dependency graphs for Python codebases.
//!
//! Source files are discovered under a root, their import statements are
//! resolved to canonical module ids against a [`graph::ModuleRegistry`], and
//! the resulting edge list is mapped onto node sizes and colors before being
//! handed to a layout backend.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod render;
pub mod report;
pub mod source;

pub use error::{ModgraphError, Result};
