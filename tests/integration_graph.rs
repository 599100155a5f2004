// tests/integration_graph.rs
//! End-to-end graph construction over toy repositories on disk.

use anyhow::Result;
use indoc::indoc;
use modgraph_core::config::{Config, ParsePolicy};
use modgraph_core::graph::{Module, ModuleKind, Origin, RepoGraphBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, text: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    Ok(())
}

#[test]
fn test_two_file_repository() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "a.py", "import os\nfrom . import b\n")?;
    write(temp.path(), "b.py", "VALUE = 1\n")?;

    let graph = RepoGraphBuilder::new(temp.path()).build()?;

    let ids: BTreeSet<&str> = graph.modules().map(|m| m.id().as_str()).collect();
    assert_eq!(ids, BTreeSet::from(["a", "b", "os"]));
    assert_eq!(graph.module("os").map(Module::kind), Some(ModuleKind::External));
    assert_eq!(graph.module("os").map(Module::import_count), Some(1));
    assert_eq!(graph.module("b").map(Module::import_count), Some(1));

    let edges: Vec<(&str, &str)> = graph
        .edges()
        .map(|e| (e.consumer.as_str(), e.dependency.id().as_str()))
        .collect();
    assert_eq!(edges.len(), 2);
    assert!(edges.contains(&("a", "b")));
    assert!(edges.contains(&("a", "os")));
    Ok(())
}

#[test]
fn test_package_ids_are_unique() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "pkg/__init__.py", "")?;
    write(temp.path(), "pkg/sub/__init__.py", "")?;
    write(temp.path(), "pkg/sub/mod.py", "")?;
    write(temp.path(), "pkg/util.py", "")?;

    let graph = RepoGraphBuilder::new(temp.path()).build()?;

    let ids: Vec<&str> = graph.files().map(|f| f.module_id().as_str()).collect();
    let unique: BTreeSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(
        unique,
        BTreeSet::from(["pkg", "pkg.sub", "pkg.sub.mod", "pkg.util"])
    );
    Ok(())
}

#[test]
fn test_no_dangling_edges() -> Result<()> {
    let temp = tempdir()?;
    write(
        temp.path(),
        "app/main.py",
        indoc! {r#"
            import json
            import os.path as osp
            from collections import OrderedDict
            from .models import User
            from .. import settings
            from . import views, forms

            def handler():
                from .lazy import thing
                return thing
        "#},
    )?;
    write(temp.path(), "app/models.py", "from .base import Model\n")?;
    write(temp.path(), "app/base.py", "class Model: pass\n")?;

    let graph = RepoGraphBuilder::new(temp.path()).build()?;

    for edge in graph.edges() {
        assert!(graph.module(edge.consumer.as_str()).is_some());
        assert!(graph.module(edge.dependency.id().as_str()).is_some());
    }
    assert_eq!(graph.imports_of("app.main").map(<[_]>::len), Some(8));
    assert_eq!(graph.module("app.views").map(Module::origin), Some(Origin::Inferred));
    assert_eq!(graph.module("app.base").map(Module::origin), Some(Origin::Discovered));
    assert_eq!(graph.module("settings").map(Module::kind), Some(ModuleKind::Internal));
    assert_eq!(graph.module("os").map(Module::kind), Some(ModuleKind::External));
    Ok(())
}

#[test]
fn test_tests_stay_out_of_graph() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "src/lib.py", "x = 1\ny = 2\n")?;
    write(temp.path(), "tests/test_lib.py", "import pytest\nassert True\n")?;

    let graph = RepoGraphBuilder::new(temp.path().join("src"))
        .with_tests(temp.path().join("tests"))
        .build()?;

    assert!(graph.module("pytest").is_none());
    assert_eq!(graph.test_files().len(), 1);
    assert_eq!(graph.mean_test_loc(), Some(2.0));
    Ok(())
}

#[test]
fn test_broken_file_is_skipped_by_default() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "good.py", "import os\n")?;
    write(temp.path(), "bad.py", "import os\ndef broken(:\n")?;

    let graph = RepoGraphBuilder::new(temp.path()).build()?;
    assert!(graph.module("bad").is_none());
    assert_eq!(graph.module("os").map(Module::import_count), Some(1));
    assert_eq!(graph.skipped().len(), 1);

    let aborted = RepoGraphBuilder::new(temp.path())
        .on_parse_error(ParsePolicy::Abort)
        .build();
    assert!(aborted.is_err());
    Ok(())
}

#[test]
fn test_undecodable_file_is_skipped_by_default() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "good.py", "import os\n")?;
    fs::write(
        temp.path().join("legacy.py"),
        b"# -*- coding: latin-1 -*-\nimport sys\nname = 'caf\xe9'\n",
    )?;

    let graph = RepoGraphBuilder::new(temp.path()).build()?;
    assert!(graph.module("good").is_some());
    assert!(graph.module("legacy").is_none());
    assert!(graph.module("sys").is_none());
    assert_eq!(graph.skipped().len(), 1);
    assert_eq!(graph.skipped()[0].path, Path::new("legacy.py"));

    let aborted = RepoGraphBuilder::new(temp.path())
        .on_parse_error(ParsePolicy::Abort)
        .build();
    assert!(aborted.is_err());
    Ok(())
}

#[test]
fn test_undecodable_test_file_is_skipped() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "src/lib.py", "x = 1\n")?;
    write(temp.path(), "tests/test_ok.py", "assert True\n")?;
    fs::write(temp.path().join("tests/test_legacy.py"), b"s = '\xe9'\n")?;

    let graph = RepoGraphBuilder::new(temp.path().join("src"))
        .with_tests(temp.path().join("tests"))
        .build()?;
    assert_eq!(graph.test_files().len(), 1);
    assert_eq!(graph.skipped().len(), 1);
    assert_eq!(graph.skipped()[0].path, Path::new("test_legacy.py"));
    Ok(())
}

#[test]
fn test_builder_from_config() -> Result<()> {
    let temp = tempdir()?;
    write(temp.path(), "keep.py", "import re\n")?;
    write(temp.path(), "generated/skip.py", "import sys\n")?;

    let mut config = Config::new();
    config.source.root = temp.path().to_path_buf();
    config.exclude_patterns = vec![regex::Regex::new("^generated/")?];

    let graph = RepoGraphBuilder::from_config(&config).build()?;
    assert!(graph.module("re").is_some());
    assert!(graph.module("sys").is_none());
    Ok(())
}

#[test]
fn test_missing_root_is_reported() {
    let result = RepoGraphBuilder::new("does/not/exist").build();
    assert!(result.is_err());
}
