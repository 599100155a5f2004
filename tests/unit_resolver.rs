// tests/unit_resolver.rs
//! Import resolution through the public resolver API.

use anyhow::Result;
use indoc::indoc;
use modgraph_core::graph::{
    ImportResolver, ImportStatement, Module, ModuleKind, ModuleRegistry, Resolution,
};
use modgraph_core::source::SourceFile;
use std::path::Path;
use std::rc::Rc;

fn registry_with(files: &[&SourceFile]) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    for file in files {
        let copy = SourceFile::from_text(&file.relative_path(), file.text());
        registry.register_source(Rc::new(copy));
    }
    registry
}

#[test]
fn test_relative_levels_from_nested_module() -> Result<()> {
    let file = SourceFile::from_text(
        Path::new("pkg/sub/mod.py"),
        "from . import x\nfrom .. import y\n",
    );
    let mut registry = registry_with(&[&file]);
    let imports = ImportResolver::new(&mut registry).resolve_file(&file)?;

    let ids: Vec<&str> = imports.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["pkg.sub.x", "pkg.y"]);
    Ok(())
}

#[test]
fn test_second_resolution_is_idempotent() -> Result<()> {
    let file = SourceFile::from_text(
        Path::new("app/views.py"),
        indoc! {"
            import os
            from .models import User
            from . import forms
        "},
    );
    let mut registry = registry_with(&[&file]);

    let first = ImportResolver::new(&mut registry).resolve_file(&file)?;
    let counts: Vec<usize> = registry.all().map(Module::import_count).collect();
    let second = ImportResolver::new(&mut registry).resolve_file(&file)?;
    let again: Vec<usize> = registry.all().map(Module::import_count).collect();

    assert_eq!(first, second);
    assert_eq!(counts, again);
    assert_eq!(registry.get("os").map(Module::import_count), Some(1));
    Ok(())
}

#[test]
fn test_statement_outcomes() {
    let file = SourceFile::from_text(Path::new("top.py"), "");
    let mut registry = ModuleRegistry::new();
    let mut resolver = ImportResolver::new(&mut registry);

    let import_os = ImportStatement::Plain {
        line: 1,
        names: vec!["os.path".to_string()],
    };
    assert_eq!(
        resolver.resolve_statement(&file, &import_os),
        vec![Resolution::Created("os".into())]
    );
    assert_eq!(
        resolver.resolve_statement(&file, &import_os),
        vec![Resolution::Existing("os".into())]
    );

    let too_high = ImportStatement::From {
        line: 3,
        level: 2,
        source: Some("pkg".to_string()),
        names: vec!["thing".to_string()],
    };
    let outcome = resolver.resolve_statement(&file, &too_high);
    assert!(matches!(
        outcome.as_slice(),
        [Resolution::Unresolved { line: 3, .. }]
    ));
    assert_eq!(registry.get("os").map(Module::import_count), Some(2));
}

#[test]
fn test_existing_internal_kind_is_kept() -> Result<()> {
    let helper = SourceFile::from_text(Path::new("helpers.py"), "");
    let user = SourceFile::from_text(Path::new("main.py"), "from helpers import tool\n");
    let mut registry = registry_with(&[&helper, &user]);

    ImportResolver::new(&mut registry).resolve_file(&user)?;
    let helpers = registry.get("helpers");
    assert_eq!(helpers.map(Module::kind), Some(ModuleKind::Internal));
    assert_eq!(helpers.map(Module::import_count), Some(1));
    Ok(())
}

#[test]
fn test_wildcard_refers_to_package() -> Result<()> {
    let file = SourceFile::from_text(Path::new("pkg/sub/mod.py"), "from .. import *\n");
    let mut registry = ModuleRegistry::new();
    let imports = ImportResolver::new(&mut registry).resolve_file(&file)?;

    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].as_str(), "pkg");
    assert!(registry.get("pkg").is_some_and(Module::is_unbacked_internal));
    Ok(())
}
