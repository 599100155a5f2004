// tests/unit_source.rs
//! Loading source files and deriving their module ids.

use anyhow::Result;
use indoc::indoc;
use modgraph_core::discovery;
use modgraph_core::source::SourceFile;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_load_from_disk() -> Result<()> {
    let temp = tempdir()?;
    fs::create_dir_all(temp.path().join("pkg/sub"))?;
    fs::write(
        temp.path().join("pkg/sub/mod.py"),
        indoc! {r#"
            """Module docstring."""

            import os


            def f(
                a,
            ):
                return a
        "#},
    )?;

    let file = SourceFile::load(temp.path(), Path::new("pkg/sub/mod.py"))?;
    assert_eq!(file.name(), "mod.py");
    assert_eq!(file.module_id().as_str(), "pkg.sub.mod");
    assert_eq!(file.segments(), ["pkg", "sub", "mod.py"]);
    assert_eq!(file.loc(), 6);
    assert!(!file.is_package_init());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SourceFile::load(Path::new("."), Path::new("no_such_module.py"));
    assert!(matches!(result, Err(modgraph_core::ModgraphError::Io { .. })));
}

#[test]
fn test_discovery_feeds_loading() -> Result<()> {
    let temp = tempdir()?;
    fs::create_dir_all(temp.path().join("pkg"))?;
    fs::create_dir_all(temp.path().join(".venv/lib"))?;
    fs::write(temp.path().join("pkg/__init__.py"), "")?;
    fs::write(temp.path().join(".venv/lib/site.py"), "")?;

    let paths = discovery::discover(temp.path(), &[])?;
    assert_eq!(paths.len(), 1);
    let file = SourceFile::load(temp.path(), &paths[0])?;
    assert!(file.is_package_init());
    assert_eq!(file.module_id().as_str(), "pkg");
    Ok(())
}
