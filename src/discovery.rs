// src/discovery.rs
use crate::config::PRUNE_DIRS;
use crate::error::{ModgraphError, Result};
use crate::source::SOURCE_EXT;
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Finds every Python source under `root`, as root-relative paths.
///
/// Paths are sorted, so graph construction is deterministic.
///
/// # Errors
/// Returns `InvalidInput` if `root` is not an existing directory.
pub fn discover(root: &Path, exclude: &[Regex]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ModgraphError::InvalidInput(format!(
            "source root {} does not exist or is not a directory",
            root.display()
        )));
    }

    let raw_files = walk_filesystem(root);
    let sources = filter_sources(raw_files);
    let final_files = filter_excluded(sources, exclude);
    debug!("discovered {} sources under {}", final_files.len(), root.display());
    Ok(final_files)
}

fn walk_filesystem(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(e));

    let (paths, error_count) = accumulate_walker(root, walker);
    if error_count > 0 {
        warn!("Encountered {error_count} errors during file walk");
    }
    paths
}

fn should_prune(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && PRUNE_DIRS.iter().any(|d| *d == name)
}

fn accumulate_walker<I>(root: &Path, walker: I) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    let p = entry.path().strip_prefix(root).unwrap_or(entry.path());
                    paths.push(p.to_path_buf());
                }
            }
            Err(_) => errors += 1,
        }
    }
    (paths, errors)
}

fn filter_sources(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == SOURCE_EXT))
        .collect()
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn filter_excluded(mut paths: Vec<PathBuf>, exclude: &[Regex]) -> Vec<PathBuf> {
    if !exclude.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            !exclude.iter().any(|re| re.is_match(&s))
        });
    }
    paths
}
