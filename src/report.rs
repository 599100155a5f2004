// src/report.rs
//! Terminal summaries of a built graph.

use std::fmt::Write;

use colored::Colorize;

use crate::graph::{Module, ModuleKind, RepoGraph};

/// Counts, mean line counts, the `top` most imported modules per kind, then
/// inferred modules and skipped files.
#[must_use]
pub fn summarize(graph: &RepoGraph, top: usize) -> String {
    let mut out = String::new();
    let registry = graph.registry();
    let internal = registry.of_kind(ModuleKind::Internal).count();
    let external = registry.of_kind(ModuleKind::External).count();

    let _ = writeln!(out, "{}", "MODULE GRAPH".bold());
    let _ = writeln!(out, "  files:    {}", graph.files().count());
    let _ = writeln!(out, "  internal: {}", internal.to_string().blue());
    let _ = writeln!(out, "  external: {}", external.to_string().red());
    let _ = writeln!(out, "  edges:    {}", graph.edge_count());
    let _ = writeln!(out, "  mean LOC: {}", format_mean(graph.mean_loc()));
    if !graph.test_files().is_empty() {
        let _ = writeln!(
            out,
            "  mean test LOC: {} ({} files)",
            format_mean(graph.mean_test_loc()),
            graph.test_files().len()
        );
    }

    for kind in [ModuleKind::Internal, ModuleKind::External] {
        write_top(&mut out, graph, kind, top);
    }

    let inferred: Vec<&Module> = registry.inferred().collect();
    if !inferred.is_empty() {
        let _ = writeln!(out, "\n{}", "Inferred internal modules (no source file)".yellow());
        for module in inferred {
            let _ = writeln!(out, "  {} ({} imports)", module.id(), module.import_count());
        }
    }

    if !graph.skipped().is_empty() {
        let _ = writeln!(out, "\n{}", "Skipped files".yellow());
        for skipped in graph.skipped() {
            let _ = writeln!(out, "  {}: {}", skipped.path.display(), skipped.reason);
        }
    }
    out
}

fn write_top(out: &mut String, graph: &RepoGraph, kind: ModuleKind, top: usize) {
    let mut modules: Vec<&Module> = graph
        .registry()
        .of_kind(kind)
        .filter(|m| m.import_count() > 0)
        .collect();
    if modules.is_empty() || top == 0 {
        return;
    }
    modules.sort_by(|a, b| {
        b.import_count()
            .cmp(&a.import_count())
            .then_with(|| a.id().cmp(b.id()))
    });

    let _ = writeln!(out, "\n{}", format!("Most imported {} modules", kind.label()).bold());
    for module in modules.into_iter().take(top) {
        let _ = writeln!(out, "  {:>5}  {}", module.import_count(), module.id());
    }
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map_or_else(|| "-".to_string(), |m| format!("{m:.1}"))
}

/// One `consumer -> dependency` line per import reference.
#[must_use]
pub fn edge_list(graph: &RepoGraph) -> String {
    let mut out = String::new();
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "{} -> {} ({})",
            edge.consumer,
            edge.dependency.id(),
            edge.kind().label()
        );
    }
    out
}
