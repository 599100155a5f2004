// tests/cli_args.rs
use clap::Parser;
use modgraph_core::cli::{Cli, Commands};
use std::path::Path;

#[test]
fn test_render_flags() {
    let cli = Cli::try_parse_from([
        "modgraph",
        "--root",
        "src",
        "render",
        "--out-dir",
        "out",
        "--dot-only",
    ]);
    let Ok(cli) = cli else {
        panic!("render arguments should parse");
    };
    assert_eq!(cli.root.as_deref(), Some(Path::new("src")));
    assert!(matches!(
        cli.command,
        Commands::Render { out_dir: Some(ref dir), dot_only: true } if dir == Path::new("out")
    ));
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["modgraph", "summary", "--top", "3", "-v", "--tests", "tests"]);
    let Ok(cli) = cli else {
        panic!("summary arguments should parse");
    };
    assert!(cli.verbose);
    assert_eq!(cli.tests.as_deref(), Some(Path::new("tests")));
    assert!(matches!(cli.command, Commands::Summary { top: 3 }));
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["modgraph"]).is_err());
    assert!(Cli::try_parse_from(["modgraph", "edges", "--json"]).is_ok());
}
