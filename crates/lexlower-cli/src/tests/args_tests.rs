use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, ColorChoice};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["lexlower", "input.js"]).expect("default args should parse");

    assert_eq!(args.files, vec![PathBuf::from("input.js")]);
    assert!(args.config.is_none());
    assert!(args.out_dir.is_none());
    assert!(!args.stats);
    assert!(!args.emit_tree);
    assert!(!args.disallow_vars);
    assert!(!args.disallow_unknown_references);
    assert!(!args.disallow_duplicated);
    assert!(!args.detect_unmodified_lets);
    assert!(args.environments.is_empty());
    assert_eq!(args.color, ColorChoice::Auto);
}

#[test]
fn requires_an_input() {
    assert!(CliArgs::try_parse_from(["lexlower"]).is_err());
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "lexlower",
        "--config",
        "configs/lexlower-config.json",
        "--out-dir",
        "dist",
        "--stats",
        "--emit-tree",
        "--disallow-vars",
        "--disallow-unknown-references",
        "--disallow-duplicated",
        "--detect-unmodified-lets",
        "--color",
        "never",
        "src",
        "lib/a.js",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("configs/lexlower-config.json"))
    );
    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("dist")));
    assert!(args.stats);
    assert!(args.emit_tree);
    assert!(args.disallow_vars);
    assert!(args.disallow_unknown_references);
    assert!(args.disallow_duplicated);
    assert!(args.detect_unmodified_lets);
    assert_eq!(args.color, ColorChoice::Never);
    assert_eq!(args.files, vec![PathBuf::from("src"), PathBuf::from("lib/a.js")]);
}

#[test]
fn splits_comma_separated_lists() {
    let args = CliArgs::try_parse_from([
        "lexlower",
        "-e",
        "browser,node",
        "--environment",
        "mocha",
        "--readonly-global",
        "APP,VERSION",
        "--writable-global",
        "state",
        "input.js",
    ])
    .expect("list args should parse");

    assert_eq!(args.environments, vec!["browser", "node", "mocha"]);
    assert_eq!(args.readonly_globals, vec!["APP", "VERSION"]);
    assert_eq!(args.writable_globals, vec!["state"]);
}

#[test]
fn accepts_compatibility_aliases() {
    let args = CliArgs::try_parse_from(["lexlower", "--ast", "--outDir", "out", "input.js"])
        .expect("aliases should parse");
    assert!(args.emit_tree);
    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("out")));
}

#[test]
fn color_choice_follows_terminal_only_in_auto_mode() {
    assert!(ColorChoice::Auto.enabled(true));
    assert!(!ColorChoice::Auto.enabled(false));
    assert!(ColorChoice::Always.enabled(false));
    assert!(!ColorChoice::Never.enabled(true));
}
