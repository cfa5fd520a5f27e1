use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, LexlowerConfig, find_config, load_config, parse_config, resolve_args,
    resolve_options,
};

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["lexlower"];
    argv.extend_from_slice(extra);
    argv.push("input.js");
    CliArgs::try_parse_from(argv).expect("args should parse")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn parses_every_key() {
    let config = parse_config(
        r#"{
            "disallowVars": true,
            "disallowUnknownReferences": true,
            "disallowDuplicated": false,
            "detectUnmodifiedLets": true,
            "emitTree": false,
            "stats": true,
            "environments": ["browser", "node"],
            "globals": {"APP": false, "state": true},
            "readonlyGlobals": ["VERSION"],
            "writableGlobals": ["counter"]
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.disallow_vars, Some(true));
    assert_eq!(config.disallow_unknown_references, Some(true));
    assert_eq!(config.disallow_duplicated, Some(false));
    assert_eq!(config.detect_unmodified_lets, Some(true));
    assert_eq!(config.emit_tree, Some(false));
    assert_eq!(config.stats, Some(true));
    assert_eq!(
        config.environments,
        Some(vec!["browser".to_string(), "node".to_string()])
    );
    let globals = config.globals.expect("globals");
    assert_eq!(globals.get("APP"), Some(&false));
    assert_eq!(globals.get("state"), Some(&true));
    assert_eq!(config.readonly_globals, Some(vec!["VERSION".to_string()]));
    assert_eq!(config.writable_globals, Some(vec!["counter".to_string()]));
}

#[test]
fn booleans_accept_strings_and_numbers() {
    let config = parse_config(
        r#"{"disallowVars": "yes", "stats": 1, "disallowDuplicated": "off", "emitTree": "TRUE"}"#,
    )
    .expect("config should parse");
    assert_eq!(config.disallow_vars, Some(true));
    assert_eq!(config.stats, Some(true));
    assert_eq!(config.disallow_duplicated, Some(false));
    assert_eq!(config.emit_tree, Some(true));
}

#[test]
fn rejects_invalid_boolean_strings() {
    let error = parse_config(r#"{"stats": "sometimes"}"#).expect_err("invalid boolean");
    assert!(format!("{error:#}").contains("sometimes"), "{error:#}");
}

#[test]
fn ast_key_is_an_alias_for_emit_tree() {
    let config = parse_config(r#"{"ast": true}"#).expect("config should parse");
    assert_eq!(config.emit_tree, Some(true));
}

#[test]
fn ignores_unknown_keys() {
    let config = parse_config(r#"{"parse": {"loc": true}, "stats": false}"#).expect("config should parse");
    assert_eq!(config.stats, Some(false));
    assert_eq!(config.disallow_vars, None);
}

#[test]
fn flags_switch_options_on_over_config() {
    let config = LexlowerConfig {
        disallow_vars: Some(false),
        environments: Some(vec!["node".to_string()]),
        ..LexlowerConfig::default()
    };
    let resolved = resolve_options(
        &config,
        &args(&["--disallow-vars", "--stats", "-e", "browser,node"]),
    );
    assert!(resolved.lower.disallow_vars);
    assert!(resolved.stats);
    assert_eq!(resolved.lower.environments, vec!["node", "browser"]);
}

#[test]
fn config_values_apply_without_flags() {
    let config = LexlowerConfig {
        disallow_unknown_references: Some(true),
        detect_unmodified_lets: Some(true),
        readonly_globals: Some(vec!["VERSION".to_string()]),
        ..LexlowerConfig::default()
    };
    let resolved = resolve_options(&config, &args(&["--readonly-global", "APP"]));
    assert!(resolved.lower.disallow_unknown_references);
    assert!(resolved.lower.detect_unmodified_lets);
    assert!(!resolved.lower.disallow_vars);
    assert!(!resolved.stats);
    assert_eq!(resolved.lower.readonly_globals, vec!["VERSION", "APP"]);
}

#[test]
fn finds_config_in_working_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert_eq!(find_config(&args(&[]), dir.path()).expect("lookup"), None);

    let path = write_file(dir.path(), CONFIG_FILE_NAME, r#"{"stats": true}"#);
    assert_eq!(find_config(&args(&[]), dir.path()).expect("lookup"), Some(path));
    let resolved = resolve_args(&args(&[]), dir.path()).expect("resolve");
    assert!(resolved.stats);
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = find_config(&args(&["--config", "missing.json"]), dir.path()).expect_err("missing");
    assert!(error.to_string().contains("config file not found"), "{error}");

    write_file(dir.path(), "custom.json", r#"{"disallowVars": "true"}"#);
    let resolved = resolve_args(&args(&["--config", "custom.json"]), dir.path()).expect("resolve");
    assert!(resolved.lower.disallow_vars);
}

#[test]
fn load_reports_the_file_on_syntax_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(dir.path(), CONFIG_FILE_NAME, "{ not json");
    let error = load_config(&path).expect_err("invalid json");
    assert!(format!("{error:#}").contains(CONFIG_FILE_NAME), "{error:#}");
}
