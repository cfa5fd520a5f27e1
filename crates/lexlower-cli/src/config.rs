//! `lexlower-config.json` loading and merging with command-line flags.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use lexlower_core::LowerOptions;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "lexlower-config.json";

/// Custom deserializer for boolean options that accepts both bool and string values.
/// This handles cases where config files use `"true"` or `"false"` strings instead of
/// boolean literals.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Number(u64),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Number(n)) => Ok(Some(n != 0)),
        Some(BoolOrString::String(s)) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
                ))),
            }
        }
    }
}

/// Contents of a config file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexlowerConfig {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub disallow_vars: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub disallow_unknown_references: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub disallow_duplicated: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub detect_unmodified_lets: Option<bool>,
    #[serde(default, alias = "ast", deserialize_with = "deserialize_bool_or_string")]
    pub emit_tree: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub stats: Option<bool>,
    #[serde(default)]
    pub environments: Option<Vec<String>>,
    #[serde(default)]
    pub globals: Option<IndexMap<String, bool>>,
    #[serde(default)]
    pub readonly_globals: Option<Vec<String>>,
    #[serde(default)]
    pub writable_globals: Option<Vec<String>>,
}

/// Everything a run needs after config and flags are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub lower: LowerOptions,
    pub stats: bool,
}

pub fn parse_config(source: &str) -> Result<LexlowerConfig> {
    serde_json::from_str(source).context("failed to parse lexlower config")
}

pub fn load_config(path: &Path) -> Result<LexlowerConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// The config file to use: `--config` when given, otherwise
/// `lexlower-config.json` in `cwd` when it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.config {
        let path = cwd.join(path);
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
        return Ok(Some(path));
    }
    let default = cwd.join(CONFIG_FILE_NAME);
    Ok(default.is_file().then_some(default))
}

/// Merge a config file with flags. Flags switch options on; list flags
/// extend the configured lists.
pub fn resolve_options(config: &LexlowerConfig, args: &CliArgs) -> ResolvedOptions {
    let flag = |configured: Option<bool>, set: bool| set || configured.unwrap_or(false);

    let mut environments = config.environments.clone().unwrap_or_default();
    extend_unique(&mut environments, &args.environments);
    let mut readonly_globals = config.readonly_globals.clone().unwrap_or_default();
    extend_unique(&mut readonly_globals, &args.readonly_globals);
    let mut writable_globals = config.writable_globals.clone().unwrap_or_default();
    extend_unique(&mut writable_globals, &args.writable_globals);

    let lower = LowerOptions {
        disallow_vars: flag(config.disallow_vars, args.disallow_vars),
        disallow_unknown_references: flag(
            config.disallow_unknown_references,
            args.disallow_unknown_references,
        ),
        disallow_duplicated: flag(config.disallow_duplicated, args.disallow_duplicated),
        environments,
        globals: config.globals.clone().unwrap_or_default(),
        readonly_globals,
        writable_globals,
        emit_tree: flag(config.emit_tree, args.emit_tree),
        detect_unmodified_lets: flag(config.detect_unmodified_lets, args.detect_unmodified_lets),
    };
    ResolvedOptions {
        lower,
        stats: flag(config.stats, args.stats),
    }
}

/// Load the config (if any) for `args` and merge it with the flags.
pub fn resolve_args(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config = match find_config(args, cwd)? {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => LexlowerConfig::default(),
    };
    Ok(resolve_options(&config, args))
}

fn extend_unique(into: &mut Vec<String>, from: &[String]) {
    for name in from {
        if !into.contains(name) {
            into.push(name.clone());
        }
    }
}
