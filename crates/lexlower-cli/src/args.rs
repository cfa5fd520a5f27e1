use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the lexlower binary.
#[derive(Parser, Debug)]
#[command(
    name = "lexlower",
    version,
    about = "Lower block-scoped let/const declarations to var"
)]
pub struct CliArgs {
    // ==================== Input and Output ====================
    /// JavaScript files or directories to lower.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Path to a lexlower-config.json. Defaults to the one in the working
    /// directory, if any.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write lowered files under this directory instead of stdout.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Print the const/let statistics instead of the lowered source.
    #[arg(long)]
    pub stats: bool,

    /// Print the lowered syntax tree as ESTree JSON instead of source text.
    #[arg(long = "emit-tree", alias = "ast")]
    pub emit_tree: bool,

    // ==================== Checks ====================
    /// Reject `var` declarations.
    #[arg(long = "disallow-vars")]
    pub disallow_vars: bool,

    /// Reject references to undeclared globals.
    #[arg(long = "disallow-unknown-references")]
    pub disallow_unknown_references: bool,

    /// Reject every redeclaration, including `var` and `function` ones.
    #[arg(long = "disallow-duplicated")]
    pub disallow_duplicated: bool,

    /// Warn about `let` declarations that are never written.
    #[arg(long = "detect-unmodified-lets")]
    pub detect_unmodified_lets: bool,

    // ==================== Globals ====================
    /// Environment presets whose globals are known (e.g. `browser,node`).
    #[arg(short = 'e', long = "environment", value_delimiter = ',')]
    pub environments: Vec<String>,

    /// Extra read-only globals.
    #[arg(long = "readonly-global", value_delimiter = ',')]
    pub readonly_globals: Vec<String>,

    /// Extra writable globals.
    #[arg(long = "writable-global", value_delimiter = ',')]
    pub writable_globals: Vec<String>,

    // ==================== Reporting ====================
    /// When to color diagnostics.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against whether the target stream is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}
