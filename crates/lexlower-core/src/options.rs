//! Library configuration.

use indexmap::IndexMap;
use lexlower_binder::BinderOptions;
use lexlower_checker::CheckerOptions;
use serde::{Deserialize, Serialize};

/// Options for one lowering run. Every switch defaults to off.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LowerOptions {
    /// Reject `var` declarations.
    pub disallow_vars: bool,
    /// Reject references to undeclared globals.
    pub disallow_unknown_references: bool,
    /// Reject every redeclaration, including `var`/`function` ones.
    pub disallow_duplicated: bool,
    /// Environment presets whose globals are known (`browser`, `node`, ...).
    pub environments: Vec<String>,
    /// Extra globals. `true` marks a global writable.
    pub globals: IndexMap<String, bool>,
    pub readonly_globals: Vec<String>,
    pub writable_globals: Vec<String>,
    /// Return the lowered syntax tree as ESTree JSON instead of text.
    pub emit_tree: bool,
    /// Warn about `let` declarations that are never written.
    pub detect_unmodified_lets: bool,
}

impl LowerOptions {
    pub fn binder_options(&self) -> BinderOptions {
        BinderOptions {
            disallow_vars: self.disallow_vars,
            disallow_unknown_references: self.disallow_unknown_references,
            disallow_duplicated: self.disallow_duplicated,
            environments: self.environments.clone(),
            globals: self.globals.clone(),
            readonly_globals: self.readonly_globals.clone(),
            writable_globals: self.writable_globals.clone(),
        }
    }

    pub fn checker_options(&self) -> CheckerOptions {
        CheckerOptions {
            detect_unmodified_lets: self.detect_unmodified_lets,
        }
    }
}
