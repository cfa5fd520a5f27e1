//! Standard-environment globals and seeding of the outermost scope.
//!
//! Each preset maps a global name to whether scripts may assign to it.
//! Writable globals are seeded as `var`, read-only ones as `const`, so the
//! const-assignment check also covers assignments to read-only globals.

use lexlower_common::messages;
use lexlower_parser::NodeIndex;
use tracing::debug;

use crate::scope::{Declaration, DeclarationKind};
use crate::state::BinderState;

/// A named table of globals.
#[derive(Clone, Copy, Debug)]
pub struct EnvironmentPreset {
    pub name: &'static str,
    /// `(name, writable)` pairs.
    pub globals: &'static [(&'static str, bool)],
}

/// Always present, always read-only.
pub const COMPLEMENTARY_GLOBALS: &[(&str, bool)] =
    &[("undefined", false), ("Infinity", false), ("console", false)];

pub const RESERVED: EnvironmentPreset = EnvironmentPreset {
    name: "reserved",
    globals: &[("arguments", false), ("NaN", false)],
};

pub const ECMA: EnvironmentPreset = EnvironmentPreset {
    name: "ecma",
    globals: &[
        ("Array", false),
        ("Boolean", false),
        ("Date", false),
        ("decodeURI", false),
        ("decodeURIComponent", false),
        ("encodeURI", false),
        ("encodeURIComponent", false),
        ("Error", false),
        ("eval", false),
        ("EvalError", false),
        ("Function", false),
        ("hasOwnProperty", false),
        ("isFinite", false),
        ("isNaN", false),
        ("JSON", false),
        ("Math", false),
        ("Number", false),
        ("Object", false),
        ("parseInt", false),
        ("parseFloat", false),
        ("RangeError", false),
        ("ReferenceError", false),
        ("RegExp", false),
        ("String", false),
        ("SyntaxError", false),
        ("TypeError", false),
        ("URIError", false),
    ],
};

pub const ES6: EnvironmentPreset = EnvironmentPreset {
    name: "es6",
    globals: &[
        ("ArrayBuffer", false),
        ("DataView", false),
        ("Float32Array", false),
        ("Float64Array", false),
        ("Int8Array", false),
        ("Int16Array", false),
        ("Int32Array", false),
        ("Map", false),
        ("Promise", false),
        ("Proxy", false),
        ("Reflect", false),
        ("Set", false),
        ("Symbol", false),
        ("Uint8Array", false),
        ("Uint8ClampedArray", false),
        ("Uint16Array", false),
        ("Uint32Array", false),
        ("WeakMap", false),
        ("WeakSet", false),
    ],
};

pub const BROWSER: EnvironmentPreset = EnvironmentPreset {
    name: "browser",
    globals: &[
        ("addEventListener", false),
        ("atob", false),
        ("Blob", false),
        ("blur", false),
        ("btoa", false),
        ("cancelAnimationFrame", false),
        ("clearInterval", false),
        ("clearTimeout", false),
        ("close", false),
        ("closed", false),
        ("CustomEvent", false),
        ("defaultStatus", false),
        ("document", false),
        ("DOMParser", false),
        ("Element", false),
        ("event", false),
        ("Event", false),
        ("FileReader", false),
        ("FormData", false),
        ("focus", false),
        ("frames", false),
        ("getComputedStyle", false),
        ("HTMLElement", false),
        ("history", false),
        ("Image", false),
        ("length", false),
        ("localStorage", false),
        ("location", false),
        ("matchMedia", false),
        ("MessageChannel", false),
        ("MessageEvent", false),
        ("moveBy", false),
        ("moveTo", false),
        ("MutationObserver", false),
        ("name", false),
        ("navigator", false),
        ("Node", false),
        ("NodeList", false),
        ("onbeforeunload", true),
        ("onblur", true),
        ("onerror", true),
        ("onfocus", true),
        ("onload", true),
        ("onresize", true),
        ("onunload", true),
        ("open", false),
        ("opener", false),
        ("Option", false),
        ("parent", false),
        ("print", false),
        ("removeEventListener", false),
        ("requestAnimationFrame", false),
        ("resizeBy", false),
        ("resizeTo", false),
        ("screen", false),
        ("scroll", false),
        ("scrollBy", false),
        ("scrollTo", false),
        ("sessionStorage", false),
        ("setInterval", false),
        ("setTimeout", false),
        ("status", true),
        ("top", false),
        ("WebSocket", false),
        ("window", false),
        ("Worker", false),
        ("XMLHttpRequest", false),
        ("XMLSerializer", false),
        ("XPathEvaluator", false),
        ("XPathResult", false),
    ],
};

pub const DEVEL: EnvironmentPreset = EnvironmentPreset {
    name: "devel",
    globals: &[
        ("alert", false),
        ("confirm", false),
        ("console", false),
        ("Debug", false),
        ("opera", false),
        ("prompt", false),
    ],
};

pub const NODE: EnvironmentPreset = EnvironmentPreset {
    name: "node",
    globals: &[
        ("__filename", false),
        ("__dirname", false),
        ("Buffer", false),
        ("clearImmediate", false),
        ("clearInterval", false),
        ("clearTimeout", false),
        ("console", false),
        ("exports", true),
        ("GLOBAL", false),
        ("global", false),
        ("module", false),
        ("process", false),
        ("require", false),
        ("setImmediate", false),
        ("setInterval", false),
        ("setTimeout", false),
    ],
};

pub const WORKER: EnvironmentPreset = EnvironmentPreset {
    name: "worker",
    globals: &[
        ("importScripts", true),
        ("postMessage", true),
        ("self", true),
    ],
};

pub const NONSTANDARD: EnvironmentPreset = EnvironmentPreset {
    name: "nonstandard",
    globals: &[("escape", false), ("unescape", false)],
};

pub const JQUERY: EnvironmentPreset = EnvironmentPreset {
    name: "jquery",
    globals: &[("$", false), ("jQuery", false)],
};

pub const MOCHA: EnvironmentPreset = EnvironmentPreset {
    name: "mocha",
    globals: &[
        ("after", false),
        ("afterEach", false),
        ("before", false),
        ("beforeEach", false),
        ("context", false),
        ("describe", false),
        ("it", false),
        ("setup", false),
        ("suite", false),
        ("suiteSetup", false),
        ("suiteTeardown", false),
        ("teardown", false),
        ("test", false),
        ("xdescribe", false),
        ("xit", false),
    ],
};

/// Every preset selectable by name.
pub static PRESETS: &[EnvironmentPreset] = &[
    RESERVED,
    ECMA,
    ES6,
    BROWSER,
    DEVEL,
    NODE,
    WORKER,
    NONSTANDARD,
    JQUERY,
    MOCHA,
];

pub fn find_preset(name: &str) -> Option<&'static EnvironmentPreset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

impl BinderState {
    /// Fill the environment scope. Later sources override earlier ones:
    /// complementary globals, `reserved`, `ecma`, the configured presets,
    /// then the configured globals.
    pub(crate) fn seed_environment(&mut self) {
        self.inject_globals(COMPLEMENTARY_GLOBALS);
        self.inject_globals(RESERVED.globals);
        self.inject_globals(ECMA.globals);

        let environments = self.options.environments.clone();
        for environment in &environments {
            match find_preset(environment) {
                Some(preset) => self.inject_globals(preset.globals),
                None => {
                    self.global_error(&messages::ENVIRONMENT_NOT_FOUND, &[environment.as_str()]);
                }
            }
        }

        let globals: Vec<(String, bool)> = self
            .options
            .globals
            .iter()
            .map(|(name, &writable)| (name.clone(), writable))
            .collect();
        for (name, writable) in &globals {
            self.inject_global(name, *writable);
        }

        let readonly = self.options.readonly_globals.clone();
        let writable = self.options.writable_globals.clone();
        for name in &readonly {
            if writable.contains(name) {
                self.global_error(&messages::GLOBAL_WRITABILITY_CLASH, &[name.as_str()]);
                continue;
            }
            self.inject_global(name, false);
        }
        for name in writable.iter().filter(|name| !readonly.contains(name)) {
            self.inject_global(name, true);
        }

        debug!(
            globals = self
                .scopes
                .get(self.environment_scope)
                .map_or(0, |scope| scope.declarations.len()),
            "seeded environment scope"
        );
    }

    fn inject_globals(&mut self, globals: &[(&str, bool)]) {
        for &(name, writable) in globals {
            self.inject_global(name, writable);
        }
    }

    fn inject_global(&mut self, name: &str, writable: bool) {
        let Some(scope) = self.scopes.get_mut(self.environment_scope) else {
            return;
        };
        let kind = if writable {
            DeclarationKind::Var
        } else {
            DeclarationKind::Const
        };
        scope.declarations.shift_remove(name);
        scope.declarations.insert(
            name.to_string(),
            Declaration::new(kind, NodeIndex::NONE, None),
        );
    }
}
