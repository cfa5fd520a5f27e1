use crate::environment::{COMPLEMENTARY_GLOBALS, PRESETS, find_preset};
use crate::scope::DeclarationKind;
use crate::state::{BinderOptions, BinderState};
use indexmap::IndexMap;
use lexlower_common::{DiagnosticLine, LineMap, diagnostic_codes};
use lexlower_parser::ParserState;

fn bind_empty(options: BinderOptions) -> BinderState {
    let source = "";
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new(options);
    binder.bind_source_file(&arena, root, &LineMap::build(source));
    binder
}

fn global_kind(binder: &BinderState, name: &str) -> Option<DeclarationKind> {
    binder
        .scopes
        .get(binder.environment_scope)
        .and_then(|scope| scope.kind_of(name))
}

#[test]
fn test_preset_lookup() {
    assert_eq!(find_preset("node").map(|p| p.name), Some("node"));
    assert!(find_preset("ecma").is_some());
    assert!(find_preset("reserved").is_some());
    assert!(find_preset("nope").is_none());
    for name in [
        "es6",
        "browser",
        "devel",
        "node",
        "worker",
        "nonstandard",
        "jquery",
        "mocha",
    ] {
        assert!(find_preset(name).is_some(), "missing preset {name}");
    }
}

#[test]
fn test_preset_names_are_unique() {
    for (i, preset) in PRESETS.iter().enumerate() {
        assert!(
            PRESETS[i + 1..].iter().all(|other| other.name != preset.name),
            "duplicate preset {}",
            preset.name
        );
    }
}

#[test]
fn test_builtin_globals_are_always_seeded_read_only() {
    let binder = bind_empty(BinderOptions::default());
    for &(name, _) in COMPLEMENTARY_GLOBALS {
        assert_eq!(global_kind(&binder, name), Some(DeclarationKind::Const));
    }
    assert_eq!(global_kind(&binder, "NaN"), Some(DeclarationKind::Const));
    assert_eq!(global_kind(&binder, "Math"), Some(DeclarationKind::Const));
    assert_eq!(global_kind(&binder, "window"), None);
    assert!(binder.get_diagnostics().is_empty());
}

#[test]
fn test_selected_presets_are_seeded() {
    let binder = bind_empty(BinderOptions {
        environments: vec!["browser".to_string(), "node".to_string()],
        ..BinderOptions::default()
    });
    assert_eq!(global_kind(&binder, "window"), Some(DeclarationKind::Const));
    assert_eq!(global_kind(&binder, "onload"), Some(DeclarationKind::Var));
    assert_eq!(global_kind(&binder, "exports"), Some(DeclarationKind::Var));
    assert_eq!(global_kind(&binder, "require"), Some(DeclarationKind::Const));
    assert!(binder.all_identifiers.contains("document"));
}

#[test]
fn test_unknown_environment_is_a_global_diagnostic() {
    let binder = bind_empty(BinderOptions {
        environments: vec!["browser".to_string(), "amiga".to_string()],
        ..BinderOptions::default()
    });
    let diagnostics = binder.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line, DiagnosticLine::Global);
    assert_eq!(diagnostics[0].code, diagnostic_codes::ENVIRONMENT_NOT_FOUND);
    assert_eq!(diagnostics[0].to_string(), "global: environment \"amiga\" not found");
    // The known preset is still applied.
    assert!(global_kind(&binder, "window").is_some());
}

#[test]
fn test_configured_globals_override_presets() {
    let mut globals = IndexMap::new();
    globals.insert("console".to_string(), true);
    globals.insert("myLib".to_string(), false);
    let binder = bind_empty(BinderOptions {
        globals,
        ..BinderOptions::default()
    });
    assert_eq!(global_kind(&binder, "console"), Some(DeclarationKind::Var));
    assert_eq!(global_kind(&binder, "myLib"), Some(DeclarationKind::Const));
}

#[test]
fn test_global_lists_and_clash() {
    let binder = bind_empty(BinderOptions {
        readonly_globals: vec!["ro".to_string(), "both".to_string()],
        writable_globals: vec!["rw".to_string(), "both".to_string()],
        ..BinderOptions::default()
    });
    assert_eq!(global_kind(&binder, "ro"), Some(DeclarationKind::Const));
    assert_eq!(global_kind(&binder, "rw"), Some(DeclarationKind::Var));
    let diagnostics = binder.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::GLOBAL_WRITABILITY_CLASH);
    assert_eq!(
        diagnostics[0].to_string(),
        "global: global variable both writeable and read-only clash"
    );
}

#[test]
fn test_environment_options_survive_seeding() {
    let options = BinderOptions {
        environments: vec!["mocha".to_string(), "amiga".to_string()],
        readonly_globals: vec!["APP".to_string()],
        ..BinderOptions::default()
    };
    let binder = bind_empty(options.clone());
    assert_eq!(binder.options, options);
    assert_eq!(binder.get_diagnostics().len(), 1);
    assert!(global_kind(&binder, "describe").is_some());
    assert_eq!(global_kind(&binder, "APP"), Some(DeclarationKind::Const));
}
