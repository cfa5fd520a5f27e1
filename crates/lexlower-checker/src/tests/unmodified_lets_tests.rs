use crate::state::{CheckerOptions, CheckerState};
use lexlower_binder::{BinderOptions, BinderState};
use lexlower_common::{DiagnosticCategory, LineMap};
use lexlower_parser::ParserState;

fn check(source: &str, detect_unmodified_lets: bool) -> Vec<(DiagnosticCategory, String)> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);

    let options = CheckerOptions {
        detect_unmodified_lets,
    };
    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, options);
    checker.check_source_file(root);
    checker
        .get_diagnostics()
        .iter()
        .map(|d| (d.category, d.to_string()))
        .collect()
}

#[test]
fn test_disabled_by_default() {
    assert!(check("function f() { let x = 1; return x; }\n", false).is_empty());
}

#[test]
fn test_reports_unmodified_function_lets() {
    let diagnostics = check(
        "function f() {\n    let x = 1;\n    let y = 2;\n    y++;\n    return x + y;\n}\n",
        true,
    );
    assert_eq!(
        diagnostics,
        vec![(
            DiagnosticCategory::Warning,
            "line 2: x is declared with let but never modified so could be a const".to_string()
        )]
    );
}

#[test]
fn test_program_level_lets_are_skipped() {
    assert!(check("let top = 1;\nconsole.log(top);\n", true).is_empty());
}

#[test]
fn test_block_lets_are_reported() {
    let diagnostics = check("{\n    let inner = 1;\n    console.log(inner);\n}\n", true);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].1.starts_with("line 2: inner "));
}

#[test]
fn test_consts_and_vars_are_not_reported() {
    assert!(check("function f() { const c = 1; var v = 2; return c + v; }\n", true).is_empty());
}

#[test]
fn test_warnings_do_not_count_as_errors() {
    let source = "function f() { let x = 1; return x; }\n";
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);
    let mut checker = CheckerState::new(
        &arena,
        &mut binder,
        &line_map,
        CheckerOptions {
            detect_unmodified_lets: true,
        },
    );
    checker.check_source_file(root);
    assert_eq!(checker.get_diagnostics().len(), 1);
    assert!(!checker.has_errors());
}
