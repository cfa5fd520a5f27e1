use crate::error::LowerError;
use crate::options::LowerOptions;
use crate::session::{Emit, LoweringSession, lower, lower_source};
use lexlower_common::{DiagnosticLine, diagnostic_codes};

#[test]
fn test_parse_errors_stop_the_pipeline() {
    let error = lower("let = ;", &LowerOptions::default()).expect_err("syntax error");
    let diagnostics = error.diagnostics();
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.code >= 1100));
    assert_eq!(diagnostics[0].line, DiagnosticLine::Line(1));
}

#[test]
fn test_binder_and_checker_diagnostics_are_combined_in_order() {
    let error = lower("let a;\nlet a;\nconst c = 1;\nc = 2;\n", &LowerOptions::default())
        .expect_err("rejected");
    let codes: Vec<u32> = error.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![diagnostic_codes::DECLARATION_CONFLICT, diagnostic_codes::CONST_ASSIGNMENT]
    );
    assert_eq!(
        error.to_string(),
        "line 2: a is already declared\nline 4: can't assign to const variable c"
    );
}

#[test]
fn test_configuration_errors_are_global() {
    let options = LowerOptions {
        environments: vec!["nope".to_string()],
        ..LowerOptions::default()
    };
    let error = lower("let a = 1;", &options).expect_err("unknown environment");
    assert_eq!(error.to_string(), "global: environment \"nope\" not found");
}

#[test]
fn test_warnings_do_not_block() {
    let options = LowerOptions {
        detect_unmodified_lets: true,
        ..LowerOptions::default()
    };
    let output = lower("function f() {\n    let v = 1;\n    return v;\n}\n", &options)
        .expect("lowered");
    assert_eq!(
        output.emit.as_text(),
        Some("function f() {\n    var v = 1;\n    return v;\n}\n")
    );
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].code, diagnostic_codes::LET_NEVER_MODIFIED);
}

#[test]
fn test_emit_tree() {
    let options = LowerOptions {
        emit_tree: true,
        ..LowerOptions::default()
    };
    let output = lower("function f(x) {\n    { let x = 1; g(x); }\n}\n", &options).expect("lowered");
    let Emit::Tree(tree) = &output.emit else {
        panic!("expected a tree");
    };
    let block = &tree["body"][0]["body"]["body"][0]["body"];
    assert_eq!(block[0]["kind"], "var");
    assert_eq!(block[0]["declarations"][0]["id"]["name"], "x$0");
    assert_eq!(block[0]["declarations"][0]["id"]["originalName"], "x");
    assert_eq!(block[1]["expression"]["arguments"][0]["name"], "x$0");
    assert_eq!(output.stats.renames.len(), 1);
}

#[test]
fn test_lower_source_ignores_emit_tree() {
    let options = LowerOptions {
        emit_tree: true,
        ..LowerOptions::default()
    };
    assert_eq!(lower_source("const a = 1;", &options).ok().as_deref(), Some("var a = 1;"));
}

#[test]
fn test_session_is_reusable() {
    let session = LoweringSession::new(LowerOptions::default());
    let first = session.lower_file("a.js", "{ let x = 1; }\n{ let x = 2; }\n").expect("first");
    let second = session.lower_file("b.js", "{ let x = 1; }\n").expect("second");
    assert_eq!(first.stats.renames.len(), 1);
    assert_eq!(second.emit.as_text(), Some("{ var x = 1; }\n"));
    assert!(second.stats.renames.is_empty());
}

#[test]
fn test_internal_errors_have_no_diagnostics() {
    let error = LowerError::Internal(lexlower_lowering::LoweringError::OverlappingEdits {
        start: 1,
        previous_end: 2,
    });
    assert!(error.diagnostics().is_empty());
    assert_eq!(
        error.to_string(),
        "internal error: edit at 1 overlaps the previous edit ending at 2"
    );
}
