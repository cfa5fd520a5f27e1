use crate::state::{CheckerOptions, CheckerState};
use lexlower_binder::{BinderOptions, BinderState};
use lexlower_common::{Diagnostic, DiagnosticLine, LineMap, diagnostic_codes};
use lexlower_parser::ParserState;

fn check(source: &str) -> Vec<Diagnostic> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);
    assert!(!binder.has_errors(), "{:?}", binder.get_diagnostics());

    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default());
    checker.check_source_file(root);
    checker.take_diagnostics()
}

fn closure_errors(source: &str) -> Vec<String> {
    check(source)
        .iter()
        .filter(|d| d.code == diagnostic_codes::LOOP_CLOSURE_CAPTURE)
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_loop_header_binding_captured_by_closure() {
    let errors = closure_errors(
        "var arr = [];\nfor (let x = 0; x < 3; x++) {\n    arr.push(function () { return x; });\n}\n",
    );
    assert_eq!(
        errors,
        vec!["line 3: can't transform closure. x is defined outside closure, inside loop"]
    );
}

#[test]
fn test_body_binding_captured_by_closure() {
    let errors = closure_errors(
        "var arr = [];\nfor (var i = 0; i < 10; i++) {\n    let y = i;\n    arr.push(function () { return y; });\n}\n",
    );
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(" y is defined outside closure"), "{errors:?}");
}

#[test]
fn test_related_information_points_at_loop_keyword() {
    let source = "var arr = [];\nwhile (arr.length < 3) {\n    const n = arr.length;\n    arr.push(function () { return n; });\n}\n";
    let diagnostics = check(source);
    assert_eq!(diagnostics.len(), 1);
    let related = &diagnostics[0].related_information;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].line, DiagnosticLine::Line(2));
    assert_eq!(related[0].start, source.find("while").map_or(0, |p| p as u32));
    assert_eq!(related[0].length, 5);
    assert_eq!(related[0].message_text, "the enclosing while loop begins here");
}

#[test]
fn test_do_while_related_keyword() {
    let diagnostics = check(
        "var arr = [];\ndo {\n    let v = 1;\n    arr.push(function () { return v; });\n} while (arr.length < 2);\n",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].related_information[0].message_text,
        "the enclosing do-while loop begins here"
    );
    assert_eq!(diagnostics[0].related_information[0].length, 2);
}

#[test]
fn test_closure_local_bindings_are_allowed() {
    let errors = closure_errors(
        "var arr = [];\nfor (var i = 0; i < 3; i++) {\n    arr.push(function () { let y = i; const z = y; return z; });\n}\n",
    );
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_bindings_outside_the_loop_are_allowed() {
    let errors = closure_errors(
        "const base = 1;\nvar arr = [];\nfunction f() {\n    let scale = 2;\n    for (var i = 0; i < 3; i++) {\n        arr.push(function () { return base * scale; });\n    }\n}\n",
    );
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_iife_parameter_copy_is_allowed() {
    let errors = closure_errors(
        "var arr = [];\nfor (let x = 0; x < 3; x++) {\n    (function (x) {\n        arr.push(function () { return x; });\n    })(x);\n}\n",
    );
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_loop_inside_closure_is_allowed() {
    let errors = closure_errors(
        "var arr = [];\narr.push(function () {\n    for (let i = 0; i < 3; i++) {\n        let j = i;\n        arr.push(j);\n    }\n});\n",
    );
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_binding_in_intermediate_function_is_reported() {
    let errors = closure_errors(
        "var arr = [];\nfor (var i = 0; i < 3; i++) {\n    arr.push(function () {\n        let y = i;\n        return function () { return y; };\n    });\n}\n",
    );
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].starts_with("line 5:"), "{errors:?}");
}

#[test]
fn test_intermediate_function_binding_in_bare_loop_is_reported() {
    let errors = closure_errors("for (;;) { (function(){ let z = 1; (function(){ z; }); }); }");
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("z is defined outside closure, inside loop"), "{errors:?}");
}

#[test]
fn test_nested_loops_report_against_outermost() {
    let diagnostics = check(
        "var arr = [];\nfor (var i = 0; i < 3; i++) {\n    for (let j = 0; j < 3; j++) {\n        arr.push(function () { return j; });\n    }\n}\n",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].related_information[0].line, DiagnosticLine::Line(2));
}

#[test]
fn test_state_is_reset_between_loops() {
    let errors = closure_errors(
        "var arr = [];\nfor (var i = 0; i < 3; i++) {}\nlet late = 1;\narr.push(function () { return late; });\n",
    );
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn test_each_capturing_reference_is_reported() {
    let errors = closure_errors(
        "var arr = [];\nfor (let k in arr) {\n    arr.push(function () { return k + k; });\n}\n",
    );
    assert_eq!(errors.len(), 2);
}
