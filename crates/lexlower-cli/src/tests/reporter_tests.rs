use lexlower_common::{Diagnostic, diagnostic_codes, diagnostic_messages};

use super::reporter::Reporter;

fn const_assignment() -> Diagnostic {
    Diagnostic::from_message(
        &lexlower_common::messages::CONST_ASSIGNMENT,
        lexlower_common::DiagnosticLine::Line(2),
        13,
        1,
        &["a"],
    )
}

#[test]
fn formats_location_category_and_message() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic("src/a.js", &const_assignment()),
        "src/a.js:2 - error[1005]: can't assign to const variable a"
    );
}

#[test]
fn global_diagnostics_have_no_line() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::global_error(
        lexlower_common::format_message(diagnostic_messages::ENVIRONMENT_NOT_FOUND, &["nope"]),
        diagnostic_codes::ENVIRONMENT_NOT_FOUND,
    );
    assert_eq!(
        reporter.format_diagnostic("a.js", &diagnostic),
        "a.js - error[1007]: environment \"nope\" not found"
    );
}

#[test]
fn related_information_is_indented() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error(
        3,
        40,
        1,
        "can't transform closure. x is defined outside closure, inside loop".to_string(),
        diagnostic_codes::LOOP_CLOSURE_CAPTURE,
    )
    .with_related(
        &lexlower_common::messages::LOOP_BEGINS_HERE,
        2,
        0,
        3,
        &["for"],
    );
    assert_eq!(
        reporter.format_diagnostic("loop.js", &diagnostic),
        "loop.js:3 - error[1006]: can't transform closure. x is defined outside closure, inside loop\n    loop.js:2 - the enclosing for loop begins here"
    );
}

#[test]
fn warnings_render_as_warnings() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::warning(
        4,
        0,
        1,
        "let n is never modified".to_string(),
        diagnostic_codes::LET_NEVER_MODIFIED,
    );
    let rendered = reporter.render("w.js", &[diagnostic]);
    assert!(rendered.starts_with("w.js:4 - warning[1009]: "), "{rendered}");
}

#[test]
fn render_joins_diagnostics_with_newlines() {
    let reporter = Reporter::new(false);
    let rendered = reporter.render("a.js", &[const_assignment(), const_assignment()]);
    assert_eq!(rendered.lines().count(), 2);
    assert!(reporter.render("a.js", &[]).is_empty());
}

#[test]
fn summary_pluralizes() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.summary(0, 0), None);
    assert_eq!(reporter.summary(1, 1).as_deref(), Some("Found 1 error in 1 file."));
    assert_eq!(reporter.summary(3, 2).as_deref(), Some("Found 3 errors in 2 files."));
}
