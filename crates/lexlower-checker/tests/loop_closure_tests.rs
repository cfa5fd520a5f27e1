//! Loop-closure fixtures checked through the public API.

use lexlower_binder::{BinderOptions, BinderState};
use lexlower_checker::{CheckerOptions, CheckerState};
use lexlower_common::{LineMap, diagnostic_codes};
use lexlower_parser::ParserState;

const ALLOWED: &str = r#""use strict";
var fns = [];

// closure-local bindings
for (var i = 0; i < 10; i++) {
    fns.push(function () {
        const doubled = i * 2;
        let tripled = i * 3;
        return doubled + tripled;
    });
}

// bindings declared before the loop
const limit = 3;
for (let j = 0; j < limit; j++) {
    fns.push(function () { return limit; });
}

// copied through a parameter
for (let k = 0; k < 3; k++) {
    (function (k) {
        fns.push(function () { return k; });
    })(k);
}

// loops nested inside the closure
fns.push(function () {
    for (let m = 0; m < 3; m++) {
        const n = m;
        fns.push(n);
    }
});
"#;

const FORBIDDEN: &str = r#""use strict";
var fns = [];
for (var i = 0; i < 10; i++) {
    let y = i;
    fns.push(function () { return y; });
}
for (let x = 0; x < 3; x++) {
    fns.push(function () { return x; });
}
do {
    const z = fns.length;
    fns.push(function () { return z; });
} while (fns.length < 5);
"#;

fn check(source: &str) -> Vec<String> {
    let mut parser = ParserState::new("fixture.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions {
        disallow_unknown_references: true,
        ..BinderOptions::default()
    });
    binder.bind_source_file(&arena, root, &line_map);
    assert!(binder.get_diagnostics().is_empty(), "{:?}", binder.get_diagnostics());

    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default());
    checker.check_source_file(root);
    assert!(
        checker
            .get_diagnostics()
            .iter()
            .all(|d| d.code == diagnostic_codes::LOOP_CLOSURE_CAPTURE)
    );
    checker
        .get_diagnostics()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn allowed_loop_closures_pass() {
    assert_eq!(check(ALLOWED), Vec::<String>::new());
}

#[test]
fn forbidden_loop_closures_are_reported() {
    assert_eq!(
        check(FORBIDDEN),
        vec![
            "line 5: can't transform closure. y is defined outside closure, inside loop",
            "line 8: can't transform closure. x is defined outside closure, inside loop",
            "line 12: can't transform closure. z is defined outside closure, inside loop",
        ]
    );
}

#[test]
fn checking_twice_gives_the_same_report() {
    let mut parser = ParserState::new("fixture.js".to_string(), FORBIDDEN.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let line_map = LineMap::build(FORBIDDEN);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);

    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default());
    checker.check_source_file(root);
    let first = checker.get_diagnostics().to_vec();
    checker.check_source_file(root);
    assert_eq!(checker.get_diagnostics(), first.as_slice());
}
