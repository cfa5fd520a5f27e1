//! Whole-file lowering through the public API: bind, check, lower, patch.

use lexlower_binder::{BinderOptions, BinderState};
use lexlower_checker::{CheckerOptions, CheckerState};
use lexlower_common::LineMap;
use lexlower_lowering::{LoweringState, LoweringStats, apply_edits};
use lexlower_parser::ParserState;

const DESTRUCTURING: &str = r#""use strict";

function test1({opt1: opt1, opt2}) {
    {
        let {a: opt1, b: opt2} = {a: 1, b: 2};
        console.log(opt1, opt2);
    }
    console.log(opt1, opt2);
}

function test3(array) {
    let a = 1, b, b$0;
    {
        let [a, , b, c] = array;
        console.log(a, b, c);
    }
    console.log(a, b, b$0);
}
"#;

const DESTRUCTURING_LOWERED: &str = r#""use strict";

function test1({opt1: opt1, opt2}) {
    {
        var {a: opt1$0, b: opt2$0} = {a: 1, b: 2};
        console.log(opt1$0, opt2$0);
    }
    console.log(opt1, opt2);
}

function test3(array) {
    var a = 1, b, b$0;
    {
        var [a$0, , b$1, c] = array;
        console.log(a$0, b$1, c);
    }
    console.log(a, b, b$0);
}
"#;

const LOOPS: &str = r#"var fns = [];
for (let i = 0; i < 3; i++) {
    const doubled = i * 2;
    fns.push(doubled);
}
for (let i = 0; i < 3; i++) {
    fns.push(function () {
        let local = 1;
        return local;
    });
}
"#;

const LOOPS_LOWERED: &str = r#"var fns = [];
for (var i = 0; i < 3; i++) {
    var doubled = i * 2;
    fns.push(doubled);
}
for (var i$0 = 0; i$0 < 3; i$0++) {
    fns.push(function () {
        var local = 1;
        return local;
    });
}
"#;

fn lower(source: &str) -> (String, LoweringStats) {
    let mut parser = ParserState::new("fixture.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let mut arena = parser.into_arena();
    let line_map = LineMap::build(source);

    let mut binder = BinderState::new(BinderOptions {
        disallow_unknown_references: true,
        ..BinderOptions::default()
    });
    binder.bind_source_file(&arena, root, &line_map);
    assert!(binder.get_diagnostics().is_empty(), "{:?}", binder.get_diagnostics());

    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default());
    checker.check_source_file(root);
    assert!(checker.get_diagnostics().is_empty(), "{:?}", checker.get_diagnostics());

    let mut lowering = LoweringState::new(&mut arena, &mut binder, &line_map);
    lowering.lower_source_file(root).expect("lowering succeeds");
    let (edits, stats) = lowering.into_parts();
    (apply_edits(source, edits).expect("edits apply"), stats)
}

#[test]
fn destructuring_fixture() {
    let (output, stats) = lower(DESTRUCTURING);
    assert_eq!(output, DESTRUCTURING_LOWERED);
    assert_eq!(
        stats.to_string(),
        "0.0x const/let ratio (0 consts, 8 lets)\n\
         line 5: opt1 => opt1$0\n\
         line 5: opt2 => opt2$0\n\
         line 14: a => a$0\n\
         line 14: b => b$1\n"
    );
}

#[test]
fn loop_fixture() {
    let (output, stats) = lower(LOOPS);
    assert_eq!(output, LOOPS_LOWERED);
    assert_eq!((stats.consts, stats.lets), (1, 3));
}

#[test]
fn lowering_is_idempotent() {
    for source in [DESTRUCTURING, LOOPS] {
        let (once, _) = lower(source);
        let (twice, stats) = lower(&once);
        assert_eq!(once, twice);
        assert_eq!(stats, LoweringStats::default());
    }
}
