//! Scope trees of whole programs, through the public API.

use lexlower_binder::{BinderOptions, BinderState, DeclarationKind, ScopeKind};
use lexlower_common::LineMap;
use lexlower_parser::{NodeArena, NodeIndex, ParserState};

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

const NESTED_FUNCTIONS: &str = r#"
var counter = 0;
function outer(x) {
    const limit = 10;
    function inner() {
        let step = 1;
        counter += step;
        return x < limit;
    }
    try {
        inner();
    } catch (e) {
        let e2 = e;
    }
    return inner;
}
"#;

fn bind(source: &str, options: BinderOptions) -> (NodeArena, NodeIndex, BinderState) {
    let mut parser = ParserState::new("fixture.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let mut binder = BinderState::new(options);
    binder.bind_source_file(&arena, root, &LineMap::build(source));
    (arena, root, binder)
}

#[test]
fn destructuring_fixture_binds_cleanly() {
    let (arena, _, binder) = bind(
        DESTRUCTURING,
        BinderOptions {
            disallow_unknown_references: true,
            ..BinderOptions::default()
        },
    );
    assert!(binder.get_diagnostics().is_empty(), "{:?}", binder.get_diagnostics());

    // Inner block `a`/`b` shadow the function's own.
    let inner_block = binder
        .scopes
        .iter()
        .find(|(_, scope)| scope.kind == ScopeKind::Block && scope.has_own("c"))
        .map(|(id, _)| id)
        .expect("inner block scope");
    let function_scope = binder.scopes.closest_hoisting_scope(inner_block);
    let function = binder.scopes.get(function_scope).expect("function scope");
    assert_eq!(
        function.declarations.keys().cloned().collect::<Vec<_>>(),
        vec!["array", "a", "b", "b$0"]
    );

    // Every reference resolved.
    assert!(binder.references.iter().all(|r| r.resolved.is_some()));
    assert!(binder.references.iter().all(|r| arena.get(r.node).is_some()));
}

#[test]
fn destructured_parameters_are_parameters() {
    let (_, _, binder) = bind(DESTRUCTURING, BinderOptions::default());
    let test1 = binder
        .scopes
        .iter()
        .find(|(_, scope)| scope.has_own("opt2") && scope.is_hoisting())
        .map(|(_, scope)| scope)
        .expect("test1 scope");
    assert_eq!(test1.kind_of("opt1"), Some(DeclarationKind::Parameter));
    assert_eq!(test1.kind_of("opt2"), Some(DeclarationKind::Parameter));
}

#[test]
fn nested_functions_propagate_outer_names() {
    let (_, _, binder) = bind(NESTED_FUNCTIONS, BinderOptions::default());
    assert!(binder.get_diagnostics().is_empty());

    let inner = binder
        .scopes
        .iter()
        .find(|(_, scope)| scope.has_own("step"))
        .map(|(_, scope)| scope)
        .expect("inner scope");
    for name in ["counter", "x", "limit"] {
        assert!(inner.does_propagate(name), "{name} should propagate");
    }
    assert!(!inner.does_propagate("step"));

    let outer = binder
        .scopes
        .iter()
        .find(|(_, scope)| scope.has_own("limit"))
        .map(|(_, scope)| scope)
        .expect("outer scope");
    assert!(outer.does_propagate("counter"));
    assert!(outer.does_propagate("e"), "catch parameter taints the function");
    assert_eq!(outer.kind_of("inner"), Some(DeclarationKind::Function));
    assert_eq!(outer.kind_of("limit"), Some(DeclarationKind::Const));
}

#[test]
fn binding_the_same_tree_twice_is_identical() {
    let (arena, root, mut binder) = bind(NESTED_FUNCTIONS, BinderOptions::default());
    let references = binder.references.clone();
    let scopes = binder.scopes.len();
    binder.bind_source_file(&arena, root, &LineMap::build(NESTED_FUNCTIONS));
    assert_eq!(binder.references, references);
    assert_eq!(binder.scopes.len(), scopes);
}
