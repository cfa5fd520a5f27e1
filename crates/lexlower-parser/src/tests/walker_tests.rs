use crate::parser::{NodeIndex, ParserState, syntax_kind_ext};
use crate::parser::NodeArena;
use crate::walker::{Visitor, WalkControl, link_parents, walk, walk_pre, walk_with};
use lexlower_scanner::SyntaxKind;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    (parser, root)
}

fn identifier_order(source: &str) -> Vec<String> {
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let mut names = Vec::new();
    walk_pre(arena, root, |index| {
        if let Some(name) = arena.identifier_text(index) {
            names.push(name.to_string());
        }
        WalkControl::Continue
    });
    names
}

#[test]
fn test_walk_visits_in_source_order() {
    assert_eq!(
        identifier_order("var a = b + c; function f(d) { return e; }"),
        vec!["a", "b", "c", "f", "d", "e"]
    );
}

#[test]
fn test_do_while_visits_body_before_condition() {
    assert_eq!(identifier_order("do { a; } while (b);"), vec!["a", "b"]);
}

#[test]
fn test_pre_and_post_are_balanced() {
    let (parser, root) = parse("if (a) { let b = [c, d]; } else e();");
    let arena = parser.get_arena();
    let stack = std::cell::RefCell::new(Vec::new());
    let mut visited = 0;
    walk(
        arena,
        root,
        |index| {
            stack.borrow_mut().push(index);
            visited += 1;
            WalkControl::Continue
        },
        |index| {
            assert_eq!(stack.borrow_mut().pop(), Some(index));
        },
    );
    assert!(stack.borrow().is_empty());
    assert!(visited > 5);
}

#[test]
fn test_skip_children_still_calls_post() {
    let (parser, root) = parse("function f() { inner; } outer;");
    let arena = parser.get_arena();
    let mut names = Vec::new();
    let mut post_functions = 0;
    walk(
        arena,
        root,
        |index| {
            if let Some(name) = arena.identifier_text(index) {
                names.push(name.to_string());
            }
            if arena.kind_of(index) == Some(syntax_kind_ext::FUNCTION_DECLARATION) {
                WalkControl::SkipChildren
            } else {
                WalkControl::Continue
            }
        },
        |index| {
            if arena.kind_of(index) == Some(syntax_kind_ext::FUNCTION_DECLARATION) {
                post_functions += 1;
            }
        },
    );
    assert_eq!(names, vec!["outer"]);
    assert_eq!(post_functions, 1);
}

#[test]
fn test_walk_of_missing_root_is_noop() {
    let (parser, _) = parse("a;");
    let mut calls = 0;
    walk_pre(parser.get_arena(), NodeIndex::NONE, |_| {
        calls += 1;
        WalkControl::Continue
    });
    assert_eq!(calls, 0);
}

#[test]
fn test_link_parents_is_idempotent() {
    let (parser, root) = parse("for (let i = 0; i < n; i++) { g(i); }");
    let mut arena = parser.into_arena();
    let before: Vec<NodeIndex> = arena.extended_info.iter().map(|info| info.parent).collect();
    link_parents(&mut arena, root);
    let after: Vec<NodeIndex> = arena.extended_info.iter().map(|info| info.parent).collect();
    assert_eq!(before, after);

    // Every identifier reachable from the root has a parent.
    walk_pre(&arena, root, |index| {
        if arena.kind_of(index) == Some(SyntaxKind::Identifier as u16) {
            assert!(arena.parent_of(index).is_some());
        }
        WalkControl::Continue
    });
}

struct FunctionDepth {
    depth: usize,
    max_depth: usize,
    functions_seen: usize,
}

impl Visitor for FunctionDepth {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl {
        if arena.get(index).is_some_and(|node| node.is_function_like()) {
            self.depth += 1;
            self.functions_seen += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }
        WalkControl::Continue
    }

    fn post(&mut self, arena: &NodeArena, index: NodeIndex) {
        if arena.get(index).is_some_and(|node| node.is_function_like()) {
            self.depth -= 1;
        }
    }
}

#[test]
fn test_visitor_keeps_state_across_pre_and_post() {
    let (parser, root) =
        parse("function a() { function b() { var c = function () {}; } } function d() {}");
    let mut visitor = FunctionDepth {
        depth: 0,
        max_depth: 0,
        functions_seen: 0,
    };
    walk_with(parser.get_arena(), root, &mut visitor);
    assert_eq!(visitor.depth, 0);
    assert_eq!(visitor.max_depth, 3);
    assert_eq!(visitor.functions_seen, 4);
}
