use crate::state::{CheckerOptions, CheckerState};
use lexlower_binder::{BinderOptions, BinderState, DeclarationKind};
use lexlower_common::{LineMap, diagnostic_codes};
use lexlower_parser::ParserState;

struct Checked {
    messages: Vec<String>,
    written: Vec<(String, bool)>,
}

fn check(source: &str) -> Checked {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);

    let mut checker = CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default());
    checker.check_source_file(root);
    let diagnostics = checker.take_diagnostics();
    assert!(
        diagnostics
            .iter()
            .all(|d| d.code == diagnostic_codes::CONST_ASSIGNMENT)
    );

    let written = binder
        .scopes
        .iter()
        .filter(|&(id, _)| id != binder.environment_scope)
        .flat_map(|(_, scope)| scope.declarations.iter())
        .map(|(name, decl)| (name.clone(), decl.written))
        .collect();
    Checked {
        messages: diagnostics.iter().map(ToString::to_string).collect(),
        written,
    }
}

#[test]
fn test_assignment_to_const() {
    let checked = check("const a = 1;\na = 2;\n");
    assert_eq!(checked.messages, vec!["line 2: can't assign to const variable a"]);
}

#[test]
fn test_every_write_form_is_caught() {
    let checked = check(
        "const a = 1, b = 2, c = 3, d = 4, e = 5;\na += 1;\nb++;\n--c;\n[d] = [1];\n({ e } = { e: 1 });\n",
    );
    assert_eq!(
        checked.messages,
        vec![
            "line 2: can't assign to const variable a",
            "line 3: can't assign to const variable b",
            "line 4: can't assign to const variable c",
            "line 5: can't assign to const variable d",
            "line 6: can't assign to const variable e",
        ]
    );
}

#[test]
fn test_for_in_target_is_a_write() {
    let checked = check("const k = 0;\nfor (k in {}) {}\n");
    assert_eq!(checked.messages.len(), 1);
}

#[test]
fn test_reads_are_not_writes() {
    let checked = check("const a = 1;\nvar b = a + 1;\nb = -a;\nb = a.x;\n");
    assert!(checked.messages.is_empty(), "{:?}", checked.messages);
    assert!(checked.written.contains(&("b".to_string(), true)));
    assert!(checked.written.contains(&("a".to_string(), false)));
}

#[test]
fn test_initializer_is_not_a_write() {
    let checked = check("let x = 1;\nlet y;\ny = x;\n");
    assert!(checked.written.contains(&("x".to_string(), false)));
    assert!(checked.written.contains(&("y".to_string(), true)));
}

#[test]
fn test_read_only_globals() {
    let checked = check("undefined = 1;\nNaN++;\n");
    assert_eq!(
        checked.messages,
        vec![
            "line 1: can't assign to const variable undefined",
            "line 2: can't assign to const variable NaN",
        ]
    );
}

#[test]
fn test_shadowing_const_is_independent() {
    let checked = check("const a = 1;\nfunction f() {\n    let a = 2;\n    a = 3;\n}\n");
    assert!(checked.messages.is_empty(), "{:?}", checked.messages);
}

#[test]
fn test_unresolved_writes_are_ignored() {
    let checked = check("someGlobal = 1;\n");
    assert!(checked.messages.is_empty());
}

#[test]
fn test_writes_are_marked_on_the_resolved_declaration() {
    let source = "let n = 0;\nfunction f() { n = 1; }\n";
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let line_map = LineMap::build(source);
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(&arena, root, &line_map);
    CheckerState::new(&arena, &mut binder, &line_map, CheckerOptions::default())
        .check_source_file(root);

    let declaration = binder
        .scopes
        .declaration(binder.program_scope, "n")
        .expect("program declares n");
    assert_eq!(declaration.kind, DeclarationKind::Let);
    assert!(declaration.written);
}
