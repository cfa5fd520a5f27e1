//! Loop-closure capture legality.
//!
//! Lowering turns a per-iteration `let`/`const` into a single function-wide
//! `var`. That is only unobservable when no closure created inside the loop
//! captures a binding that lives between the loop and the closure.
//!
//! While inside the outermost loop, the pass keeps a stack of the functions
//! entered since. For each reference from inside such a function to a
//! `let`/`const`, the declaring scope's node and its ancestors are walked:
//! reaching the innermost function first means the binding is local to the
//! closure; reaching the outermost loop first means it is per-iteration
//! state shared with the closure, which is reported.

use lexlower_binder::DeclarationKind;
use lexlower_common::messages;
use lexlower_parser::{
    NodeArena, NodeIndex, Visitor, WalkControl, syntax_kind_ext::*, walk_with,
};
use tracing::debug;

use crate::state::CheckerState;

struct LoopClosurePass<'c, 'a> {
    checker: &'c mut CheckerState<'a>,
}

impl Visitor for LoopClosurePass<'_, '_> {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl {
        let Some(node) = arena.get(index) else {
            return WalkControl::Continue;
        };
        let checker = &mut *self.checker;

        // Nested loops do not move the marker.
        if checker.outermost_loop.is_none() && node.is_loop() {
            debug!(node = index.0, "enter outermost loop");
            checker.outermost_loop = index;
        }
        if checker.outermost_loop.is_none() {
            return WalkControl::Continue;
        }

        if node.is_function_like() {
            checker.functions.push(index);
        }
        if !checker.functions.is_empty() && node.is_identifier() {
            checker.check_captured_reference(index);
        }
        WalkControl::Continue
    }

    fn post(&mut self, _arena: &NodeArena, index: NodeIndex) {
        let checker = &mut *self.checker;
        if checker.functions.last() == Some(&index) {
            checker.functions.pop();
        }
        if checker.outermost_loop == index {
            checker.outermost_loop = NodeIndex::NONE;
        }
    }
}

fn loop_keyword(kind: u16) -> &'static str {
    match kind {
        DO_STATEMENT => "do-while",
        WHILE_STATEMENT => "while",
        _ => "for",
    }
}

impl CheckerState<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn check_loop_closures(&mut self, root: NodeIndex) {
        self.outermost_loop = NodeIndex::NONE;
        self.functions.clear();

        let arena = self.arena;
        walk_with(arena, root, &mut LoopClosurePass { checker: self });

        debug_assert!(self.outermost_loop.is_none());
        debug_assert!(self.functions.is_empty());
    }

    fn check_captured_reference(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(resolved) = self.binder.reference(index).and_then(|r| r.resolved) else {
            return;
        };
        let Some(name) = arena.identifier_text(index) else {
            return;
        };
        let Some(scope) = self.binder.scopes.get(resolved) else {
            return;
        };
        if !scope
            .kind_of(name)
            .is_some_and(DeclarationKind::is_const_or_let)
        {
            return;
        }
        let Some(&innermost_function) = self.functions.last() else {
            return;
        };

        let mut current = scope.node;
        while current.is_some() {
            if current == innermost_function {
                return;
            }
            if current == self.outermost_loop {
                self.report_loop_closure(index, name);
                return;
            }
            current = arena.parent_of(current);
        }
    }

    fn report_loop_closure(&mut self, index: NodeIndex, name: &str) {
        let loop_index = self.outermost_loop;
        let (loop_start, _) = self.span_of(loop_index);
        let keyword = self
            .arena
            .get(loop_index)
            .map_or("for", |node| loop_keyword(node.kind));
        let keyword_length = if keyword == "do-while" { 2 } else { keyword.len() as u32 };

        debug!(name, loop_node = loop_index.0, "illegal loop closure capture");
        let diagnostic = self
            .diagnostic_at(&messages::LOOP_CLOSURE_CAPTURE, index, &[name])
            .with_related(
                &messages::LOOP_BEGINS_HERE,
                self.line_map.line_number(loop_start),
                loop_start,
                keyword_length,
                &[keyword],
            );
        self.diagnostics.push(diagnostic);
    }
}
