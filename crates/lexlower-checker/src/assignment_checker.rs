//! Writes to bindings: const assignment errors and `written` marks.

use lexlower_binder::DeclarationKind;
use lexlower_common::messages;
use lexlower_parser::is_lvalue;
use tracing::debug;

use crate::state::CheckerState;

impl CheckerState<'_> {
    /// Mark every declaration that some reference writes, and report writes
    /// to `const` bindings (including read-only globals).
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn check_const_assignments(&mut self) {
        let arena = self.arena;
        for index in 0..self.binder.references.len() {
            let reference = &self.binder.references[index];
            let (node, resolved) = (reference.node, reference.resolved);
            let Some(scope) = resolved else {
                continue;
            };
            if !is_lvalue(arena, node) {
                continue;
            }
            let Some(name) = arena.identifier_text(node) else {
                continue;
            };
            let Some(declaration) = self.binder.scopes.declaration_mut(scope, name) else {
                continue;
            };
            declaration.written = true;

            if declaration.kind == DeclarationKind::Const {
                debug!(name, node = node.0, "assignment to const");
                let diagnostic = self.diagnostic_at(&messages::CONST_ASSIGNMENT, node, &[name]);
                self.diagnostics.push(diagnostic);
            }
        }
    }
}
