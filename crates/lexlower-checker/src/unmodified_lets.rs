//! Advisory for `let` bindings that could be `const`.

use lexlower_binder::DeclarationKind;
use lexlower_common::messages;

use crate::state::CheckerState;

impl CheckerState<'_> {
    /// Warn about every `let` that no reference writes. Top-level bindings
    /// are skipped since other scripts may assign them.
    ///
    /// Relies on `written` marks left by [`check_const_assignments`].
    ///
    /// [`check_const_assignments`]: CheckerState::check_const_assignments
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn check_unmodified_lets(&mut self) {
        let skipped = [self.binder.environment_scope, self.binder.program_scope];
        let mut found = Vec::new();
        for (id, scope) in self.binder.scopes.iter() {
            if skipped.contains(&id) {
                continue;
            }
            for (name, declaration) in &scope.declarations {
                if declaration.kind == DeclarationKind::Let && !declaration.written {
                    found.push((declaration.node, name.clone()));
                }
            }
        }

        for (node, name) in found {
            let diagnostic = self.diagnostic_at(&messages::LET_NEVER_MODIFIED, node, &[&name]);
            self.diagnostics.push(diagnostic);
        }
    }
}
