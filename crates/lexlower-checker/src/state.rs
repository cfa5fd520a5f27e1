//! Checker state and pass driver.
//!
//! The checker runs on a bound source file and only reports; it never
//! changes which scope a reference resolves to. The const-assignment pass
//! does record writes on declarations, which the unmodified-`let` advisory
//! reads afterwards.

use lexlower_binder::BinderState;
use lexlower_common::{Diagnostic, DiagnosticLine, DiagnosticMessage, LineMap};
use lexlower_parser::{NodeArena, NodeIndex};
use smallvec::SmallVec;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Report `let` declarations that are never written.
    pub detect_unmodified_lets: bool,
}

pub struct CheckerState<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) binder: &'a mut BinderState,
    pub(crate) line_map: &'a LineMap,
    pub options: CheckerOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Outermost loop being traversed, `NONE` outside loops.
    pub(crate) outermost_loop: NodeIndex,
    /// Functions entered since `outermost_loop`, innermost last.
    pub(crate) functions: SmallVec<[NodeIndex; 4]>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a mut BinderState,
        line_map: &'a LineMap,
        options: CheckerOptions,
    ) -> Self {
        Self {
            arena,
            binder,
            line_map,
            options,
            diagnostics: Vec::new(),
            outermost_loop: NodeIndex::NONE,
            functions: SmallVec::new(),
        }
    }

    /// Run every pass over `root`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check_source_file(&mut self, root: NodeIndex) {
        self.diagnostics.clear();

        self.check_loop_closures(root);
        self.check_const_assignments();
        if self.options.detect_unmodified_lets {
            self.check_unmodified_lets();
        }

        debug!(diagnostics = self.diagnostics.len(), "checked source file");
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub(crate) fn diagnostic_at(
        &self,
        message: &DiagnosticMessage,
        node: NodeIndex,
        args: &[&str],
    ) -> Diagnostic {
        let (start, length) = self.span_of(node);
        let line = DiagnosticLine::Line(self.line_map.line_number(start));
        Diagnostic::from_message(message, line, start, length, args)
    }

    pub(crate) fn span_of(&self, node: NodeIndex) -> (u32, u32) {
        self.arena
            .get(node)
            .map_or((0, 0), |n| (n.pos, n.end.saturating_sub(n.pos)))
    }
}
