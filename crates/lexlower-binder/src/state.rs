//! Binder state: the scope tree of one source file plus resolved references.
//!
//! Binding runs in three passes over the syntax tree, each a [`Visitor`]:
//!
//! 1. scope building (`state_binding.rs`): creates scopes and places
//!    declarations, reporting declaration conflicts and disallowed `var`s;
//! 2. environment seeding (`environment.rs`): fills the outermost scope
//!    with globals;
//! 3. reference resolution (`state_references.rs`): binds every identifier
//!    use to its declaring scope, checking temporal dead zones and unknown
//!    globals.
//!
//! [`Visitor`]: lexlower_parser::Visitor

use indexmap::IndexMap;
use lexlower_common::{Diagnostic, DiagnosticLine, DiagnosticMessage, LineMap};
use lexlower_parser::{NodeArena, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scope::{ScopeArena, ScopeId, ScopeKind};

/// Configuration options for the binder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderOptions {
    /// Reject `var` declarations.
    pub disallow_vars: bool,
    /// Reject references that no scope declares.
    pub disallow_unknown_references: bool,
    /// Reject every duplicate declaration, not only those involving
    /// block-scoped kinds.
    pub disallow_duplicated: bool,
    /// Standard-environment presets to seed the outermost scope with.
    pub environments: Vec<String>,
    /// Extra globals; `true` marks the global writable.
    pub globals: IndexMap<String, bool>,
    pub readonly_globals: Vec<String>,
    pub writable_globals: Vec<String>,
}

/// An identifier use and the scope it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub node: NodeIndex,
    /// Innermost scope enclosing the use.
    pub scope: ScopeId,
    /// Declaring scope, `None` for unresolved globals.
    pub resolved: Option<ScopeId>,
}

/// Binder state for one source file.
pub struct BinderState {
    pub options: BinderOptions,
    pub scopes: ScopeArena,
    /// Scope-introducing node -> scope.
    pub node_scope_ids: FxHashMap<u32, ScopeId>,
    /// Outermost scope, holding environment globals.
    pub environment_scope: ScopeId,
    pub program_scope: ScopeId,
    /// Identifier uses in traversal order.
    pub references: Vec<Reference>,
    /// Identifier node -> index into `references`.
    pub reference_ids: FxHashMap<u32, usize>,
    /// Every name declared or referenced anywhere, including globals. Fresh
    /// names are generated outside this set.
    pub all_identifiers: FxHashSet<String>,
    pub(crate) current_scope_id: ScopeId,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl BinderState {
    pub fn new(options: BinderOptions) -> Self {
        Self {
            options,
            scopes: ScopeArena::new(),
            node_scope_ids: FxHashMap::default(),
            environment_scope: ScopeId::NONE,
            program_scope: ScopeId::NONE,
            references: Vec::new(),
            reference_ids: FxHashMap::default(),
            all_identifiers: FxHashSet::default(),
            current_scope_id: ScopeId::NONE,
            diagnostics: Vec::new(),
        }
    }

    /// Clear everything produced by a previous run. Options are kept.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.node_scope_ids.clear();
        self.environment_scope = ScopeId::NONE;
        self.program_scope = ScopeId::NONE;
        self.references.clear();
        self.reference_ids.clear();
        self.all_identifiers.clear();
        self.current_scope_id = ScopeId::NONE;
        self.diagnostics.clear();
    }

    /// Build the scope tree for `root` and resolve every reference in it.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex, line_map: &LineMap) {
        self.reset();

        self.environment_scope = self
            .scopes
            .add_scope(ScopeId::NONE, ScopeKind::Hoisting, NodeIndex::NONE);
        self.current_scope_id = self.environment_scope;

        self.build_scopes(arena, root, line_map);
        self.seed_environment();

        for (_, scope) in self.scopes.iter() {
            self.all_identifiers
                .extend(scope.declarations.keys().cloned());
        }

        self.resolve_references(arena, root, line_map);

        debug!(
            scopes = self.scopes.len(),
            references = self.references.len(),
            identifiers = self.all_identifiers.len(),
            diagnostics = self.diagnostics.len(),
            "bound source file"
        );
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

    /// Scope introduced by `node`, if any.
    #[inline]
    pub fn scope_of_node(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scope_ids.get(&node.0).copied()
    }

    /// Binding of the identifier use at `node`.
    #[inline]
    pub fn reference(&self, node: NodeIndex) -> Option<&Reference> {
        self.reference_ids
            .get(&node.0)
            .and_then(|&index| self.references.get(index))
    }

    // Scope management

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind, node: NodeIndex) -> ScopeId {
        let scope_id = self.scopes.add_scope(self.current_scope_id, kind, node);
        if node.is_some() {
            self.node_scope_ids.insert(node.0, scope_id);
        }
        debug!(scope = scope_id.0, ?kind, node = node.0, "enter scope");
        self.current_scope_id = scope_id;
        scope_id
    }

    pub(crate) fn exit_scope(&mut self) {
        self.current_scope_id = self.scopes.parent_of(self.current_scope_id);
    }

    // Diagnostics

    pub(crate) fn error_at(
        &mut self,
        message: &DiagnosticMessage,
        arena: &NodeArena,
        node: NodeIndex,
        line_map: &LineMap,
        args: &[&str],
    ) {
        let (start, length) = arena
            .get(node)
            .map_or((0, 0), |n| (n.pos, n.end.saturating_sub(n.pos)));
        let line = DiagnosticLine::Line(line_map.line_number(start));
        self.diagnostics
            .push(Diagnostic::from_message(message, line, start, length, args));
    }

    pub(crate) fn global_error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics.push(Diagnostic::from_message(
            message,
            DiagnosticLine::Global,
            0,
            0,
            args,
        ));
    }
}
