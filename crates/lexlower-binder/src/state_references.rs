//! Reference resolution.

use lexlower_common::{LineMap, messages};
use lexlower_parser::{
    NodeArena, NodeIndex, Visitor, WalkControl, is_reference,
    syntax_kind_ext::{BINDING_ELEMENT, VARIABLE_DECLARATION},
    walk_with,
};
use tracing::debug;

use crate::state::{BinderState, Reference};

struct ReferenceResolver<'a> {
    binder: &'a mut BinderState,
    line_map: &'a LineMap,
}

impl Visitor for ReferenceResolver<'_> {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl {
        if let Some(scope_id) = self.binder.scope_of_node(index) {
            self.binder.current_scope_id = scope_id;
        }
        if is_reference(arena, index) {
            self.binder.resolve_reference(arena, index, self.line_map);
        }
        WalkControl::Continue
    }

    fn post(&mut self, _arena: &NodeArena, index: NodeIndex) {
        if self.binder.node_scope_ids.contains_key(&index.0) {
            self.binder.exit_scope();
        }
    }
}

impl BinderState {
    pub(crate) fn resolve_references(
        &mut self,
        arena: &NodeArena,
        root: NodeIndex,
        line_map: &LineMap,
    ) {
        self.current_scope_id = self.environment_scope;
        let mut resolver = ReferenceResolver {
            binder: self,
            line_map,
        };
        walk_with(arena, root, &mut resolver);
    }

    fn resolve_reference(&mut self, arena: &NodeArena, index: NodeIndex, line_map: &LineMap) {
        let Some(name) = arena.identifier_text(index) else {
            return;
        };
        let name = name.to_string();
        let scope = self.current_scope_id;
        let resolved = self.scopes.lookup_and_propagate(scope, &name);

        match resolved {
            None if self.options.disallow_unknown_references => {
                self.error_at(
                    &messages::UNRESOLVED_REFERENCE,
                    arena,
                    index,
                    line_map,
                    &[&name],
                );
            }
            None => {}
            Some(declaring_scope) => {
                let referenced_at = arena.get(index).map_or(0, |node| node.pos);
                let before_declaration = self
                    .scopes
                    .declaration(declaring_scope, &name)
                    .filter(|decl| decl.kind.is_const_or_let())
                    .filter(|decl| !bound_earlier_in_pattern(arena, decl.node, referenced_at))
                    .and_then(|decl| decl.from_pos)
                    .is_some_and(|from_pos| referenced_at < from_pos);
                // A closure may mention a binding before it is initialized;
                // only a synchronous use in the same function is an error.
                if before_declaration
                    && !self
                        .scopes
                        .has_function_scope_between(arena, scope, declaring_scope)
                {
                    self.error_at(
                        &messages::TEMPORAL_DEAD_ZONE,
                        arena,
                        index,
                        line_map,
                        &[&name],
                    );
                }
            }
        }

        debug!(name = %name, scope = scope.0, resolved = ?resolved.map(|s| s.0), "reference");
        self.reference_ids.insert(index.0, self.references.len());
        self.references.push(Reference {
            node: index,
            scope,
            resolved,
        });
        self.all_identifiers.insert(name);
    }
}

/// True when `leaf` is a destructuring target and `referenced_at` lies in a
/// later element of the same pattern, as in `let [a, b = a] = xs;`. The
/// leaf's own default and the declarator's initializer stay in its TDZ.
fn bound_earlier_in_pattern(arena: &NodeArena, leaf: NodeIndex, referenced_at: u32) -> bool {
    let element = arena.parent_of(leaf);
    let element_end = if arena.kind_of(element) == Some(BINDING_ELEMENT) {
        arena.get(element).map(|node| node.end)
    } else {
        arena.get(leaf).map(|node| node.end)
    };
    let Some(element_end) = element_end else {
        return false;
    };
    let mut pattern = leaf;
    loop {
        let parent = arena.parent_of(pattern);
        if parent.is_none() {
            return false;
        }
        if arena.kind_of(parent) == Some(VARIABLE_DECLARATION) {
            break;
        }
        pattern = parent;
    }
    if pattern == leaf {
        return false;
    }
    arena
        .get(pattern)
        .is_some_and(|node| element_end <= referenced_at && referenced_at < node.end)
}
