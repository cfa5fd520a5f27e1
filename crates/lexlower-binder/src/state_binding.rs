//! Scope building: scope creation and declaration placement.

use lexlower_common::{LineMap, messages};
use lexlower_parser::parser::node::Node;
use lexlower_parser::{
    NodeArena, NodeIndex, Visitor, WalkControl, node_flags, syntax_kind_ext::*, walk_with,
};
use lexlower_scanner::SyntaxKind;
use smallvec::SmallVec;
use tracing::debug;

use crate::scope::{Declaration, DeclarationKind, ScopeKind};
use crate::state::BinderState;

type BindingNames = SmallVec<[NodeIndex; 4]>;

struct ScopeBuilder<'a> {
    binder: &'a mut BinderState,
    line_map: &'a LineMap,
}

impl Visitor for ScopeBuilder<'_> {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl {
        let Some(node) = arena.get(index) else {
            return WalkControl::Continue;
        };
        match node.kind {
            SOURCE_FILE => {
                self.binder.program_scope = self.binder.enter_scope(ScopeKind::Hoisting, index);
            }
            FUNCTION_DECLARATION | FUNCTION_EXPRESSION => {
                self.binder.bind_function(arena, index, self.line_map);
            }
            BLOCK => {
                // A function body shares the function's scope.
                let parent_is_function = arena
                    .get(arena.parent_of(index))
                    .is_some_and(Node::is_function_like);
                if !parent_is_function {
                    self.binder.enter_scope(ScopeKind::Block, index);
                }
            }
            FOR_STATEMENT => {
                let initializer = arena
                    .get_loop(node)
                    .map_or(NodeIndex::NONE, |data| data.initializer);
                if is_block_scoped_list(arena, initializer) {
                    self.binder.enter_scope(ScopeKind::Block, index);
                }
            }
            FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
                let initializer = arena
                    .get_for_in_of(node)
                    .map_or(NodeIndex::NONE, |data| data.initializer);
                if is_block_scoped_list(arena, initializer) {
                    self.binder.enter_scope(ScopeKind::Block, index);
                }
            }
            CATCH_CLAUSE => self.binder.bind_catch_clause(arena, index, self.line_map),
            VARIABLE_DECLARATION_LIST => {
                self.binder
                    .bind_variable_declaration_list(arena, index, self.line_map);
            }
            _ => {}
        }
        WalkControl::Continue
    }

    fn post(&mut self, _arena: &NodeArena, index: NodeIndex) {
        if self.binder.node_scope_ids.contains_key(&index.0) {
            self.binder.exit_scope();
        }
    }
}

fn is_block_scoped_list(arena: &NodeArena, index: NodeIndex) -> bool {
    arena
        .get(index)
        .is_some_and(Node::is_block_scoped_declaration_list)
}

/// Collect every identifier bound by a binding name: the name itself, or
/// the leaves of a (nested) destructuring pattern, in source order.
pub fn collect_binding_identifiers(
    arena: &NodeArena,
    index: NodeIndex,
    out: &mut SmallVec<[NodeIndex; 4]>,
) {
    let Some(node) = arena.get(index) else {
        return;
    };
    if node.kind == SyntaxKind::Identifier as u16 {
        out.push(index);
        return;
    }
    match node.kind {
        OBJECT_BINDING_PATTERN | ARRAY_BINDING_PATTERN => {
            if let Some(pattern) = arena.get_binding_pattern(node) {
                for element in pattern.elements.iter() {
                    collect_binding_identifiers(arena, element, out);
                }
            }
        }
        BINDING_ELEMENT => {
            if let Some(element) = arena.get_binding_element(node) {
                collect_binding_identifiers(arena, element.name, out);
            }
        }
        _ => {}
    }
}

impl BinderState {
    pub(crate) fn build_scopes(&mut self, arena: &NodeArena, root: NodeIndex, line_map: &LineMap) {
        let mut builder = ScopeBuilder {
            binder: self,
            line_map,
        };
        walk_with(arena, root, &mut builder);
    }

    /// Function name goes in the enclosing scope (declarations) or in the
    /// function's own scope (named expressions); parameters go in the
    /// function's scope.
    fn bind_function(&mut self, arena: &NodeArena, index: NodeIndex, line_map: &LineMap) {
        let Some(node) = arena.get(index) else {
            return;
        };
        let Some(func) = arena.get_function(node) else {
            return;
        };
        let is_declaration = node.kind == FUNCTION_DECLARATION;

        if is_declaration && func.name.is_some() {
            self.declare_name(arena, line_map, func.name, DeclarationKind::Function, None);
        }

        let scope_id = self.enter_scope(ScopeKind::Hoisting, index);

        let mut names = BindingNames::new();
        for param in func.parameters.iter() {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                collect_binding_identifiers(arena, data.name, &mut names);
            }
        }
        for name in names {
            self.declare_name(arena, line_map, name, DeclarationKind::Parameter, None);
        }

        if !is_declaration && func.name.is_some() {
            let shadowed_by_parameter = arena
                .identifier_text(func.name)
                .is_some_and(|name| self.scopes.get(scope_id).is_some_and(|s| s.has_own(name)));
            if !shadowed_by_parameter {
                self.declare_name(arena, line_map, func.name, DeclarationKind::Function, None);
            }
        }
    }

    fn bind_catch_clause(&mut self, arena: &NodeArena, index: NodeIndex, line_map: &LineMap) {
        let scope_id = self.enter_scope(ScopeKind::CatchBlock, index);
        let Some(clause) = arena.get(index).and_then(|n| arena.get_catch_clause(n)) else {
            return;
        };
        let Some(name) = arena.identifier_text(clause.variable_declaration) else {
            return;
        };
        let name = name.to_string();
        self.declare_name(
            arena,
            line_map,
            clause.variable_declaration,
            DeclarationKind::Caught,
            None,
        );

        // `catch (e) { let e }` must never lower to a plain `var e`.
        let hoisting_scope = self.scopes.closest_hoisting_scope(scope_id);
        if let Some(scope) = self.scopes.get_mut(hoisting_scope) {
            scope.propagates.insert(name);
        }
    }

    fn bind_variable_declaration_list(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        line_map: &LineMap,
    ) {
        let Some(node) = arena.get(index) else {
            return;
        };
        let Some(list) = arena.get_variable(node) else {
            return;
        };
        let kind = if node.has_flag(node_flags::CONST) {
            DeclarationKind::Const
        } else if node.has_flag(node_flags::LET) {
            DeclarationKind::Let
        } else {
            DeclarationKind::Var
        };

        let mut names = BindingNames::new();
        for declaration_index in list.declarations.iter() {
            let Some(declaration_node) = arena.get(declaration_index) else {
                continue;
            };
            let Some(declaration) = arena.get_variable_declaration(declaration_node) else {
                continue;
            };
            // Referable once the whole declarator, initializer included, is done.
            let from_pos = Some(declaration_node.end);

            names.clear();
            collect_binding_identifiers(arena, declaration.name, &mut names);
            for &name in &names {
                if kind == DeclarationKind::Var && self.options.disallow_vars {
                    let text = arena.identifier_text(name).unwrap_or_default().to_string();
                    self.error_at(
                        &messages::HOISTED_DECLARATION_DISALLOWED,
                        arena,
                        name,
                        line_map,
                        &[&text],
                    );
                }
                self.declare_name(arena, line_map, name, kind, from_pos);
            }
        }
    }

    /// Place a declaration. Block-scoped kinds attach to the current scope,
    /// everything else to the nearest hoisting scope.
    fn declare_name(
        &mut self,
        arena: &NodeArena,
        line_map: &LineMap,
        name_node: NodeIndex,
        kind: DeclarationKind,
        from_pos: Option<u32>,
    ) {
        let Some(name) = arena.identifier_text(name_node) else {
            return;
        };
        let name = name.to_string();

        let mut target = self.current_scope_id;
        if !kind.is_block_scoped() {
            // A hoisted name may not pass through a lexical binding of the
            // same name on its way out.
            while let Some(scope) = self.scopes.get(target) {
                if scope.is_hoisting() {
                    break;
                }
                if scope
                    .kind_of(&name)
                    .is_some_and(DeclarationKind::is_block_scoped)
                {
                    self.error_at(
                        &messages::DECLARATION_CONFLICT,
                        arena,
                        name_node,
                        line_map,
                        &[&name],
                    );
                    return;
                }
                target = scope.parent;
            }
        }

        let disallow_duplicated = self.options.disallow_duplicated;
        let Some(scope) = self.scopes.get_mut(target) else {
            return;
        };
        // A named function expression's own name yields to any declaration
        // of the same name in its body.
        let replaces_self_name = scope
            .declarations
            .get(&name)
            .is_some_and(|existing| is_function_expression_name(arena, existing));
        if !replaces_self_name
            && let Some(existing) = scope.kind_of(&name)
            && (disallow_duplicated || existing.is_block_scoped() || kind.is_block_scoped())
        {
            self.error_at(
                &messages::DECLARATION_CONFLICT,
                arena,
                name_node,
                line_map,
                &[&name],
            );
            return;
        }

        debug!(name = %name, kind = kind.as_str(), scope = target.0, "declare");
        scope
            .declarations
            .insert(name, Declaration::new(kind, name_node, from_pos));
    }
}

/// The name of a named function expression, declared in its own scope.
fn is_function_expression_name(arena: &NodeArena, declaration: &Declaration) -> bool {
    declaration.kind == DeclarationKind::Function
        && arena.kind_of(arena.parent_of(declaration.node)) == Some(FUNCTION_EXPRESSION)
}
