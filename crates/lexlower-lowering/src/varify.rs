//! Lowering `let`/`const` to `var`.
//!
//! Runs on a bound source file that passed every check. Two passes:
//!
//! 1. Declarations, in source order. Each block-scoped declaration list
//!    gets its keyword replaced by `var`, and every name it binds (pattern
//!    leaves included) moves to the closest hoisting scope. A name is renamed
//!    to a fresh `name$N` when it leaves a block and the hoisting scope
//!    already declares it or passes it through to an outer scope. The move
//!    is recorded on the scope the name left.
//! 2. References. A reference whose declaring scope recorded a move for its
//!    name is retargeted to the destination, and rewritten if renamed.
//!
//! Both passes edit the arena in place (names, keyword flags) and record
//! byte-range [`Edit`]s against the original text.

use lexlower_binder::{BinderState, DeclarationKind, Move, ScopeId, collect_binding_identifiers};
use lexlower_common::{LineMap, limits};
use lexlower_parser::{
    NodeArena, NodeIndex, Visitor, WalkControl, node_flags, syntax_kind_ext::*, walk_with,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::LoweringError;
use crate::patcher::Edit;
use crate::stats::LoweringStats;

// =============================================================================
// Declaration Collection
// =============================================================================

/// Block-scoped declaration lists in source order, with the scope each one
/// is written in.
struct DeclarationCollector<'b> {
    binder: &'b BinderState,
    current_scope: ScopeId,
    lists: Vec<(NodeIndex, ScopeId)>,
}

impl Visitor for DeclarationCollector<'_> {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl {
        if let Some(scope) = self.binder.scope_of_node(index) {
            self.current_scope = scope;
        }
        if arena
            .get(index)
            .is_some_and(|node| node.is_block_scoped_declaration_list())
        {
            self.lists.push((index, self.current_scope));
        }
        WalkControl::Continue
    }

    fn post(&mut self, _arena: &NodeArena, index: NodeIndex) {
        if self.binder.scope_of_node(index).is_some() {
            self.current_scope = self.binder.scopes.parent_of(self.current_scope);
        }
    }
}

/// One name bound by a declarator.
struct Leaf {
    node: NodeIndex,
    /// `{ name }` in an object pattern: the name doubles as the key.
    shorthand: bool,
}

// =============================================================================
// LoweringState
// =============================================================================

pub struct LoweringState<'a> {
    arena: &'a mut NodeArena,
    binder: &'a mut BinderState,
    line_map: &'a LineMap,
    edits: Vec<Edit>,
    stats: LoweringStats,
}

impl<'a> LoweringState<'a> {
    pub fn new(arena: &'a mut NodeArena, binder: &'a mut BinderState, line_map: &'a LineMap) -> Self {
        Self {
            arena,
            binder,
            line_map,
            edits: Vec::new(),
            stats: LoweringStats::default(),
        }
    }

    /// Lower every block-scoped declaration under `root`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn lower_source_file(&mut self, root: NodeIndex) -> Result<(), LoweringError> {
        self.edits.clear();
        self.stats = LoweringStats::default();

        let mut collector = DeclarationCollector {
            binder: &*self.binder,
            current_scope: self.binder.environment_scope,
            lists: Vec::new(),
        };
        walk_with(&*self.arena, root, &mut collector);
        let lists = collector.lists;

        for (list, scope) in lists {
            self.lower_declaration_list(list, scope)?;
        }
        self.rename_references();

        self.binder.scopes.clear_moves();

        debug!(
            edits = self.edits.len(),
            consts = self.stats.consts,
            lets = self.stats.lets,
            renames = self.stats.renames.len(),
            "lowered source file"
        );
        Ok(())
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn stats(&self) -> &LoweringStats {
        &self.stats
    }

    pub fn into_parts(self) -> (Vec<Edit>, LoweringStats) {
        (self.edits, self.stats)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn lower_declaration_list(&mut self, list: NodeIndex, origin: ScopeId) -> Result<(), LoweringError> {
        if origin.is_none() {
            return Err(LoweringError::MissingScope { node: list.0 });
        }
        let Some(node) = self.arena.get(list) else {
            return Ok(());
        };
        let keyword = node.declaration_keyword();
        let is_const = node.has_flag(node_flags::CONST);
        self.edits
            .push(Edit::new(node.pos, node.pos + keyword.len() as u32, "var"));

        let leaves = self.declared_leaves(list);
        let hoist = self.binder.scopes.closest_hoisting_scope(origin);
        for leaf in leaves {
            self.stats.declarator(is_const);
            self.hoist_leaf(leaf, origin, hoist)?;
        }

        if let Some(node) = self.arena.get_mut(list) {
            node.flags &= !node_flags::BLOCK_SCOPED;
        }
        Ok(())
    }

    fn declared_leaves(&self, list: NodeIndex) -> Vec<Leaf> {
        let arena = &*self.arena;
        let Some(data) = arena.get(list).and_then(|node| arena.get_variable(node)) else {
            return Vec::new();
        };

        let mut nodes: SmallVec<[NodeIndex; 4]> = SmallVec::new();
        for declaration in data.declarations.iter() {
            if let Some(name) = arena
                .get(declaration)
                .and_then(|node| arena.get_variable_declaration(node))
                .map(|data| data.name)
            {
                collect_binding_identifiers(arena, name, &mut nodes);
            }
        }

        nodes
            .into_iter()
            .map(|node| Leaf {
                node,
                shorthand: is_shorthand_binding(arena, node),
            })
            .collect()
    }

    fn hoist_leaf(&mut self, leaf: Leaf, origin: ScopeId, hoist: ScopeId) -> Result<(), LoweringError> {
        let name = self
            .arena
            .identifier_text(leaf.node)
            .map(str::to_string)
            .ok_or(LoweringError::MissingScope { node: leaf.node.0 })?;

        let must_rename = origin != hoist
            && self
                .binder
                .scopes
                .get(hoist)
                .is_some_and(|scope| scope.has_own(&name) || scope.does_propagate(&name));
        let new_name = if must_rename {
            self.unique(&name)?
        } else {
            name.clone()
        };

        self.move_declaration(&name, &new_name, origin, hoist)?;
        self.binder.all_identifiers.insert(new_name.clone());

        if new_name != name {
            let Some(node) = self.arena.get(leaf.node) else {
                return Ok(());
            };
            let (start, end) = (node.pos, node.end);
            let line = self.line_map.line_number(start);
            debug!(%name, %new_name, line, "rename declaration");

            self.stats.rename(&name, &new_name, line);
            self.arena.rename_identifier(leaf.node, &new_name);
            let text = if leaf.shorthand {
                format!("{name}: {new_name}")
            } else {
                new_name
            };
            self.edits.push(Edit::new(start, end, text));
        }
        Ok(())
    }

    /// Turn `name` in `origin` into a `var` called `new_name` in `hoist`.
    fn move_declaration(
        &mut self,
        name: &str,
        new_name: &str,
        origin: ScopeId,
        hoist: ScopeId,
    ) -> Result<(), LoweringError> {
        let scopes = &mut self.binder.scopes;
        let missing = || LoweringError::MissingDeclaration {
            name: name.to_string(),
        };

        if origin == hoist {
            let declaration = scopes.declaration_mut(origin, name).ok_or_else(missing)?;
            declaration.kind = DeclarationKind::Var;
            declaration.from_pos = None;
        } else {
            let mut declaration = scopes
                .get_mut(origin)
                .and_then(|scope| scope.declarations.shift_remove(name))
                .ok_or_else(missing)?;
            declaration.kind = DeclarationKind::Var;
            declaration.from_pos = None;
            scopes
                .get_mut(hoist)
                .ok_or(LoweringError::UnknownScope { scope: hoist.0 })?
                .declarations
                .insert(new_name.to_string(), declaration);
        }

        if let Some(scope) = scopes.get_mut(origin) {
            scope.moves.insert(
                name.to_string(),
                Move {
                    new_name: new_name.to_string(),
                    scope: hoist,
                },
            );
        }
        Ok(())
    }

    /// First `name$N` not known anywhere in the program.
    fn unique(&self, name: &str) -> Result<String, LoweringError> {
        debug_assert!(self.binder.all_identifiers.contains(name));
        (0..limits::MAX_RENAME_ATTEMPTS)
            .map(|n| format!("{name}${n}"))
            .find(|candidate| !self.binder.all_identifiers.contains(candidate))
            .ok_or_else(|| LoweringError::RenameExhausted {
                name: name.to_string(),
                attempts: limits::MAX_RENAME_ATTEMPTS,
            })
    }

    // =========================================================================
    // References
    // =========================================================================

    fn rename_references(&mut self) {
        for index in 0..self.binder.references.len() {
            let reference = &self.binder.references[index];
            let (node, resolved) = (reference.node, reference.resolved);
            let Some(scope) = resolved else {
                continue;
            };
            let Some(name) = self.arena.identifier_text(node).map(str::to_string) else {
                continue;
            };
            let Some(moved) = self
                .binder
                .scopes
                .get(scope)
                .and_then(|scope| scope.moves.get(&name))
                .cloned()
            else {
                continue;
            };

            self.binder.references[index].resolved = Some(moved.scope);
            if moved.new_name == name {
                continue;
            }

            let Some(ident) = self.arena.get(node) else {
                continue;
            };
            let (start, end) = (ident.pos, ident.end);
            let text = if is_shorthand_property_name(self.arena, node) {
                format!("{name}: {}", moved.new_name)
            } else {
                moved.new_name.clone()
            };
            self.arena.rename_identifier(node, &moved.new_name);
            self.edits.push(Edit::new(start, end, text));
        }
    }
}

/// `{ name }` or `{ name = init }` inside an object binding pattern.
fn is_shorthand_binding(arena: &NodeArena, leaf: NodeIndex) -> bool {
    let element = arena.parent_of(leaf);
    let Some(node) = arena.get(element) else {
        return false;
    };
    node.kind == BINDING_ELEMENT
        && arena.get_binding_element(node).is_some_and(|data| {
            data.name == leaf && data.property_name.is_none() && !data.dot_dot_dot_token
        })
        && arena
            .kind_of(arena.parent_of(element))
            .is_some_and(|kind| kind == OBJECT_BINDING_PATTERN)
}

/// `{ name }` in an object literal or assignment pattern.
fn is_shorthand_property_name(arena: &NodeArena, reference: NodeIndex) -> bool {
    let Some(parent) = arena.get(arena.parent_of(reference)) else {
        return false;
    };
    parent.kind == SHORTHAND_PROPERTY_ASSIGNMENT
        && arena
            .get_shorthand_property(parent)
            .is_some_and(|data| data.name == reference)
}
