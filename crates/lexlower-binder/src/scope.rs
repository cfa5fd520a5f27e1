//! Scope tree types.
//!
//! Scopes live in a [`ScopeArena`] and refer to each other by [`ScopeId`].
//! Every scope remembers the syntax node that introduced it, so passes that
//! only hold a scope can still walk the syntax tree from there.

use indexmap::IndexMap;
use lexlower_parser::{NodeArena, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Index of a scope in a [`ScopeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeKind {
    /// Program or function body. `var`, function and parameter names land here.
    Hoisting,
    /// Bare block, or a `for`/`for-in`/`for-of` header declaring `let`/`const`.
    Block,
    /// A `catch` clause, holding the caught name.
    CatchBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationKind {
    Function,
    Parameter,
    Var,
    Const,
    Let,
    Caught,
}

impl DeclarationKind {
    /// Kinds that attach to the current scope instead of the nearest
    /// hoisting scope.
    #[inline]
    pub fn is_block_scoped(self) -> bool {
        matches!(self, Self::Const | Self::Let | Self::Caught)
    }

    #[inline]
    pub fn is_const_or_let(self) -> bool {
        matches!(self, Self::Const | Self::Let)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Parameter => "parameter",
            Self::Var => "var",
            Self::Const => "const",
            Self::Let => "let",
            Self::Caught => "caught",
        }
    }
}

/// A name declared in a scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Declaring identifier, `NONE` for environment globals.
    pub node: NodeIndex,
    /// Byte offset from which references are legal. `None` for hoisted
    /// kinds, which are referable everywhere in their scope.
    pub from_pos: Option<u32>,
    /// Set once any write reference resolves here.
    pub written: bool,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, node: NodeIndex, from_pos: Option<u32>) -> Self {
        Self {
            kind,
            node,
            from_pos,
            written: false,
        }
    }
}

/// Where a lowered declaration went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Move {
    pub new_name: String,
    pub scope: ScopeId,
}

#[derive(Clone, Debug, Serialize)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Node that introduced the scope. `NONE` for the environment scope.
    pub node: NodeIndex,
    pub parent: ScopeId,
    pub children: Vec<ScopeId>,
    pub declarations: IndexMap<String, Declaration>,
    /// Names looked up through this hoisting scope but declared further out,
    /// plus names tainted by nested `catch` clauses.
    pub propagates: FxHashSet<String>,
    /// Declarations lowered out of this scope, keyed by their old name.
    pub moves: FxHashMap<String, Move>,
}

impl Scope {
    pub fn new(parent: ScopeId, kind: ScopeKind, node: NodeIndex) -> Self {
        Self {
            kind,
            node,
            parent,
            children: Vec::new(),
            declarations: IndexMap::new(),
            propagates: FxHashSet::default(),
            moves: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn is_hoisting(&self) -> bool {
        self.kind == ScopeKind::Hoisting
    }

    #[inline]
    pub fn has_own(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    #[inline]
    pub fn kind_of(&self, name: &str) -> Option<DeclarationKind> {
        self.declarations.get(name).map(|decl| decl.kind)
    }

    #[inline]
    pub fn does_propagate(&self, name: &str) -> bool {
        self.propagates.contains(name)
    }
}

/// Owner of every scope created for one source file.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    /// Create a scope and register it with its parent.
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind, node: NodeIndex) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(parent, kind, node));
        if let Some(parent_scope) = self.get_mut(parent) {
            parent_scope.children.push(id);
        }
        id
    }

    #[inline]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get(id.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get_mut(id.0 as usize)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId(index as u32), scope))
    }

    /// Drop every recorded move, once references have been retargeted.
    pub fn clear_moves(&mut self) {
        for scope in &mut self.scopes {
            scope.moves.clear();
        }
    }

    #[inline]
    pub fn parent_of(&self, id: ScopeId) -> ScopeId {
        self.get(id).map_or(ScopeId::NONE, |scope| scope.parent)
    }

    /// `id` itself, then each enclosing scope up to the root.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id).filter(|id| self.get(*id).is_some()), |&current| {
            Some(self.parent_of(current)).filter(|parent| parent.is_some())
        })
    }

    /// Nearest hoisting scope, starting at `id` itself.
    pub fn closest_hoisting_scope(&self, id: ScopeId) -> ScopeId {
        self.ancestors(id)
            .find(|&candidate| self.get(candidate).is_some_and(Scope::is_hoisting))
            .unwrap_or(ScopeId::NONE)
    }

    /// First scope from `id` outward that declares `name`.
    pub fn lookup(&self, id: ScopeId, name: &str) -> Option<ScopeId> {
        self.ancestors(id)
            .find(|&candidate| self.get(candidate).is_some_and(|scope| scope.has_own(name)))
    }

    /// Like [`lookup`](Self::lookup), additionally recording `name` as
    /// propagated in every hoisting scope passed through on the way.
    pub fn lookup_and_propagate(&mut self, id: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = id;
        while let Some(scope) = self.get_mut(current) {
            if scope.has_own(name) {
                return Some(current);
            }
            if scope.is_hoisting() && !scope.propagates.contains(name) {
                scope.propagates.insert(name.to_string());
            }
            current = scope.parent;
        }
        None
    }

    /// Declaration of `name` in scope `id`.
    pub fn declaration(&self, id: ScopeId, name: &str) -> Option<&Declaration> {
        self.get(id).and_then(|scope| scope.get(name))
    }

    pub fn declaration_mut(&mut self, id: ScopeId, name: &str) -> Option<&mut Declaration> {
        self.get_mut(id)
            .and_then(|scope| scope.declarations.get_mut(name))
    }

    /// True when a function's scope lies on the path from `inner` up to (but
    /// excluding) `outer`.
    pub fn has_function_scope_between(
        &self,
        arena: &NodeArena,
        inner: ScopeId,
        outer: ScopeId,
    ) -> bool {
        for candidate in self.ancestors(inner) {
            if candidate == outer {
                return false;
            }
            let is_function = self
                .get(candidate)
                .and_then(|scope| arena.get(scope.node))
                .is_some_and(|node| node.is_function_like());
            if is_function {
                return true;
            }
        }
        false
    }
}
