//! Depth-first traversal over the node arena.
//!
//! Children are visited left to right in source order, as reported by
//! [`NodeArena::get_children`]. The walk uses an explicit stack, so deeply
//! nested trees do not grow the call stack.
//!
//! Passes that keep state across `pre` and `post` implement [`Visitor`];
//! one-off traversals can use the closure helpers [`walk`] and [`walk_pre`].

use crate::parser::{NodeArena, NodeIndex};

/// Returned by a pre-order visitor to control descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not visit this node's children. `post` is still called.
    SkipChildren,
}

/// A traversal pass.
pub trait Visitor {
    fn pre(&mut self, arena: &NodeArena, index: NodeIndex) -> WalkControl;

    fn post(&mut self, _arena: &NodeArena, _index: NodeIndex) {}
}

enum Frame {
    Enter(NodeIndex),
    Leave(NodeIndex),
}

/// Drive `visitor` over every node reachable from `root`.
pub fn walk_with<V: Visitor + ?Sized>(arena: &NodeArena, root: NodeIndex, visitor: &mut V) {
    if arena.get(root).is_none() {
        return;
    }
    let mut stack = vec![Frame::Enter(root)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(index) => {
                stack.push(Frame::Leave(index));
                if visitor.pre(arena, index) == WalkControl::SkipChildren {
                    continue;
                }
                let children = arena.get_children(index);
                for &child in children.iter().rev() {
                    debug_assert_eq!(
                        arena.parent_of(child),
                        index,
                        "parent link of node {} is stale",
                        child.0
                    );
                    stack.push(Frame::Enter(child));
                }
            }
            Frame::Leave(index) => visitor.post(arena, index),
        }
    }
}

struct FnVisitor<Pre, Post> {
    pre: Pre,
    post: Post,
}

impl<Pre, Post> Visitor for FnVisitor<Pre, Post>
where
    Pre: FnMut(NodeIndex) -> WalkControl,
    Post: FnMut(NodeIndex),
{
    fn pre(&mut self, _arena: &NodeArena, index: NodeIndex) -> WalkControl {
        (self.pre)(index)
    }

    fn post(&mut self, _arena: &NodeArena, index: NodeIndex) {
        (self.post)(index)
    }
}

/// Visit every node reachable from `root`, calling `pre` before and `post`
/// after each node's children.
pub fn walk<Pre, Post>(arena: &NodeArena, root: NodeIndex, pre: Pre, post: Post)
where
    Pre: FnMut(NodeIndex) -> WalkControl,
    Post: FnMut(NodeIndex),
{
    walk_with(arena, root, &mut FnVisitor { pre, post });
}

/// Pre-order only.
pub fn walk_pre<Pre>(arena: &NodeArena, root: NodeIndex, pre: Pre)
where
    Pre: FnMut(NodeIndex) -> WalkControl,
{
    walk(arena, root, pre, |_| {});
}

/// Assign the parent link of every node reachable from `root`. The root's
/// parent is `NONE`.
pub fn link_parents(arena: &mut NodeArena, root: NodeIndex) {
    if arena.get(root).is_none() {
        return;
    }
    arena.set_parent(root, NodeIndex::NONE);
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let children = arena.get_children(index);
        for &child in children.iter().rev() {
            arena.set_parent(child, index);
            stack.push(child);
        }
    }
}
