//! The engine representation of an expression: a binary tree of nodes held in an arena.
//!
//! Nodes are addressed by stable [`NodeId`] indices into the arena. Each node stores optional
//! parent / child indices, so rewrites are index reassignments; any node can still look upward
//! through its parent link. Detached nodes stay in the arena until the tree is dropped, which
//! keeps every [`NodeId`] handed out valid for the life of the tree.

mod build;
mod fmt;
pub mod rewrite;

pub use build::Warning;

use std::ops::Range;
use crate::{funcs::Func, value::Value};

/// A stable index of a node in a [`Tree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A binary operation between two subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    /// Postfix indexing; the right child holds the index, or an [`Payload::Arg`] chain of two
    /// indices for a matrix element.
    Index,
}

/// A unary operation on a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Transpose,
}

/// What a node in the tree represents.
///
/// The set is closed so that every consumer (evaluator, differentiator, simplifier, printer)
/// matches exhaustively; adding a variant is a compile error everywhere it must be handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A literal value.
    Literal(Value),

    /// A reference to a variable, resolved by name at evaluation time.
    ///
    /// A variable applied to an argument list (`x(y)` where `x` is not a known function) is
    /// function-valued; its left child holds the argument list as an [`Payload::Arg`] chain.
    Variable(String),

    /// A reference to a named constant, such as `pi`.
    Constant(String),

    /// A binary operator; both children are operands.
    Binary(BinOp),

    /// A unary operator; the left child is the operand.
    Unary(UnaryOp),

    /// A built-in function application; the left child is the operand, or an [`Payload::Arg`]
    /// chain when more than one argument was written.
    Function(Func),

    /// A vector literal; the left child holds the elements, bare for a single element or as the
    /// head of an [`Payload::Arg`] chain.
    Vector,

    /// An argument-list cons cell: the left child is one element, the right child is the next
    /// cell, if any. Chains only ever hold two or more elements; a lone element attaches
    /// directly. Used for vector elements and function-valued-variable argument lists.
    Arg,
}

/// One node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What this node represents.
    pub payload: Payload,

    /// The parent of this node, if it is attached and not the root. Never owning; used only for
    /// upward navigation during rewrites.
    pub parent: Option<NodeId>,

    /// The left child, if any.
    pub left: Option<NodeId>,

    /// The right child, if any.
    pub right: Option<NodeId>,

    /// The region of the source code this node was built from. Nodes synthesized by a rewrite
    /// inherit the span of the node they were derived from.
    pub span: Range<usize>,
}

/// An expression tree backed by an arena of nodes.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,

    /// Warnings collected while the tree was built, such as references to unbound names. Never
    /// printed by the engine; the embedding decides how to surface them.
    pub warnings: Vec<Warning>,
}

impl Tree {
    /// Creates an empty tree. The tree is not usable until nodes are pushed and
    /// [`Tree::set_root`] is called.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId(0),
            warnings: Vec::new(),
        }
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Makes the given node the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        self.nodes[id.0].parent = None;
        self.root = id;
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Pushes a new detached node into the arena.
    pub fn push(&mut self, payload: Payload, span: Range<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            payload,
            parent: None,
            left: None,
            right: None,
            span,
        });
        id
    }

    /// Pushes a literal node.
    pub fn literal(&mut self, value: impl Into<Value>, span: Range<usize>) -> NodeId {
        self.push(Payload::Literal(value.into()), span)
    }

    /// Pushes a binary operator node over the two given subtrees.
    pub fn binary(&mut self, op: BinOp, left: NodeId, right: NodeId, span: Range<usize>) -> NodeId {
        let id = self.push(Payload::Binary(op), span);
        self.link_left(id, left);
        self.link_right(id, right);
        id
    }

    /// Pushes a unary operator node over the given subtree.
    pub fn unary(&mut self, op: UnaryOp, operand: NodeId, span: Range<usize>) -> NodeId {
        let id = self.push(Payload::Unary(op), span);
        self.link_left(id, operand);
        id
    }

    /// Pushes a function application node over the given subtree.
    pub fn function(&mut self, func: Func, operand: NodeId, span: Range<usize>) -> NodeId {
        let id = self.push(Payload::Function(func), span);
        self.link_left(id, operand);
        id
    }

    /// Attaches a node as the left child of a parent.
    pub fn link_left(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].left = Some(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Attaches a node as the right child of a parent.
    pub fn link_right(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].right = Some(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Removes the link between a parent and one of its children, leaving the child detached.
    fn unlink(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            if self.nodes[parent.0].left == Some(child) {
                self.nodes[parent.0].left = None;
            } else if self.nodes[parent.0].right == Some(child) {
                self.nodes[parent.0].right = None;
            }
        }
    }

    /// Replaces `node` with `new`: `new` inherits `node`'s parent slot, and `node` is detached
    /// along with its remaining children. Returns the detached node so the caller can inspect
    /// the discarded subtree.
    pub fn replace(&mut self, node: NodeId, new: NodeId) -> NodeId {
        self.unlink(new);

        let parent = self.nodes[node.0].parent.take();
        self.nodes[new.0].parent = parent;
        match parent {
            Some(p) => {
                if self.nodes[p.0].left == Some(node) {
                    self.nodes[p.0].left = Some(new);
                } else if self.nodes[p.0].right == Some(node) {
                    self.nodes[p.0].right = Some(new);
                }
            },
            None => self.root = new,
        }

        node
    }

    /// Replaces `node` with `new`, with `new` also inheriting `node`'s children. Used to wrap or
    /// substitute a node without losing its subtree. Returns the detached node, now childless.
    pub fn swap(&mut self, node: NodeId, new: NodeId) -> NodeId {
        let left = self.nodes[node.0].left.take();
        let right = self.nodes[node.0].right.take();
        let detached = self.replace(node, new);
        if let Some(l) = left {
            self.link_left(new, l);
        }
        if let Some(r) = right {
            self.link_right(new, r);
        }
        detached
    }

    /// Splices `node` up to replace its own parent; the parent and its other subtree are
    /// detached and returned. Does nothing when `node` is the root.
    pub fn shift_up(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        Some(self.replace(parent, node))
    }

    /// Swaps the left and right children of a node in place.
    pub fn switch_children(&mut self, node: NodeId) {
        let n = &mut self.nodes[node.0];
        std::mem::swap(&mut n.left, &mut n.right);
    }

    /// Turns a node into a literal leaf, detaching any children it had.
    pub fn make_literal(&mut self, node: NodeId, value: Value) {
        if let Some(left) = self.nodes[node.0].left {
            self.unlink(left);
        }
        if let Some(right) = self.nodes[node.0].right {
            self.unlink(right);
        }
        self.nodes[node.0].payload = Payload::Literal(value);
    }

    /// Deep-copies a subtree within this tree, returning the detached copy. Literal payloads are
    /// cloned; variable and constant payloads are copied by name.
    pub fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let (payload, span, left, right) = {
            let node = &self.nodes[id.0];
            (node.payload.clone(), node.span.clone(), node.left, node.right)
        };
        let left = left.map(|child| self.copy_subtree(child));
        let right = right.map(|child| self.copy_subtree(child));

        let new = self.push(payload, span);
        if let Some(l) = left {
            self.link_left(new, l);
        }
        if let Some(r) = right {
            self.link_right(new, r);
        }
        new
    }

    /// Deep-copies a subtree of another tree into this one, returning the detached copy.
    pub fn copy_from(&mut self, src: &Tree, id: NodeId) -> NodeId {
        let node = src.node(id);
        let left = node.left.map(|child| self.copy_from(src, child));
        let right = node.right.map(|child| self.copy_from(src, child));

        let new = self.push(node.payload.clone(), node.span.clone());
        if let Some(l) = left {
            self.link_left(new, l);
        }
        if let Some(r) = right {
            self.link_right(new, r);
        }
        new
    }

    /// Returns the nodes of the subtree rooted at `from` in post-order (children before parent).
    pub fn post_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        self.collect_post_order(from, &mut order);
        order
    }

    fn collect_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(left) = self.nodes[id.0].left {
            self.collect_post_order(left, out);
        }
        if let Some(right) = self.nodes[id.0].right {
            self.collect_post_order(right, out);
        }
        out.push(id);
    }

    /// Collects the elements of an [`Payload::Arg`] chain headed at the given node. A non-`Arg`
    /// node is treated as a single-element chain.
    pub fn arg_chain(&self, head: NodeId) -> Vec<NodeId> {
        let mut elements = Vec::new();
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            match self.nodes[id.0].payload {
                Payload::Arg => {
                    if let Some(element) = self.nodes[id.0].left {
                        elements.push(element);
                    }
                    cursor = self.nodes[id.0].right;
                },
                _ => {
                    elements.push(id);
                    cursor = None;
                },
            }
        }
        elements
    }
}

impl Clone for Tree {
    /// Deep-copies the tree, compacting away any detached nodes left over from rewrites.
    fn clone(&self) -> Self {
        let mut tree = Tree::new();
        let root = tree.copy_from(self, self.root);
        tree.set_root(root);
        tree.warnings = self.warnings.clone();
        tree
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
