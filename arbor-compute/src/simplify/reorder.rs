//! Canonical reordering of commutative operands.
//!
//! Each node gets a transient score: constants weigh the most, then literals, operators, and
//! variables, with functions weighing nothing. Scores accumulate from children to parent through
//! the pass's side table, and an addition or multiplication swaps its children when the right
//! side outweighs the left. The swap fires only on a strictly greater score, so equal operands
//! never oscillate and repeated passes reach a fixed point.

use crate::tree::{
    rewrite::{Flags, Rule},
    BinOp,
    NodeId,
    Payload,
    Tree,
};

pub struct Reorder;

fn weight(payload: &Payload) -> i64 {
    match payload {
        Payload::Constant(_) => 8,
        Payload::Literal(_) => 4,
        Payload::Binary(_) | Payload::Unary(_) | Payload::Vector | Payload::Arg => 2,
        Payload::Variable(_) => 1,
        Payload::Function(_) => 0,
    }
}

impl Rule for Reorder {
    fn apply(&mut self, tree: &mut Tree, node: NodeId, flags: &mut Flags) -> bool {
        // children were visited first, so their accumulated scores are already in the table
        let mut score = weight(&tree.node(node).payload);
        let (left, right) = (tree.node(node).left, tree.node(node).right);
        if let Some(left) = left {
            score += flags.get(left);
        }
        if let Some(right) = right {
            score += flags.get(right);
        }
        flags.set(node, score);

        if !matches!(tree.node(node).payload, Payload::Binary(BinOp::Add | BinOp::Mul)) {
            return false;
        }
        let (Some(left), Some(right)) = (left, right) else {
            return false;
        };

        if flags.get(right) > flags.get(left) {
            tree.switch_children(node);
            true
        } else {
            false
        }
    }
}
