//! Distribution of products over sums: `a * (b + c)` becomes `a * b + a * c`, and
//! `(b + c) * a` becomes `b * a + c * a`. Subtraction distributes the same way with its operand
//! order kept, and newly created products are distributed again on the next pass until no sum
//! sits under a product.

use crate::tree::{
    rewrite::{Flags, Rule},
    BinOp,
    NodeId,
    Payload,
    Tree,
};

pub struct Distribute;

/// Returns the children of a node if it is an addition or subtraction.
fn as_sum(tree: &Tree, id: NodeId) -> Option<(BinOp, NodeId, NodeId)> {
    let node = tree.node(id);
    match node.payload {
        Payload::Binary(op @ (BinOp::Add | BinOp::Sub)) => Some((op, node.left?, node.right?)),
        _ => None,
    }
}

impl Rule for Distribute {
    fn apply(&mut self, tree: &mut Tree, node: NodeId, _flags: &mut Flags) -> bool {
        if tree.node(node).payload != Payload::Binary(BinOp::Mul) {
            return false;
        }
        let (Some(left), Some(right)) = (tree.node(node).left, tree.node(node).right) else {
            return false;
        };
        let span = tree.node(node).span.clone();

        // check the left factor first, so `(a + b) * (c + d)` distributes the left sum before
        // the next pass reaches the right one
        if let Some((op, first, second)) = as_sum(tree, left) {
            // (b ± c) * a  ->  b * a ± c * a
            let b = tree.copy_subtree(first);
            let c = tree.copy_subtree(second);
            let a1 = tree.copy_subtree(right);
            let a2 = tree.copy_subtree(right);
            let first_product = tree.binary(BinOp::Mul, b, a1, span.clone());
            let second_product = tree.binary(BinOp::Mul, c, a2, span.clone());
            let sum = tree.binary(op, first_product, second_product, span);
            tree.replace(node, sum);
            return true;
        }

        if let Some((op, first, second)) = as_sum(tree, right) {
            // a * (b ± c)  ->  a * b ± a * c
            let a1 = tree.copy_subtree(left);
            let a2 = tree.copy_subtree(left);
            let b = tree.copy_subtree(first);
            let c = tree.copy_subtree(second);
            let first_product = tree.binary(BinOp::Mul, a1, b, span.clone());
            let second_product = tree.binary(BinOp::Mul, a2, c, span.clone());
            let sum = tree.binary(op, first_product, second_product, span);
            tree.replace(node, sum);
            return true;
        }

        false
    }
}
