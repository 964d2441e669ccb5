//! Identity elimination: operations with a neutral or annihilating literal operand are reduced
//! structurally, without evaluating the other operand.

use crate::{
    eval::binary,
    tree::{
        rewrite::{Flags, Rule},
        BinOp,
        NodeId,
        Payload,
        Tree,
    },
    value::Value,
};

pub struct Identity;

/// Returns true if the node is a literal scalar equal to `n`.
fn is_literal(tree: &Tree, id: NodeId, n: f64) -> bool {
    matches!(&tree.node(id).payload, Payload::Literal(value) if value.eq_real(n))
}

impl Rule for Identity {
    fn apply(&mut self, tree: &mut Tree, node: NodeId, _flags: &mut Flags) -> bool {
        match tree.node(node).payload.clone() {
            Payload::Binary(op) => {
                let (Some(left), Some(right)) = (tree.node(node).left, tree.node(node).right) else {
                    return false;
                };
                match op {
                    BinOp::Add => {
                        if is_literal(tree, right, 0.0) {
                            tree.shift_up(left);
                            true
                        } else if is_literal(tree, left, 0.0) {
                            tree.shift_up(right);
                            true
                        } else {
                            false
                        }
                    },
                    BinOp::Sub => {
                        if is_literal(tree, right, 0.0) {
                            tree.shift_up(left);
                            true
                        } else {
                            false
                        }
                    },
                    BinOp::Mul => {
                        if is_literal(tree, left, 0.0) || is_literal(tree, right, 0.0) {
                            tree.make_literal(node, Value::Real(0.0));
                            true
                        } else if is_literal(tree, right, 1.0) {
                            tree.shift_up(left);
                            true
                        } else if is_literal(tree, left, 1.0) {
                            tree.shift_up(right);
                            true
                        } else {
                            false
                        }
                    },
                    BinOp::Div => {
                        if is_literal(tree, right, 0.0) {
                            // division by zero is NaN, not an error
                            tree.make_literal(node, Value::Real(f64::NAN));
                            true
                        } else if is_literal(tree, right, 1.0) {
                            tree.shift_up(left);
                            true
                        } else if is_literal(tree, left, 0.0) {
                            tree.make_literal(node, Value::Real(0.0));
                            true
                        } else {
                            false
                        }
                    },
                    BinOp::Pow => {
                        if is_literal(tree, right, 0.0) {
                            // x^0 is 1 even for unbound x
                            tree.make_literal(node, Value::Real(1.0));
                            true
                        } else if is_literal(tree, right, 1.0) {
                            tree.shift_up(left);
                            true
                        } else if is_literal(tree, left, 0.0) {
                            tree.make_literal(node, Value::Real(0.0));
                            true
                        } else if is_literal(tree, left, 1.0) {
                            tree.make_literal(node, Value::Real(1.0));
                            true
                        } else {
                            false
                        }
                    },
                    BinOp::Index => fold_literal_index(tree, node, left, right),
                }
            },
            Payload::Unary(op) => {
                // double negation and double transposition cancel
                let Some(operand) = tree.node(node).left else {
                    return false;
                };
                if tree.node(operand).payload != Payload::Unary(op) {
                    return false;
                }
                let Some(inner) = tree.node(operand).left else {
                    return false;
                };
                tree.replace(node, inner);
                true
            },
            _ => false,
        }
    }
}

/// Collapses indexing into a literal vector or matrix with literal indices. Anything that would
/// fail (out of bounds, bad index type) is left alone for evaluation to report against the
/// original source spans.
fn fold_literal_index(tree: &mut Tree, node: NodeId, target: NodeId, index_head: NodeId) -> bool {
    let Payload::Literal(value) = &tree.node(target).payload else {
        return false;
    };
    if !matches!(value, Value::Vector(_) | Value::Matrix(_)) {
        return false;
    }

    let target_value = value.clone();
    let mut indices = Vec::new();
    for id in tree.arg_chain(index_head) {
        let Payload::Literal(index) = &tree.node(id).payload else {
            return false;
        };
        indices.push((index.clone(), tree.node(id).span.clone()));
    }

    match binary::eval_index(target_value, indices, tree.node(target).span.clone()) {
        Ok(element) => {
            tree.make_literal(node, element);
            true
        },
        Err(_) => false,
    }
}
