//! Constant folding: any operator, function, or vector literal whose operands are all literals
//! collapses to the literal it evaluates to.

use crate::{
    eval::{binary, unary},
    tree::{
        rewrite::{Flags, Rule},
        BinOp,
        NodeId,
        Payload,
        Tree,
    },
    value::Value,
};

pub struct Fold;

/// Returns the literal value of a node, if it is a literal.
fn literal(tree: &Tree, id: NodeId) -> Option<Value> {
    match &tree.node(id).payload {
        Payload::Literal(value) => Some(value.clone()),
        _ => None,
    }
}

impl Rule for Fold {
    fn apply(&mut self, tree: &mut Tree, node: NodeId, _flags: &mut Flags) -> bool {
        let folded = match tree.node(node).payload.clone() {
            // literal indexing is handled by the identity pass, which can see multi-index
            // argument chains
            Payload::Binary(BinOp::Index) => None,
            Payload::Binary(op) => {
                let (Some(left), Some(right)) = (tree.node(node).left, tree.node(node).right) else {
                    return false;
                };
                let (Some(a), Some(b)) = (literal(tree, left), literal(tree, right)) else {
                    return false;
                };
                binary::eval_operands(
                    op,
                    a,
                    b,
                    tree.node(left).span.clone(),
                    tree.node(right).span.clone(),
                ).ok()
            },
            Payload::Unary(op) => {
                let operand = tree.node(node).left.and_then(|left| literal(tree, left));
                operand.and_then(|value| {
                    unary::eval_operand(op, value, tree.node(node).span.clone()).ok()
                })
            },
            Payload::Function(func) => {
                let args = tree.node(node).left.map(|head| tree.arg_chain(head));
                match args.as_deref() {
                    Some([arg]) => {
                        literal(tree, *arg)
                            .and_then(|value| value.as_complex())
                            .map(|c| func.eval(c))
                    },
                    _ => None,
                }
            },
            Payload::Vector => {
                let elements = match tree.node(node).left {
                    Some(head) => tree.arg_chain(head),
                    None => return false,
                };
                elements.iter()
                    .map(|&element| literal(tree, element))
                    .collect::<Option<Vec<_>>>()
                    .map(Value::vector)
            },
            _ => None,
        };

        match folded {
            Some(value) => {
                tree.make_literal(node, value);
                true
            },
            None => false,
        }
    }
}
