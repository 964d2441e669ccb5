//! Rendering a [`Tree`] back to expression syntax.
//!
//! Parentheses are inserted only where precedence or associativity requires them, so rendering a
//! freshly parsed tree reproduces the expression's structure, not its exact spelling.

use std::fmt::{Display, Formatter, Result};
use super::{BinOp, NodeId, Payload, Tree, UnaryOp};

/// Printing precedence of a node; higher binds tighter. Atoms are above every operator so they
/// are never parenthesized.
fn precedence(tree: &Tree, id: NodeId) -> u8 {
    match tree.node(id).payload {
        Payload::Binary(BinOp::Add | BinOp::Sub) => 1,
        Payload::Binary(BinOp::Mul | BinOp::Div) => 2,
        Payload::Unary(UnaryOp::Neg) => 3,
        Payload::Binary(BinOp::Pow) => 4,
        Payload::Unary(UnaryOp::Transpose) | Payload::Binary(BinOp::Index) => 5,
        _ => 6,
    }
}

fn fmt_child(f: &mut Formatter<'_>, tree: &Tree, id: NodeId, min: u8) -> Result {
    if precedence(tree, id) < min {
        write!(f, "(")?;
        fmt_node(f, tree, id)?;
        write!(f, ")")
    } else {
        fmt_node(f, tree, id)
    }
}

fn fmt_args(f: &mut Formatter<'_>, tree: &Tree, head: NodeId) -> Result {
    for (i, element) in tree.arg_chain(head).into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        fmt_node(f, tree, element)?;
    }
    Ok(())
}

fn fmt_node(f: &mut Formatter<'_>, tree: &Tree, id: NodeId) -> Result {
    let node = tree.node(id);
    match &node.payload {
        Payload::Literal(value) => write!(f, "{}", value),
        Payload::Constant(name) => write!(f, "{}", name),
        Payload::Variable(name) => {
            write!(f, "{}", name)?;
            // a function-valued variable carries its argument list as a left child
            if let Some(args) = node.left {
                write!(f, "(")?;
                fmt_args(f, tree, args)?;
                write!(f, ")")?;
            }
            Ok(())
        },
        Payload::Binary(op) => {
            // children the tree builder attached are always present
            let (Some(left), Some(right)) = (node.left, node.right) else {
                return Ok(());
            };
            let prec = precedence(tree, id);
            match op {
                BinOp::Add => {
                    fmt_child(f, tree, left, prec)?;
                    write!(f, " + ")?;
                    fmt_child(f, tree, right, prec)
                },
                BinOp::Sub => {
                    fmt_child(f, tree, left, prec)?;
                    write!(f, " - ")?;
                    fmt_child(f, tree, right, prec + 1)
                },
                BinOp::Mul => {
                    fmt_child(f, tree, left, prec)?;
                    write!(f, " * ")?;
                    fmt_child(f, tree, right, prec)
                },
                BinOp::Div => {
                    fmt_child(f, tree, left, prec)?;
                    write!(f, " / ")?;
                    fmt_child(f, tree, right, prec + 1)
                },
                BinOp::Pow => {
                    // right-associative: the left child needs parentheses even at equal
                    // precedence
                    fmt_child(f, tree, left, prec + 1)?;
                    write!(f, "^")?;
                    fmt_child(f, tree, right, prec)
                },
                BinOp::Index => {
                    fmt_child(f, tree, left, prec)?;
                    write!(f, "[")?;
                    fmt_args(f, tree, right)?;
                    write!(f, "]")
                },
            }
        },
        Payload::Unary(UnaryOp::Neg) => {
            write!(f, "-")?;
            match node.left {
                Some(operand) => fmt_child(f, tree, operand, precedence(tree, id)),
                None => Ok(()),
            }
        },
        Payload::Unary(UnaryOp::Transpose) => {
            if let Some(operand) = node.left {
                fmt_child(f, tree, operand, precedence(tree, id))?;
            }
            write!(f, "'")
        },
        Payload::Function(func) => {
            write!(f, "{}(", func)?;
            if let Some(args) = node.left {
                fmt_args(f, tree, args)?;
            }
            write!(f, ")")
        },
        Payload::Vector => {
            write!(f, "[")?;
            if let Some(elements) = node.left {
                fmt_args(f, tree, elements)?;
            }
            write!(f, "]")
        },
        Payload::Arg => fmt_args(f, tree, id),
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        fmt_node(f, self, self.root())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::ctxt::Ctxt;
    use super::*;

    fn render(source: &str) -> String {
        Tree::parse(source, &Ctxt::default()).unwrap().to_string()
    }

    #[test]
    fn precedence_needs_no_parentheses() {
        assert_eq!(render("1 + 2 * 3"), "1 + 2 * 3");
        assert_eq!(render("(1 + 2) * 3"), "(1 + 2) * 3");
    }

    #[test]
    fn associativity_keeps_parentheses_that_matter() {
        assert_eq!(render("x - (y - z)"), "x - (y - z)");
        assert_eq!(render("(x - y) - z"), "x - y - z");
        assert_eq!(render("(2^3)^2"), "(2^3)^2");
        assert_eq!(render("2^3^2"), "2^3^2");
    }

    #[test]
    fn unary_and_postfix() {
        assert_eq!(render("-x^2"), "-x^2");
        assert_eq!(render("(-x)^2"), "(-x)^2");
        assert_eq!(render("(m + n)'"), "(m + n)'");
        assert_eq!(render("m[1, 2]"), "m[1, 2]");
    }

    #[test]
    fn calls_and_vectors() {
        assert_eq!(render("sin(x + 1)"), "sin(x + 1)");
        assert_eq!(render("[1, 2; 3, 4]"), "[[1, 2], [3, 4]]");
        assert_eq!(render("f(x, 2)"), "f(x, 2)");
    }

    #[test]
    fn implicit_multiplication_renders_explicitly() {
        assert_eq!(render("2x"), "2 * x");
    }
}
