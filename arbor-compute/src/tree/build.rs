//! Lowering of the parser's AST into an expression [`Tree`].
//!
//! This is where names are resolved. A bare symbol resolves against the context, constants before
//! variables; a called name resolves against the built-in function table first, and otherwise
//! becomes a function-valued variable reference. Resolution never fails: an unbound name still
//! builds (it may be bound before evaluation), but a [`Warning`] is recorded for it.

use std::ops::Range;
use arbor_parser::parser::{
    error::Error as ParseError,
    expr::Expr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use crate::{ctxt::Ctxt, funcs::Func};
use super::{BinOp, NodeId, Payload, Tree, UnaryOp};

/// A reference to a name that is not bound in the context the tree was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The unbound name.
    pub name: String,

    /// The region of the source code that referenced the name.
    pub span: Range<usize>,
}

impl Tree {
    /// Parses the given source string and lowers it into a tree, resolving names against the
    /// given context.
    pub fn parse(source: &str, ctxt: &Ctxt) -> Result<Tree, ParseError> {
        let ast = Parser::new(source).try_parse_full::<Expr>()?;
        Ok(Self::from_ast(&ast, ctxt))
    }

    /// Lowers an already-parsed AST into a tree.
    pub fn from_ast(ast: &Expr, ctxt: &Ctxt) -> Tree {
        let mut tree = Tree::new();
        let root = build(&mut tree, ctxt, ast);
        tree.set_root(root);
        tree
    }

    /// Builds a right-leaning chain of [`Payload::Arg`] cells over the given elements, returning
    /// the head of the chain. A single element needs no chain and is returned bare; `None` means
    /// there were no elements.
    fn arg_chain_of(&mut self, elements: Vec<(NodeId, Range<usize>)>) -> Option<NodeId> {
        if let [(element, _)] = elements.as_slice() {
            return Some(*element);
        }

        let mut head = None;
        for (element, span) in elements.into_iter().rev() {
            let cell = self.push(Payload::Arg, span);
            self.link_left(cell, element);
            if let Some(next) = head {
                self.link_right(cell, next);
            }
            head = Some(cell);
        }
        head
    }
}

fn build(tree: &mut Tree, ctxt: &Ctxt, expr: &Expr) -> NodeId {
    match expr {
        Expr::Literal(Literal::Number(num)) => {
            tree.literal(num.value, num.span.clone())
        },
        Expr::Literal(Literal::Symbol(sym)) => {
            if ctxt.is_const(&sym.name) {
                tree.push(Payload::Constant(sym.name.clone()), sym.span.clone())
            } else {
                if !ctxt.is_defined(&sym.name) {
                    tree.warnings.push(Warning {
                        name: sym.name.clone(),
                        span: sym.span.clone(),
                    });
                }
                tree.push(Payload::Variable(sym.name.clone()), sym.span.clone())
            }
        },
        Expr::Paren(paren) => build(tree, ctxt, &paren.expr),
        Expr::Vector(vector) => {
            let elements = vector.elements.iter()
                .map(|element| (build(tree, ctxt, element), element.span()))
                .collect::<Vec<_>>();
            let node = tree.push(Payload::Vector, vector.span.clone());
            // brackets cannot be empty, so the chain always has a head
            if let Some(head) = tree.arg_chain_of(elements) {
                tree.link_left(node, head);
            }
            node
        },
        Expr::Call(call) => {
            let args = call.args.iter()
                .map(|arg| (build(tree, ctxt, arg), arg.span()))
                .collect::<Vec<_>>();

            if let Some(func) = Func::from_name(&call.name.name) {
                // arity is checked during evaluation, where the mismatch can be reported with
                // the full call span
                let node = tree.push(Payload::Function(func), call.span.clone());
                if let Some(head) = tree.arg_chain_of(args) {
                    tree.link_left(node, head);
                }
                node
            } else {
                // a function-valued variable, such as `f(x)` where `f` is user-defined
                if !ctxt.is_defined(&call.name.name) {
                    tree.warnings.push(Warning {
                        name: call.name.name.clone(),
                        span: call.name.span.clone(),
                    });
                }
                let node = tree.push(Payload::Variable(call.name.name.clone()), call.span.clone());
                if let Some(head) = tree.arg_chain_of(args) {
                    tree.link_left(node, head);
                }
                node
            }
        },
        Expr::Index(index) => {
            let target = build(tree, ctxt, &index.target);
            let indices = index.indices.iter()
                .map(|idx| (build(tree, ctxt, idx), idx.span()))
                .collect::<Vec<_>>();
            let right = match tree.arg_chain_of(indices) {
                Some(head) => head,
                // the parser rejects empty index lists
                None => unreachable!("index expression without indices"),
            };
            tree.binary(BinOp::Index, target, right, index.span.clone())
        },
        Expr::Unary(unary) => {
            let operand = build(tree, ctxt, &unary.operand);
            match unary.op.kind {
                // unary plus is a no-op; drop it here so every consumer sees one negation form
                UnaryOpKind::Pos => operand,
                UnaryOpKind::Neg => tree.unary(UnaryOp::Neg, operand, unary.span.clone()),
                UnaryOpKind::Transpose => {
                    tree.unary(UnaryOp::Transpose, operand, unary.span.clone())
                },
            }
        },
        Expr::Binary(binary) => {
            let left = build(tree, ctxt, &binary.lhs);
            let right = build(tree, ctxt, &binary.rhs);
            let op = match binary.op.kind {
                BinOpKind::Exp => BinOp::Pow,
                BinOpKind::Mul => BinOp::Mul,
                BinOpKind::Div => BinOp::Div,
                BinOpKind::Add => BinOp::Add,
                BinOpKind::Sub => BinOp::Sub,
            };
            tree.binary(op, left, right, binary.span.clone())
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::value::Value;
    use super::*;

    #[test]
    fn constants_resolve_before_variables() {
        let tree = Tree::parse("pi * x", &Ctxt::default()).unwrap();
        let root = tree.root();
        let left = tree.node(root).left.unwrap();
        assert_eq!(tree.node(left).payload, Payload::Constant("pi".to_string()));
    }

    #[test]
    fn unbound_names_warn_but_still_build() {
        let tree = Tree::parse("x + 1", &Ctxt::default()).unwrap();
        assert_eq!(tree.warnings, vec![Warning { name: "x".to_string(), span: 0..1 }]);

        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::Real(2.0));
        let tree = Tree::parse("x + 1", &ctxt).unwrap();
        assert!(tree.warnings.is_empty());
    }

    #[test]
    fn known_function_call() {
        let tree = Tree::parse("sin(x + 1)", &Ctxt::default()).unwrap();
        let root = tree.root();
        assert_eq!(tree.node(root).payload, Payload::Function(Func::Sin));
        let operand = tree.node(root).left.unwrap();
        assert_eq!(tree.node(operand).payload, Payload::Binary(BinOp::Add));
    }

    #[test]
    fn unknown_call_is_a_function_valued_variable() {
        let tree = Tree::parse("f(2)", &Ctxt::default()).unwrap();
        let root = tree.root();
        assert_eq!(tree.node(root).payload, Payload::Variable("f".to_string()));
        let args = tree.arg_chain(tree.node(root).left.unwrap());
        assert_eq!(args.len(), 1);
        assert_eq!(tree.warnings.len(), 1);
    }

    #[test]
    fn vector_elements_form_an_arg_chain() {
        let tree = Tree::parse("[1, x, 3]", &Ctxt::default()).unwrap();
        let root = tree.root();
        assert_eq!(tree.node(root).payload, Payload::Vector);

        let elements = tree.arg_chain(tree.node(root).left.unwrap());
        assert_eq!(elements.len(), 3);
        assert_eq!(tree.node(elements[1]).payload, Payload::Variable("x".to_string()));
    }

    #[test]
    fn matrix_rows_are_nested_vectors() {
        let tree = Tree::parse("[1, 2; 3, 4]", &Ctxt::default()).unwrap();
        let rows = tree.arg_chain(tree.node(tree.root()).left.unwrap());
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(tree.node(row).payload, Payload::Vector);
            assert_eq!(tree.arg_chain(tree.node(row).left.unwrap()).len(), 2);
        }
    }

    #[test]
    fn single_elements_attach_bare() {
        let tree = Tree::parse("[7]", &Ctxt::default()).unwrap();
        let element = tree.node(tree.root()).left.unwrap();
        assert_eq!(tree.node(element).payload, Payload::Literal(Value::Real(7.0)));
    }

    #[test]
    fn unary_plus_is_dropped() {
        let tree = Tree::parse("+x", &Ctxt::default()).unwrap();
        assert_eq!(tree.node(tree.root()).payload, Payload::Variable("x".to_string()));
    }

    #[test]
    fn exponent_lowers_to_pow() {
        let tree = Tree::parse("2^3", &Ctxt::default()).unwrap();
        assert_eq!(tree.node(tree.root()).payload, Payload::Binary(BinOp::Pow));
    }

    #[test]
    fn indexing_lowers_to_a_binary_operator() {
        let tree = Tree::parse("m[1, 2]", &Ctxt::default()).unwrap();
        let root = tree.root();
        assert_eq!(tree.node(root).payload, Payload::Binary(BinOp::Index));
        let indices = tree.arg_chain(tree.node(root).right.unwrap());
        assert_eq!(indices.len(), 2);
    }
}
