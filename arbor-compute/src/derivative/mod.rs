//! Symbolic differentiation of expression trees.
//!
//! [`derive`] builds a brand-new tree for the derivative of the input with respect to one
//! variable; the input tree is never modified. Subtrees that do not mention the variable
//! differentiate to zero without being descended into. The output is not simplified; feed it to
//! [`crate::simplify::simplify`] for a readable result.

mod function;

use crate::{
    error::{kind, Error},
    tree::{BinOp, NodeId, Payload, Tree, UnaryOp},
};

/// Differentiates the tree with respect to the named variable.
///
/// Vector literals, indexing, and `conj` have no differentiation rule and stop the derivative
/// with [`kind::UnsupportedDerivative`].
pub fn derive(tree: &Tree, var: &str) -> Result<Tree, Error> {
    let mut out = Tree::new();
    let root = derive_node(tree, tree.root(), var, &mut out)?;
    out.set_root(root);
    Ok(out)
}

/// Returns true if any node in the subtree references the named variable.
fn depends_on(tree: &Tree, id: NodeId, var: &str) -> bool {
    let node = tree.node(id);
    if matches!(&node.payload, Payload::Variable(name) if name == var) {
        return true;
    }
    node.left.is_some_and(|left| depends_on(tree, left, var))
        || node.right.is_some_and(|right| depends_on(tree, right, var))
}

pub(super) fn derive_node(
    src: &Tree,
    id: NodeId,
    var: &str,
    out: &mut Tree,
) -> Result<NodeId, Error> {
    let node = src.node(id);
    let span = node.span.clone();

    // anything that does not mention the variable is a constant of the differentiation
    if !depends_on(src, id, var) {
        return Ok(out.literal(0.0, span));
    }

    match &node.payload {
        // `depends_on` held, so this is the variable itself or a function-valued use of it
        Payload::Variable(name) => {
            if node.left.is_some() {
                return Err(Error::new(vec![span], kind::UnsupportedDerivative {
                    name: name.clone(),
                }));
            }
            Ok(out.literal(1.0, span))
        },
        Payload::Binary(op) => {
            let (Some(left), Some(right)) = (node.left, node.right) else {
                return Err(Error::new(vec![span], kind::UnsupportedDerivative {
                    name: format!("{:?}", op),
                }));
            };

            match op {
                BinOp::Add | BinOp::Sub => {
                    let dl = derive_node(src, left, var, out)?;
                    let dr = derive_node(src, right, var, out)?;
                    Ok(out.binary(*op, dl, dr, span))
                },
                BinOp::Mul => derive_product(src, left, right, var, out, span),
                BinOp::Div => derive_quotient(src, left, right, var, out, span),
                BinOp::Pow => derive_power(src, left, right, var, out, span),
                BinOp::Index => Err(Error::new(vec![span], kind::UnsupportedDerivative {
                    name: "[]".to_string(),
                })),
            }
        },
        Payload::Unary(op) => {
            let Some(operand) = node.left else {
                return Err(Error::new(vec![span], kind::UnsupportedDerivative {
                    name: format!("{:?}", op),
                }));
            };
            let derived = derive_node(src, operand, var, out)?;
            Ok(out.unary(*op, derived, span))
        },
        Payload::Function(func) => {
            let operand = node.left
                .map(|head| src.arg_chain(head))
                .filter(|args| args.len() == 1)
                .map(|args| args[0]);
            let Some(operand) = operand else {
                return Err(Error::new(vec![span], kind::UnsupportedDerivative {
                    name: func.name().to_string(),
                }));
            };
            function::derive_function(src, *func, operand, var, out, span)
        },
        Payload::Vector | Payload::Arg => Err(Error::new(vec![span], kind::UnsupportedDerivative {
            name: "[...]".to_string(),
        })),
        // literals and constants never depend on the variable
        Payload::Literal(_) | Payload::Constant(_) => Ok(out.literal(0.0, span)),
    }
}

/// Product rule, with a one-sided shortcut when only one factor mentions the variable.
fn derive_product(
    src: &Tree,
    left: NodeId,
    right: NodeId,
    var: &str,
    out: &mut Tree,
    span: std::ops::Range<usize>,
) -> Result<NodeId, Error> {
    match (depends_on(src, left, var), depends_on(src, right, var)) {
        (true, false) => {
            let dl = derive_node(src, left, var, out)?;
            let r = out.copy_from(src, right);
            Ok(out.binary(BinOp::Mul, dl, r, span))
        },
        (false, true) => {
            let l = out.copy_from(src, left);
            let dr = derive_node(src, right, var, out)?;
            Ok(out.binary(BinOp::Mul, l, dr, span))
        },
        _ => {
            // l' * r + l * r'
            let dl = derive_node(src, left, var, out)?;
            let r = out.copy_from(src, right);
            let first = out.binary(BinOp::Mul, dl, r, span.clone());

            let l = out.copy_from(src, left);
            let dr = derive_node(src, right, var, out)?;
            let second = out.binary(BinOp::Mul, l, dr, span.clone());

            Ok(out.binary(BinOp::Add, first, second, span))
        },
    }
}

/// Quotient rule. The one-sided cases are decided by which operand actually mentions the
/// variable: a variable-free denominator gives `l' / r`, and a variable-free numerator gives
/// `-(l * r') / r^2`.
fn derive_quotient(
    src: &Tree,
    left: NodeId,
    right: NodeId,
    var: &str,
    out: &mut Tree,
    span: std::ops::Range<usize>,
) -> Result<NodeId, Error> {
    let denominator_squared = |out: &mut Tree| {
        let r = out.copy_from(src, right);
        let two = out.literal(2.0, span.clone());
        out.binary(BinOp::Pow, r, two, span.clone())
    };

    match (depends_on(src, left, var), depends_on(src, right, var)) {
        (true, false) => {
            let dl = derive_node(src, left, var, out)?;
            let r = out.copy_from(src, right);
            Ok(out.binary(BinOp::Div, dl, r, span))
        },
        (false, true) => {
            let l = out.copy_from(src, left);
            let dr = derive_node(src, right, var, out)?;
            let numerator = out.binary(BinOp::Mul, l, dr, span.clone());
            let r2 = denominator_squared(out);
            let quotient = out.binary(BinOp::Div, numerator, r2, span.clone());
            Ok(out.unary(UnaryOp::Neg, quotient, span))
        },
        _ => {
            // (l' * r - l * r') / r^2
            let dl = derive_node(src, left, var, out)?;
            let r = out.copy_from(src, right);
            let first = out.binary(BinOp::Mul, dl, r, span.clone());

            let l = out.copy_from(src, left);
            let dr = derive_node(src, right, var, out)?;
            let second = out.binary(BinOp::Mul, l, dr, span.clone());

            let numerator = out.binary(BinOp::Sub, first, second, span.clone());
            let r2 = denominator_squared(out);
            Ok(out.binary(BinOp::Div, numerator, r2, span))
        },
    }
}

/// Power rule, split by which operand mentions the variable.
fn derive_power(
    src: &Tree,
    left: NodeId,
    right: NodeId,
    var: &str,
    out: &mut Tree,
    span: std::ops::Range<usize>,
) -> Result<NodeId, Error> {
    match (depends_on(src, left, var), depends_on(src, right, var)) {
        // r * l' * l^(r - 1)
        (true, false) => {
            let r = out.copy_from(src, right);
            let dl = derive_node(src, left, var, out)?;
            let coefficient = out.binary(BinOp::Mul, r, dl, span.clone());

            let base = out.copy_from(src, left);
            let r = out.copy_from(src, right);
            let one = out.literal(1.0, span.clone());
            let exponent = out.binary(BinOp::Sub, r, one, span.clone());
            let power = out.binary(BinOp::Pow, base, exponent, span.clone());

            Ok(out.binary(BinOp::Mul, coefficient, power, span))
        },
        // ln(l) * r' * l^r
        (false, true) => {
            let l = out.copy_from(src, left);
            let log = out.function(crate::funcs::Func::Ln, l, span.clone());
            let dr = derive_node(src, right, var, out)?;
            let coefficient = out.binary(BinOp::Mul, log, dr, span.clone());

            let base = out.copy_from(src, left);
            let exp = out.copy_from(src, right);
            let power = out.binary(BinOp::Pow, base, exp, span.clone());

            Ok(out.binary(BinOp::Mul, coefficient, power, span))
        },
        // l^r * (r' * ln(l) + r * l' / l)
        _ => {
            let base = out.copy_from(src, left);
            let exp = out.copy_from(src, right);
            let power = out.binary(BinOp::Pow, base, exp, span.clone());

            let dr = derive_node(src, right, var, out)?;
            let l = out.copy_from(src, left);
            let log = out.function(crate::funcs::Func::Ln, l, span.clone());
            let first = out.binary(BinOp::Mul, dr, log, span.clone());

            let r = out.copy_from(src, right);
            let dl = derive_node(src, left, var, out)?;
            let scaled = out.binary(BinOp::Mul, r, dl, span.clone());
            let l = out.copy_from(src, left);
            let second = out.binary(BinOp::Div, scaled, l, span.clone());

            let sum = out.binary(BinOp::Add, first, second, span.clone());
            Ok(out.binary(BinOp::Mul, power, sum, span))
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use crate::{ctxt::Ctxt, eval::evaluate, value::Value};
    use super::*;

    const DX: f64 = 1e-6;

    /// Evaluates the expression at `x`, with `c = 5` available as an unrelated binding.
    fn eval_at(tree: &Tree, x: f64) -> f64 {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::Real(x));
        ctxt.add_var("c", Value::Real(5.0));
        match evaluate(tree, &ctxt) {
            Ok(Value::Real(n)) => n,
            other => panic!("expected a real result, got {:?}", other),
        }
    }

    /// Checks the symbolic derivative against a central finite difference at several points.
    fn check_derivative(source: &str, points: &[f64]) {
        let tree = Tree::parse(source, &Ctxt::default()).unwrap();
        let derivative = derive(&tree, "x").unwrap();

        for &x in points {
            let symbolic = eval_at(&derivative, x);
            let numeric = (eval_at(&tree, x + DX) - eval_at(&tree, x - DX)) / (2.0 * DX);
            assert_float_absolute_eq!(symbolic, numeric, 1e-4);
        }
    }

    #[test]
    fn polynomials() {
        check_derivative("x^3 + 2x", &[-2.0, 0.5, 3.0]);
        check_derivative("(x + 1) * (x - 2)", &[-1.0, 0.0, 4.0]);
    }

    #[test]
    fn trigonometry() {
        check_derivative("sin(x) * cos(x)", &[-1.0, 0.3, 2.0]);
        check_derivative("tan(x)", &[0.2, 1.0]);
        check_derivative("atan(x) + asin(x / 2)", &[-0.5, 0.5]);
    }

    #[test]
    fn logarithms_and_roots() {
        check_derivative("ln(x^2 + 1)", &[-3.0, 0.0, 2.0]);
        check_derivative("log(x)", &[0.5, 10.0]);
        check_derivative("sqrt(x)", &[0.25, 4.0]);
        check_derivative("abs(x)", &[-2.0, 3.0]);
    }

    #[test]
    fn variable_exponents() {
        check_derivative("2^x", &[-1.0, 0.0, 2.0]);
        check_derivative("x^x", &[0.5, 1.0, 2.0]);
    }

    #[test]
    fn constant_over_variable() {
        // the one-sided quotient case: d/dx (c / x) = -c / x^2
        check_derivative("c / x", &[1.0, 2.0]);

        let tree = Tree::parse("3 / x", &Ctxt::default()).unwrap();
        let derivative = derive(&tree, "x").unwrap();
        assert_float_absolute_eq!(eval_at(&derivative, 2.0), -0.75, 1e-12);
    }

    #[test]
    fn quotients() {
        check_derivative("x / (x + 1)", &[0.0, 1.0, 3.0]);
        check_derivative("(x^2 - 1) / (x^2 + 1)", &[-2.0, 0.5]);
    }

    #[test]
    fn unrelated_subtrees_derive_to_zero() {
        let tree = Tree::parse("c * x + c^2", &Ctxt::default()).unwrap();
        let derivative = derive(&tree, "x").unwrap();
        // c is held constant, so the derivative is just c
        assert_float_absolute_eq!(eval_at(&derivative, 7.0), 5.0, 1e-12);
    }

    #[test]
    fn unsupported_constructs() {
        let ctxt = Ctxt::default();
        for source in ["[x, 1]", "conj(x)", "[x, 1][0]"] {
            let tree = Tree::parse(source, &ctxt).unwrap();
            let err = derive(&tree, "x").unwrap_err();
            assert!(format!("{:?}", err.kind).contains("UnsupportedDerivative"), "{}", source);
        }
    }

    #[test]
    fn negation_passes_through() {
        check_derivative("-x^2 + x", &[-1.0, 2.0]);
    }

    #[test]
    fn derivative_does_not_touch_the_input() {
        let ctxt = Ctxt::default();
        let tree = Tree::parse("x^2", &ctxt).unwrap();
        let before = tree.to_string();
        derive(&tree, "x").unwrap();
        assert_eq!(tree.to_string(), before);
    }
}
