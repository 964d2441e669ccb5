//! Chain-rule derivatives for the built-in functions.

use std::ops::Range;
use crate::{
    error::{kind, Error},
    funcs::Func,
    tree::{BinOp, NodeId, Tree, UnaryOp},
};
use super::derive_node;

/// Builds the derivative of `func(u)` in `out` by the chain rule: the inner derivative `u'`
/// multiplied into the outer derivative evaluated at a copy of `u`.
pub(super) fn derive_function(
    src: &Tree,
    func: Func,
    operand: NodeId,
    var: &str,
    out: &mut Tree,
    span: Range<usize>,
) -> Result<NodeId, Error> {
    let du = derive_node(src, operand, var, out)?;
    let u = |out: &mut Tree| out.copy_from(src, operand);

    Ok(match func {
        // u' * cos(u)
        Func::Sin => {
            let inner = u(out);
            let outer = out.function(Func::Cos, inner, span.clone());
            out.binary(BinOp::Mul, du, outer, span)
        },
        // -(u' * sin(u))
        Func::Cos => {
            let inner = u(out);
            let outer = out.function(Func::Sin, inner, span.clone());
            let product = out.binary(BinOp::Mul, du, outer, span.clone());
            out.unary(UnaryOp::Neg, product, span)
        },
        // u' / cos(u)^2
        Func::Tan => {
            let inner = u(out);
            let cos = out.function(Func::Cos, inner, span.clone());
            let two = out.literal(2.0, span.clone());
            let squared = out.binary(BinOp::Pow, cos, two, span.clone());
            out.binary(BinOp::Div, du, squared, span)
        },
        // u' / sqrt(1 - u^2), negated for acos
        Func::Asin | Func::Acos => {
            let inner = u(out);
            let two = out.literal(2.0, span.clone());
            let squared = out.binary(BinOp::Pow, inner, two, span.clone());
            let one = out.literal(1.0, span.clone());
            let difference = out.binary(BinOp::Sub, one, squared, span.clone());
            let root = out.function(Func::Sqrt, difference, span.clone());
            let quotient = out.binary(BinOp::Div, du, root, span.clone());
            match func {
                Func::Asin => quotient,
                _ => out.unary(UnaryOp::Neg, quotient, span),
            }
        },
        // u' / (1 + u^2)
        Func::Atan => {
            let inner = u(out);
            let two = out.literal(2.0, span.clone());
            let squared = out.binary(BinOp::Pow, inner, two, span.clone());
            let one = out.literal(1.0, span.clone());
            let sum = out.binary(BinOp::Add, one, squared, span.clone());
            out.binary(BinOp::Div, du, sum, span)
        },
        // u' / u
        Func::Ln => {
            let inner = u(out);
            out.binary(BinOp::Div, du, inner, span)
        },
        // u' / (u * ln(10))
        Func::Log => {
            let inner = u(out);
            let ten = out.literal(10.0, span.clone());
            let ln10 = out.function(Func::Ln, ten, span.clone());
            let scaled = out.binary(BinOp::Mul, inner, ln10, span.clone());
            out.binary(BinOp::Div, du, scaled, span)
        },
        // u' / (2 * sqrt(u))
        Func::Sqrt => {
            let inner = u(out);
            let root = out.function(Func::Sqrt, inner, span.clone());
            let two = out.literal(2.0, span.clone());
            let scaled = out.binary(BinOp::Mul, two, root, span.clone());
            out.binary(BinOp::Div, du, scaled, span)
        },
        // u' * u / abs(u), undefined at u = 0 like the function's own corner
        Func::Abs => {
            let inner = u(out);
            let product = out.binary(BinOp::Mul, du, inner, span.clone());
            let inner = u(out);
            let magnitude = out.function(Func::Abs, inner, span.clone());
            out.binary(BinOp::Div, product, magnitude, span)
        },
        Func::Conj => {
            return Err(Error::new(vec![span], kind::UnsupportedDerivative {
                name: Func::Conj.name().to_string(),
            }));
        },
    })
}
