//! Evaluation of unary operators.

use std::ops::Range;
use crate::{
    error::{kind, Error},
    tree::UnaryOp,
    value::Value,
};

/// Evaluates a unary operator over a value.
///
/// Negation applies to every value elementwise. Transposition flips a matrix; transposing a
/// vector is the identity, since vectors carry no row or column orientation. Transposing a scalar
/// is an error.
pub fn eval_operand(op: UnaryOp, operand: Value, span: Range<usize>) -> Result<Value, Error> {
    match op {
        UnaryOp::Neg => Ok(negate(operand)),
        UnaryOp::Transpose => match operand {
            Value::Vector(v) => Ok(Value::Vector(v)),
            Value::Matrix(m) => Ok(Value::Matrix(m.transpose())),
            scalar => Err(Error::new(vec![span], kind::InvalidUnaryOperation {
                op,
                expr_type: scalar.typename(),
            })),
        },
    }
}

fn negate(value: Value) -> Value {
    match value {
        Value::Real(n) => Value::Real(-n),
        Value::Complex(c) => Value::Complex(-c),
        Value::Vector(v) => Value::Vector(v.into_iter().map(negate).collect()),
        Value::Matrix(m) => Value::Matrix(m.map(|c| -c)),
    }
}
