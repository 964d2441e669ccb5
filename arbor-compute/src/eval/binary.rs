//! Evaluation of binary operators over every pair of operand types.

use num_complex::Complex64;
use std::ops::Range;
use crate::{
    error::{kind, Error},
    matrix::Matrix,
    tree::BinOp,
    value::{demote, Value},
};

/// Evaluates a binary operator over two values.
///
/// Scalars mix freely: operands are promoted to complex numbers, and results with a zero
/// imaginary part are demoted back to reals. Division by a scalar zero produces NaN rather than
/// an error. Addition, subtraction, and multiplication broadcast a scalar operand over a vector
/// or matrix; dimension mismatches report [`kind::ShapeMismatch`], and operand type combinations
/// with no meaning report [`kind::InvalidBinaryOperation`].
pub fn eval_operands(
    op: BinOp,
    left: Value,
    right: Value,
    left_span: Range<usize>,
    right_span: Range<usize>,
) -> Result<Value, Error> {
    if op == BinOp::Index {
        return eval_index(left, vec![(right, right_span)], left_span);
    }

    if let (Some(l), Some(r)) = (left.as_complex(), right.as_complex()) {
        return Ok(eval_scalars(op, l, r));
    }

    let spans = vec![left_span.clone(), right_span.clone()];
    let shape_mismatch = |left: &Value, right: &Value| {
        Error::new(spans.clone(), kind::ShapeMismatch {
            op,
            left: left.shape(),
            right: right.shape(),
        })
    };
    let invalid = |left: &Value, right: &Value| {
        Error::new(spans.clone(), kind::InvalidBinaryOperation {
            op,
            left: left.typename(),
            right: right.typename(),
        })
    };

    match (op, left, right) {
        // elementwise over equal-length vectors
        (BinOp::Add | BinOp::Sub, Value::Vector(a), Value::Vector(b)) => {
            if a.len() != b.len() {
                return Err(shape_mismatch(&Value::Vector(a), &Value::Vector(b)));
            }
            let elements = a.into_iter()
                .zip(b)
                .map(|(x, y)| eval_operands(op, x, y, left_span.clone(), right_span.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Vector(elements))
        },
        (BinOp::Add | BinOp::Sub, Value::Matrix(a), Value::Matrix(b)) => {
            if a.rows() != b.rows() || a.cols() != b.cols() {
                return Err(shape_mismatch(&Value::Matrix(a), &Value::Matrix(b)));
            }
            Ok(match op {
                BinOp::Add => Value::Matrix(a.zip(&b, |x, y| x + y)),
                _ => Value::Matrix(a.zip(&b, |x, y| x - y)),
            })
        },
        (BinOp::Add | BinOp::Sub, left @ (Value::Vector(_) | Value::Matrix(_)), right @ (Value::Vector(_) | Value::Matrix(_))) => {
            Err(shape_mismatch(&left, &right))
        },

        // a scalar operand broadcasts over the other operand's elements
        (BinOp::Add | BinOp::Sub | BinOp::Mul, Value::Vector(a), scalar) if scalar.is_scalar() => {
            let elements = a.into_iter()
                .map(|x| eval_operands(op, x, scalar.clone(), left_span.clone(), right_span.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Vector(elements))
        },
        (BinOp::Add | BinOp::Sub | BinOp::Mul, scalar, Value::Vector(b)) if scalar.is_scalar() => {
            let elements = b.into_iter()
                .map(|x| eval_operands(op, scalar.clone(), x, left_span.clone(), right_span.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Vector(elements))
        },
        (BinOp::Add | BinOp::Sub | BinOp::Mul, Value::Matrix(m), scalar) if scalar.is_scalar() => {
            // scalar operands always convert
            let s = scalar.as_complex().unwrap_or_default();
            Ok(Value::Matrix(m.map(|x| match op {
                BinOp::Add => x + s,
                BinOp::Sub => x - s,
                _ => x * s,
            })))
        },
        (BinOp::Add | BinOp::Sub | BinOp::Mul, scalar, Value::Matrix(m)) if scalar.is_scalar() => {
            let s = scalar.as_complex().unwrap_or_default();
            Ok(Value::Matrix(m.map(|x| match op {
                BinOp::Add => s + x,
                BinOp::Sub => s - x,
                _ => s * x,
            })))
        },

        (BinOp::Mul, Value::Matrix(a), Value::Matrix(b)) => {
            if a.cols() != b.rows() {
                return Err(shape_mismatch(&Value::Matrix(a), &Value::Matrix(b)));
            }
            Ok(Value::Matrix(a.mul_matrix(&b)))
        },
        (BinOp::Mul, Value::Matrix(m), Value::Vector(v)) => {
            let column = v.iter()
                .map(Value::as_complex)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid(&Value::Matrix(m.clone()), &Value::Vector(v.clone())))?;
            if m.cols() != column.len() {
                return Err(shape_mismatch(&Value::Matrix(m), &Value::Vector(v)));
            }
            Ok(Value::Vector(m.mul_vector(&column).into_iter().map(demote).collect()))
        },

        // dividing a vector or matrix by a scalar divides every element
        (BinOp::Div, Value::Vector(a), scalar) if scalar.is_scalar() => {
            let elements = a.into_iter()
                .map(|x| eval_operands(op, x, scalar.clone(), left_span.clone(), right_span.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Vector(elements))
        },
        (BinOp::Div, Value::Matrix(m), scalar) if scalar.is_scalar() => {
            let s = scalar.as_complex().unwrap_or_default();
            if s.norm() == 0.0 {
                return Ok(Value::Matrix(m.map(|_| Complex64::new(f64::NAN, 0.0))));
            }
            Ok(Value::Matrix(m.map(|x| x / s)))
        },

        (BinOp::Pow, Value::Matrix(m), exponent) if exponent.is_scalar() => {
            eval_matrix_pow(m, &exponent, left_span, right_span)
        },

        (_, left, right) => Err(invalid(&left, &right)),
    }
}

/// Evaluates a binary operator over two scalar operands.
fn eval_scalars(op: BinOp, l: Complex64, r: Complex64) -> Value {
    match op {
        BinOp::Add => demote(l + r),
        BinOp::Sub => demote(l - r),
        BinOp::Mul => demote(l * r),
        BinOp::Div => {
            if r.norm() == 0.0 {
                Value::Real(f64::NAN)
            } else {
                demote(l / r)
            }
        },
        BinOp::Pow => {
            if l.im == 0.0 && r.im == 0.0 {
                // a negative real base with a fractional exponent has no real result, so it
                // escapes to the complex plane like `sqrt(-4)` does
                if l.re < 0.0 && r.re.fract() != 0.0 {
                    demote(l.powc(r))
                } else {
                    Value::Real(l.re.powf(r.re))
                }
            } else {
                demote(l.powc(r))
            }
        },
        // indexing is routed to `eval_index` before scalars are extracted
        BinOp::Index => unreachable!(),
    }
}

/// Raises a matrix to a scalar power. The exponent must be an integer and the matrix must be
/// square; a negative exponent inverts the matrix first.
fn eval_matrix_pow(
    m: Matrix,
    exponent: &Value,
    left_span: Range<usize>,
    right_span: Range<usize>,
) -> Result<Value, Error> {
    let n = exponent.as_real()
        .filter(|n| n.fract() == 0.0)
        .ok_or_else(|| Error::new(vec![left_span.clone(), right_span.clone()], kind::InvalidBinaryOperation {
            op: BinOp::Pow,
            left: "Matrix",
            right: exponent.typename(),
        }))?;

    if m.rows() != m.cols() {
        return Err(Error::new(vec![left_span.clone(), right_span], kind::ShapeMismatch {
            op: BinOp::Pow,
            left: crate::shape::Shape::matrix(m.rows(), m.cols()),
            right: exponent.shape(),
        }));
    }

    let base = if n < 0.0 {
        m.inverse()
            .ok_or_else(|| Error::new(vec![left_span], kind::SingularMatrix))?
    } else {
        m
    };

    let mut result = Matrix::identity(base.rows());
    for _ in 0..n.abs() as u64 {
        result = result.mul_matrix(&base);
    }
    Ok(Value::Matrix(result))
}

/// Indexes into a vector or matrix with one or two already-evaluated indices.
pub fn eval_index(
    target: Value,
    indices: Vec<(Value, Range<usize>)>,
    target_span: Range<usize>,
) -> Result<Value, Error> {
    match target {
        Value::Vector(elements) => {
            if indices.len() > 1 {
                return Err(Error::new(vec![target_span], kind::InvalidIndexTarget {
                    expr_type: "Vector",
                }));
            }
            let i = checked_index(&indices[0], elements.len())?;
            Ok(elements[i].clone())
        },
        Value::Matrix(m) => {
            let row = checked_index(&indices[0], m.rows())?;
            match indices.get(1) {
                Some(index) => {
                    let col = checked_index(index, m.cols())?;
                    Ok(demote(m.get(row, col)))
                },
                // a single index selects a whole row
                None => Ok(Value::Vector(m.row(row).iter().copied().map(demote).collect())),
            }
        },
        scalar => Err(Error::new(vec![target_span], kind::InvalidIndexTarget {
            expr_type: scalar.typename(),
        })),
    }
}

/// Checks that an index value is a non-negative integer within bounds, returning it as a `usize`.
fn checked_index((value, span): &(Value, Range<usize>), len: usize) -> Result<usize, Error> {
    let index = value.as_real()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .ok_or_else(|| Error::new(vec![span.clone()], kind::InvalidIndexType {
            expr_type: value.typename(),
        }))?;

    let index = index as usize;
    if index >= len {
        return Err(Error::new(vec![span.clone()], kind::IndexOutOfBounds { len, index }));
    }
    Ok(index)
}
