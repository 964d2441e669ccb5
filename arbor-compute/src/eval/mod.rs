//! Evaluation of expression trees.
//!
//! [`evaluate`] walks a tree bottom-up and computes its [`Value`] against a context. [`shape_of`]
//! is the parallel value-free walk: it computes only the [`Shape`] the tree would evaluate to, so
//! dimension errors can be caught without knowing what any variable holds. Both walks report a
//! dimension mismatch with the same error kind.

pub mod binary;
pub mod unary;

use crate::{
    ctxt::Ctxt,
    error::{kind, Error},
    shape::Shape,
    tree::{BinOp, Node, NodeId, Payload, Tree, UnaryOp},
    value::Value,
};

/// Evaluates the tree against the given context.
pub fn evaluate(tree: &Tree, ctxt: &Ctxt) -> Result<Value, Error> {
    eval_node(tree, tree.root(), ctxt)
}

/// Computes the shape the tree would evaluate to, without evaluating it.
///
/// Names that are bound in the context contribute the shape of their value; unbound names are
/// assumed to be scalars, which keeps the walk total over trees that are not yet fully bound.
pub fn shape_of(tree: &Tree, ctxt: &Ctxt) -> Result<Shape, Error> {
    shape_node(tree, tree.root(), ctxt)
}

/// Returns both children of a binary node. Lowering always attaches both operands, and rewrites
/// preserve that.
fn operands(node: &Node) -> (NodeId, NodeId) {
    match (node.left, node.right) {
        (Some(left), Some(right)) => (left, right),
        _ => unreachable!("binary node without two operands"),
    }
}

fn eval_node(tree: &Tree, id: NodeId, ctxt: &Ctxt) -> Result<Value, Error> {
    let node = tree.node(id);
    match &node.payload {
        Payload::Literal(value) => Ok(value.clone()),
        Payload::Constant(name) => {
            ctxt.get_const(name)
                .ok_or_else(|| Error::new(vec![node.span.clone()], kind::UndefinedVariable {
                    name: name.clone(),
                }))
        },
        Payload::Variable(name) => {
            if node.left.is_some() {
                // the variable is applied to arguments, but nothing in the context is callable
                return Err(Error::new(vec![node.span.clone()], kind::UndefinedFunction {
                    name: name.clone(),
                    suggestions: ctxt.get_similar_funcs(name),
                }));
            }
            ctxt.get_var(name)
                .ok_or_else(|| Error::new(vec![node.span.clone()], kind::UndefinedVariable {
                    name: name.clone(),
                }))
        },
        Payload::Binary(BinOp::Index) => {
            let (target, index_head) = operands(node);
            let target_value = eval_node(tree, target, ctxt)?;
            let indices = tree.arg_chain(index_head)
                .into_iter()
                .map(|idx| Ok((eval_node(tree, idx, ctxt)?, tree.node(idx).span.clone())))
                .collect::<Result<Vec<_>, Error>>()?;
            binary::eval_index(target_value, indices, tree.node(target).span.clone())
        },
        Payload::Binary(op) => {
            let (left, right) = operands(node);
            let left_value = eval_node(tree, left, ctxt)?;
            let right_value = eval_node(tree, right, ctxt)?;
            binary::eval_operands(
                *op,
                left_value,
                right_value,
                tree.node(left).span.clone(),
                tree.node(right).span.clone(),
            )
        },
        Payload::Unary(op) => {
            let operand = match node.left {
                Some(operand) => eval_node(tree, operand, ctxt)?,
                None => unreachable!("unary node without an operand"),
            };
            unary::eval_operand(*op, operand, node.span.clone())
        },
        Payload::Function(func) => {
            let name = func.name().to_string();
            let Some(head) = node.left else {
                return Err(Error::new(vec![node.span.clone()], kind::MissingArgument {
                    name,
                    expected: 1,
                    given: 0,
                }));
            };

            let args = tree.arg_chain(head);
            if args.len() > 1 {
                return Err(Error::new(vec![node.span.clone()], kind::TooManyArguments {
                    name,
                    expected: 1,
                    given: args.len(),
                }));
            }

            let operand = eval_node(tree, args[0], ctxt)?;
            let scalar = operand.as_complex()
                .ok_or_else(|| Error::new(vec![tree.node(args[0]).span.clone()], kind::TypeMismatch {
                    name,
                    expected: "Real or Complex",
                    given: operand.typename(),
                }))?;
            Ok(func.eval(scalar))
        },
        Payload::Vector => {
            let elements = match node.left {
                Some(head) => {
                    tree.arg_chain(head)
                        .into_iter()
                        .map(|element| eval_node(tree, element, ctxt))
                        .collect::<Result<Vec<_>, _>>()?
                },
                None => Vec::new(),
            };
            Ok(Value::vector(elements))
        },
        Payload::Arg => match node.left {
            Some(element) => eval_node(tree, element, ctxt),
            None => Ok(Value::Real(f64::NAN)),
        },
    }
}

/// Names the values a shape could belong to, for error messages from the value-free walk.
fn shape_typename(shape: &Shape) -> &'static str {
    if shape.is_vector() {
        "Vector"
    } else if shape.is_matrix() {
        "Matrix"
    } else {
        "Real or Complex"
    }
}

fn shape_node(tree: &Tree, id: NodeId, ctxt: &Ctxt) -> Result<Shape, Error> {
    let node = tree.node(id);
    match &node.payload {
        Payload::Literal(value) => Ok(value.shape()),
        Payload::Constant(name) => {
            Ok(ctxt.get_const(name).map(|v| v.shape()).unwrap_or_else(Shape::scalar))
        },
        Payload::Variable(name) => {
            if node.left.is_some() {
                // a function-valued variable; assume it would produce a scalar
                return Ok(Shape::scalar());
            }
            Ok(ctxt.get_var(name).map(|v| v.shape()).unwrap_or_else(Shape::scalar))
        },
        Payload::Binary(BinOp::Index) => {
            let (target, index_head) = operands(node);
            let target_shape = shape_node(tree, target, ctxt)?;
            let indices = tree.arg_chain(index_head);
            for &index in &indices {
                let shape = shape_node(tree, index, ctxt)?;
                if !shape.is_scalar() {
                    return Err(Error::new(vec![tree.node(index).span.clone()], kind::InvalidIndexType {
                        expr_type: shape_typename(&shape),
                    }));
                }
            }

            match (target_shape.dims(), indices.len()) {
                // a scalar-shaped target may be an unbound name assumed scalar; the real
                // target type is only known at evaluation
                ([], _) => Ok(Shape::scalar()),
                ([_], 1) => Ok(Shape::scalar()),
                ([_, cols], 1) => Ok(Shape::vector(*cols)),
                ([_, _], 2) => Ok(Shape::scalar()),
                _ => Err(Error::new(vec![tree.node(target).span.clone()], kind::InvalidIndexTarget {
                    expr_type: shape_typename(&target_shape),
                })),
            }
        },
        Payload::Binary(op) => {
            let (left, right) = operands(node);
            let left_shape = shape_node(tree, left, ctxt)?;
            let right_shape = shape_node(tree, right, ctxt)?;
            shape_operands(
                *op,
                left_shape,
                right_shape,
                tree.node(left).span.clone(),
                tree.node(right).span.clone(),
            )
        },
        Payload::Unary(op) => {
            let operand = match node.left {
                Some(operand) => shape_node(tree, operand, ctxt)?,
                None => unreachable!("unary node without an operand"),
            };
            match op {
                UnaryOp::Neg => Ok(operand),
                UnaryOp::Transpose => {
                    if operand.is_scalar() {
                        Err(Error::new(vec![node.span.clone()], kind::InvalidUnaryOperation {
                            op: *op,
                            expr_type: shape_typename(&operand),
                        }))
                    } else {
                        Ok(operand.transposed())
                    }
                },
            }
        },
        Payload::Function(func) => {
            let name = func.name().to_string();
            let Some(head) = node.left else {
                return Err(Error::new(vec![node.span.clone()], kind::MissingArgument {
                    name,
                    expected: 1,
                    given: 0,
                }));
            };

            let args = tree.arg_chain(head);
            if args.len() > 1 {
                return Err(Error::new(vec![node.span.clone()], kind::TooManyArguments {
                    name,
                    expected: 1,
                    given: args.len(),
                }));
            }

            let operand = shape_node(tree, args[0], ctxt)?;
            if !operand.is_scalar() {
                return Err(Error::new(vec![tree.node(args[0]).span.clone()], kind::TypeMismatch {
                    name,
                    expected: "Real or Complex",
                    given: shape_typename(&operand),
                }));
            }
            Ok(Shape::scalar())
        },
        Payload::Vector => {
            let elements = match node.left {
                Some(head) => tree.arg_chain(head),
                None => Vec::new(),
            };
            let shapes = elements.iter()
                .map(|&element| shape_node(tree, element, ctxt))
                .collect::<Result<Vec<_>, _>>()?;

            // rows of equal length make a matrix, anything else is a plain vector
            if let Some(first) = shapes.first() {
                if first.is_vector() && shapes.iter().all(|s| s == first) {
                    return Ok(Shape::matrix(shapes.len(), first.dims()[0]));
                }
            }
            Ok(Shape::vector(shapes.len()))
        },
        Payload::Arg => match node.left {
            Some(element) => shape_node(tree, element, ctxt),
            None => Ok(Shape::scalar()),
        },
    }
}

/// Computes the shape a binary operator produces from its operand shapes, raising the same
/// [`kind::ShapeMismatch`] that evaluation would.
fn shape_operands(
    op: BinOp,
    left: Shape,
    right: Shape,
    left_span: std::ops::Range<usize>,
    right_span: std::ops::Range<usize>,
) -> Result<Shape, Error> {
    let mismatch = |left: &Shape, right: &Shape| {
        Error::new(vec![left_span.clone(), right_span.clone()], kind::ShapeMismatch {
            op,
            left: left.clone(),
            right: right.clone(),
        })
    };
    let invalid = |left: &Shape, right: &Shape| {
        Error::new(vec![left_span.clone(), right_span.clone()], kind::InvalidBinaryOperation {
            op,
            left: shape_typename(left),
            right: shape_typename(right),
        })
    };

    match op {
        BinOp::Add | BinOp::Sub => {
            if left == right || right.is_scalar() {
                Ok(left)
            } else if left.is_scalar() {
                Ok(right)
            } else {
                Err(mismatch(&left, &right))
            }
        },
        BinOp::Mul => {
            if left.is_scalar() {
                Ok(right)
            } else if right.is_scalar() {
                Ok(left)
            } else if left.is_matrix() && right.is_matrix() {
                if left.dims()[1] == right.dims()[0] {
                    Ok(Shape::matrix(left.dims()[0], right.dims()[1]))
                } else {
                    Err(mismatch(&left, &right))
                }
            } else if left.is_matrix() && right.is_vector() {
                if left.dims()[1] == right.dims()[0] {
                    Ok(Shape::vector(left.dims()[0]))
                } else {
                    Err(mismatch(&left, &right))
                }
            } else {
                Err(invalid(&left, &right))
            }
        },
        BinOp::Div => {
            if right.is_scalar() {
                Ok(left)
            } else {
                Err(invalid(&left, &right))
            }
        },
        BinOp::Pow => {
            if left.is_scalar() && right.is_scalar() {
                Ok(Shape::scalar())
            } else if left.is_matrix() && right.is_scalar() {
                if left.dims()[0] == left.dims()[1] {
                    Ok(left)
                } else {
                    Err(mismatch(&left, &right))
                }
            } else {
                Err(invalid(&left, &right))
            }
        },
        // indexing is routed separately, since its indices are not ordinary operands
        BinOp::Index => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval(source: &str, ctxt: &Ctxt) -> Result<Value, Error> {
        evaluate(&Tree::parse(source, ctxt).unwrap(), ctxt)
    }

    #[test]
    fn arithmetic() {
        let ctxt = Ctxt::default();
        assert_eq!(eval("2 + 3 * 4", &ctxt).unwrap(), Value::Real(14.0));
        assert_eq!(eval("2^3^2", &ctxt).unwrap(), Value::Real(512.0));
        assert_eq!(eval("(1 + 2) / 4", &ctxt).unwrap(), Value::Real(0.75));
    }

    #[test]
    fn division_by_zero_is_nan() {
        let ctxt = Ctxt::default();
        let Value::Real(n) = eval("1 / 0", &ctxt).unwrap() else {
            panic!("1 / 0 evaluates to a real");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn constants() {
        let ctxt = Ctxt::default();
        let Value::Real(n) = eval("tau / pi", &ctxt).unwrap() else {
            panic!("tau / pi evaluates to a real");
        };
        assert_float_absolute_eq!(n, 2.0, 1e-12);

        assert_eq!(eval("i * i", &ctxt).unwrap(), Value::Real(-1.0));
    }

    #[test]
    fn negative_base_escapes_to_complex() {
        let ctxt = Ctxt::default();
        let Value::Complex(c) = eval("(-4)^0.5", &ctxt).unwrap() else {
            panic!("(-4)^0.5 evaluates to a complex number");
        };
        assert_float_absolute_eq!(c.re, 0.0, 1e-12);
        assert_float_absolute_eq!(c.im, 2.0, 1e-12);
    }

    #[test]
    fn vector_arithmetic() {
        let ctxt = Ctxt::default();
        assert_eq!(
            eval("[1, 2] + [3, 4]", &ctxt).unwrap(),
            Value::Vector(vec![Value::Real(4.0), Value::Real(6.0)]),
        );
        assert_eq!(
            eval("3 * [1, 2]", &ctxt).unwrap(),
            Value::Vector(vec![Value::Real(3.0), Value::Real(6.0)]),
        );
    }

    #[test]
    fn vector_length_mismatch() {
        let ctxt = Ctxt::default();
        let err = eval("[1, 2] + [1, 2, 3]", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::ShapeMismatch {
            op: BinOp::Add,
            left: Shape::vector(2),
            right: Shape::vector(3),
        }));
    }

    #[test]
    fn shape_walk_agrees_with_evaluation_on_mismatches() {
        let ctxt = Ctxt::default();
        let tree = Tree::parse("[1, 2] + [1, 2, 3]", &ctxt).unwrap();

        let from_eval = evaluate(&tree, &ctxt).unwrap_err();
        let from_shape = shape_of(&tree, &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", from_eval.kind), format!("{:?}", from_shape.kind));
        assert_eq!(from_eval.spans, from_shape.spans);
    }

    #[test]
    fn shape_walk_without_bindings() {
        let ctxt = Ctxt::default();
        let tree = Tree::parse("x + [1, 2]", &ctxt).unwrap();
        // unbound names are assumed scalar, and scalars broadcast over vectors
        assert_eq!(shape_of(&tree, &ctxt).unwrap(), Shape::vector(2));

        let tree = Tree::parse("[1, 2; 3, 4] * [5, 6]", &ctxt).unwrap();
        assert_eq!(shape_of(&tree, &ctxt).unwrap(), Shape::vector(2));

        // indexing an unbound name is deferred to evaluation rather than rejected
        let tree = Tree::parse("v[0] + 1", &ctxt).unwrap();
        assert_eq!(shape_of(&tree, &ctxt).unwrap(), Shape::scalar());
    }

    #[test]
    fn matrix_inverse_through_pow() {
        let ctxt = Ctxt::default();
        let value = eval("[4, 7; 2, 6] * [4, 7; 2, 6]^(-1)", &ctxt).unwrap();
        let Value::Matrix(m) = value else {
            panic!("matrix product evaluates to a matrix");
        };
        for row in 0..2 {
            for col in 0..2 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_float_absolute_eq!(m.get(row, col).re, expected, 1e-12);
            }
        }
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let ctxt = Ctxt::default();
        let err = eval("[1, 2; 2, 4]^(-1)", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::SingularMatrix));
    }

    #[test]
    fn transpose() {
        let ctxt = Ctxt::default();
        assert_eq!(
            eval("[1, 2; 3, 4]'", &ctxt).unwrap(),
            eval("[1, 3; 2, 4]", &ctxt).unwrap(),
        );
        let err = eval("3'", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::InvalidUnaryOperation {
            op: UnaryOp::Transpose,
            expr_type: "Real",
        }));
    }

    #[test]
    fn indexing() {
        let ctxt = Ctxt::default();
        assert_eq!(eval("[10, 20, 30][1]", &ctxt).unwrap(), Value::Real(20.0));
        assert_eq!(eval("[1, 2; 3, 4][1, 0]", &ctxt).unwrap(), Value::Real(3.0));
        assert_eq!(
            eval("[1, 2; 3, 4][0]", &ctxt).unwrap(),
            Value::Vector(vec![Value::Real(1.0), Value::Real(2.0)]),
        );

        let err = eval("[10, 20][5]", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::IndexOutOfBounds {
            len: 2,
            index: 5,
        }));
    }

    #[test]
    fn undefined_names() {
        let ctxt = Ctxt::default();
        let err = eval("x + 1", &ctxt).unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::UndefinedVariable {
            name: "x".to_string(),
        }));
    }

    #[test]
    fn misspelled_function_suggests_the_real_one() {
        let ctxt = Ctxt::default();
        let err = eval("sqr(4)", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::UndefinedFunction {
            name: "sqr".to_string(),
            suggestions: vec!["sqrt".to_string()],
        }));
    }

    #[test]
    fn function_arity() {
        let ctxt = Ctxt::default();
        let err = eval("sin(1, 2)", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::TooManyArguments {
            name: "sin".to_string(),
            expected: 1,
            given: 2,
        }));

        let err = eval("sin()", &ctxt).unwrap_err();
        assert_eq!(format!("{:?}", err.kind), format!("{:?}", kind::MissingArgument {
            name: "sin".to_string(),
            expected: 1,
            given: 0,
        }));
    }

    #[test]
    fn bound_variables() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("x", Value::Real(3.0));
        assert_eq!(eval("x^2 + 1", &ctxt).unwrap(), Value::Real(10.0));
    }
}
