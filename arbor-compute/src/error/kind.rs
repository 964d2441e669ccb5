use ariadne::Fmt;
use arbor_attrs::ErrorKind;
use arbor_error::{ErrorKind, EXPR};
use crate::{shape::Shape, tree::{BinOp, UnaryOp}};

/// The given binary operation cannot be applied to the given operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot apply the `{:?}` operator to these operands", op),
    labels = [
        format!("this operand has type `{}`", left),
        format!("this operand has type `{}`", right),
    ],
)]
pub struct InvalidBinaryOperation {
    /// The operator that was used.
    pub op: BinOp,

    /// The type the left side evaluated to.
    pub left: &'static str,

    /// The type the right side evaluated to.
    pub right: &'static str,
}

/// The given unary operation cannot be applied to the given operand.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot apply the `{:?}` operator to this operand", op),
    labels = [format!("this operand has type `{}`", expr_type)],
)]
pub struct InvalidUnaryOperation {
    /// The operator that was used.
    pub op: UnaryOp,

    /// The type the operand evaluated to.
    pub expr_type: &'static str,
}

/// The operand dimensions are incompatible for the given operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("operand shapes are incompatible for the `{:?}` operator", op),
    labels = [
        format!("this operand has shape `{}`", left),
        format!("this operand has shape `{}`", right),
    ],
)]
pub struct ShapeMismatch {
    /// The operator that was used.
    pub op: BinOp,

    /// The shape of the left operand.
    pub left: Shape,

    /// The shape of the right operand.
    pub right: Shape,
}

/// The variable is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    labels = ["this variable"],
    help = format!("bind it before evaluating, with `{}`", format!("add_var(\"{}\", ...)", name).fg(EXPR)),
)]
pub struct UndefinedVariable {
    /// The name of the variable that was undefined.
    pub name: String,
}

/// The function is undefined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "see the documentation for a list of available functions".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was undefined.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// Too many arguments were given to a function call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments were given to the `{}` function", name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    ),
)]
pub struct TooManyArguments {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// An argument to a function call is missing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for the `{}` function", name),
    labels = ["this function call"],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given
    ),
)]
pub struct MissingArgument {
    /// The name of the function that was called.
    pub name: String,

    /// The number of arguments that were expected.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

/// An argument to a function call has the wrong type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("incorrect type for the argument to the `{}` function", name),
    labels = [format!("this argument has type `{}`", given)],
    help = format!("should be of type `{}`", expected),
)]
pub struct TypeMismatch {
    /// The name of the function that was called.
    pub name: String,

    /// The type of the argument that was expected.
    pub expected: &'static str,

    /// The type of the argument that was given.
    pub given: &'static str,
}

/// No differentiation rule is registered for an operator or function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no derivative rule is registered for `{}`", name),
    labels = ["while differentiating this expression"],
)]
pub struct UnsupportedDerivative {
    /// The operator or function that has no rule.
    pub name: String,
}

/// Cannot index into a value that is not a vector or matrix.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot index into this type",
    labels = [format!("this expression evaluated to `{}`", expr_type)],
    help = "only vectors and matrices can be indexed into",
)]
pub struct InvalidIndexTarget {
    /// The type of the expression that was used as the target.
    pub expr_type: &'static str,
}

/// The index must be an integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "index must be a non-negative integer",
    labels = [format!("this expression evaluated to `{}`", expr_type)],
)]
pub struct InvalidIndexType {
    /// The type of the expression that was used as an index.
    pub expr_type: &'static str,
}

/// The index is out of bounds.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "index is out of bounds",
    labels = [format!("out of bounds (index: {})", index)],
    help = match len {
        0 => "the value is empty, so all indexing operations will fail".to_string(),
        1 => "the value has length `1`, so the index must be `0`".to_string(),
        n => format!("the value has length `{}`, so the index must be between `0-{}` (inclusive)", n, n - 1),
    },
)]
pub struct IndexOutOfBounds {
    /// The length of the dimension that was indexed into.
    pub len: usize,

    /// The index that was attempted to be accessed.
    pub index: usize,
}

/// The matrix has no inverse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "this matrix is singular",
    labels = ["this matrix has no inverse"],
)]
pub struct SingularMatrix;
