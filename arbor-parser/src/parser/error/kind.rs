use ariadne::Fmt;
use arbor_attrs::ErrorKind;
use arbor_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// A square bracket was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed bracket",
    labels = ["this bracket is not closed"],
    help = if *opening {
        "add a closing bracket `]` somewhere after this"
    } else {
        "add an opening bracket `[` somewhere before this"
    },
)]
pub struct UnclosedBracket {
    /// Whether the bracket was an opening bracket `[`. Otherwise, the bracket was a closing
    /// bracket `]`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// There was no element inside a pair of brackets.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing elements inside brackets",
    labels = ["add at least one element here"],
    help = format!("a vector literal looks like {}, a matrix literal like {}", "[1, 2, 3]".fg(EXPR), "[1, 2; 3, 4]".fg(EXPR)),
)]
pub struct EmptyBrackets;

/// The index operator was applied with no index, or with more than two indices.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected one or two indices, found {}", found),
    labels = ["in this index expression"],
    help = format!("index a vector like {}, a matrix like {}", "v[1]".fg(EXPR), "m[1, 2]".fg(EXPR)),
)]
pub struct InvalidIndexArity {
    /// The number of indices that were given.
    pub found: usize,
}
