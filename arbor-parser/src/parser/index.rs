use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseBracket, OpenBracket},
    Parser,
};

/// A postfix index expression, such as `v[2]` or `m[1, 2]`.
///
/// One index selects an element of a vector (or a row of a matrix); two indices select a matrix
/// element.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// The expression being indexed.
    pub target: Box<Expr>,

    /// The indices, one or two of them.
    pub indices: Vec<Expr>,

    /// The region of the source code that this index expression was parsed from.
    pub span: Range<usize>,

    /// The span of the brackets that surround the indices.
    pub bracket_span: Range<usize>,
}

impl Index {
    /// Returns the span of the index expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the bracketed suffix of an index expression, attaching it to an already-parsed
    /// target.
    pub fn parse_suffix(input: &mut Parser, target: Expr) -> Result<Self, Error> {
        let open_bracket = input.try_parse::<OpenBracket>()?;
        let indices = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
        let close_bracket = input.try_parse::<CloseBracket>()
            .map_err(|_| Error::new_fatal(vec![open_bracket.span.clone()], kind::UnclosedBracket {
                opening: true,
            }))?;

        let bracket_span = open_bracket.span.start..close_bracket.span.end;
        if indices.is_empty() || indices.len() > 2 {
            return Err(Error::new_fatal(vec![bracket_span], kind::InvalidIndexArity {
                found: indices.len(),
            }));
        }

        Ok(Self {
            span: target.span().start..bracket_span.end,
            target: Box::new(target),
            indices,
            bracket_span,
        })
    }
}
