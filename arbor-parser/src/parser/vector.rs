use std::ops::Range;
use crate::tokenizer::TokenKind;
use super::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseBracket, OpenBracket},
    Parse,
    Parser,
};

/// A bracketed vector literal, such as `[1, 2, 3]`.
///
/// A matrix literal `[a, b; c, d]` is sugar for a vector of row vectors: each `;`-separated row
/// becomes a nested [`Vector`]. Row separators are only recognized for the bracket pair being
/// parsed, so nested vector literals are never mistaken for rows of the outer literal. Promotion
/// of a vector-of-vectors to a matrix happens during evaluation, once all rows are known to have
/// equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    /// The elements of the vector.
    pub elements: Vec<Expr>,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Vector {
    /// Returns the span of the vector literal.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Vector {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_bracket = input.try_parse::<OpenBracket>()?;

        if let Ok(close_bracket) = input.clone().try_parse::<CloseBracket>() {
            return Err(Error::new_fatal(
                vec![open_bracket.span.start..close_bracket.span.end],
                kind::EmptyBrackets,
            ));
        }

        let mut rows: Vec<Vec<Expr>> = Vec::new();
        let mut current: Vec<Expr> = Vec::new();
        let close_bracket = loop {
            let element = input.try_parse::<Expr>().map_err(|mut err| {
                err.fatal = true;
                err
            })?;
            current.push(element);

            let token = input.next_token().map_err(|_| {
                Error::new_fatal(vec![open_bracket.span.clone()], kind::UnclosedBracket {
                    opening: true,
                })
            })?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::Semicolon => rows.push(std::mem::take(&mut current)),
                TokenKind::CloseBracket => break token,
                _ => return Err(Error::new_fatal(vec![token.span], kind::UnexpectedToken {
                    expected: &[TokenKind::Comma, TokenKind::Semicolon, TokenKind::CloseBracket],
                    found: token.kind,
                })),
            }
        };

        let span = open_bracket.span.start..close_bracket.span.end;
        if rows.is_empty() {
            Ok(Self { elements: current, span })
        } else {
            rows.push(current);
            let elements = rows.into_iter()
                .map(|row| {
                    // rows are never empty here; an empty row fails element parsing above
                    let row_span = row.first().unwrap().span().start..row.last().unwrap().span().end;
                    Expr::Vector(Vector { elements: row, span: row_span })
                })
                .collect();
            Ok(Self { elements, span })
        }
    }
}
