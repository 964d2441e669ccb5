use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        error::{kind, Error},
        expr::{Expr, Primary},
        index::Index,
        token::op::{UnaryOp},
        Associativity,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};

/// Attempt to parse a unary operator with the correct associativity. Returns a non-fatal error if
/// the operator is not of the correct associativity.
fn try_parse_unary_op(input: &mut Parser, associativity: Associativity) -> Result<UnaryOp, Error> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == associativity {
            Ok(())
        } else {
            Err(input.error(kind::NonFatal))
        }
    })
}

/// A unary expression, such as `-x` or `m'`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression (left or right of the operator, depending on the
    /// associativity).
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a prefix unary expression (`-x`, `+x`).
    ///
    /// The operand binds tighter than multiplication but looser than exponentiation, so `-x^2`
    /// parses as `-(x^2)` while `-x*y` parses as `(-x)*y`.
    pub fn parse_prefix(input: &mut Parser) -> Result<Self, Error> {
        let op = try_parse_unary_op(input, Associativity::Right)?;
        let op_precedence = op.precedence();
        let start_span = op.span.start;
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op_precedence)?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parses a primary expression followed by any number of postfix operations: transpose
    /// (`m'`) and indexing (`v[2]`, `m[1, 2]`).
    pub fn parse_postfix(input: &mut Parser) -> Result<Expr, Error> {
        let mut expr: Expr = input.try_parse::<Primary>()?.into();

        loop {
            if let Ok(op) = try_parse_unary_op(input, Associativity::Left) {
                let span = expr.span().start..op.span.end;
                expr = Expr::Unary(Unary {
                    operand: Box::new(expr),
                    op,
                    span,
                });
            } else if input.peek_kind() == Some(TokenKind::OpenBracket) {
                expr = Expr::Index(Index::parse_suffix(input, expr)?);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let _ = try_parse_catch_fatal!(
            input.try_parse_with_fn(|input| Self::parse_prefix(input).map(Expr::Unary))
        );
        Self::parse_postfix(input)
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match Self::parse_or_lower(input)? {
            Expr::Unary(unary) => Ok(unary),
            _ => Err(input.error(kind::NonFatal)),
        }
    }
}
