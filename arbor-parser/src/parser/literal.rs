use std::ops::Range;
use super::{
    error::Error,
    token::{Float, Int, Name},
    Parse,
    Parser,
};

/// A number literal. Integers and floating-point numbers (including an exponent suffix, like
/// `1.5E3`) are both supported and represented here as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitNum {
    /// The value of the number literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let (lexeme, span) = match input.try_parse::<Float>() {
            Ok(float) => (float.lexeme, float.span),
            Err(_) => {
                let int = input.try_parse::<Int>()?;
                (int.lexeme, int.span)
            },
        };

        Ok(Self {
            // the tokenizer only accepts digit/exponent shapes `f64` can parse
            value: lexeme.parse().unwrap(),
            span,
        })
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables, constants, and
/// functions.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// Represents a literal value: a number, or a name that is resolved later against the evaluation
/// context.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.try_parse::<LitNum>() {
            Ok(num) => Ok(Literal::Number(num)),
            Err(_) => input.try_parse::<LitSym>().map(Literal::Symbol),
        }
    }
}
