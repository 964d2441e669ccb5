pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a typed struct per token kind, each carrying its lexeme and span, with a [`Parse`]
/// implementation that accepts exactly that kind. Productions then request tokens by type
/// (`input.try_parse::<CloseParen>()`) instead of comparing kinds by hand.
macro_rules! token_kinds {
    ($($name:ident)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name {
                pub(crate) lexeme: String,
                pub(crate) span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    if token.kind != TokenKind::$name {
                        return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }));
                    }

                    Ok(Self {
                        lexeme: token.lexeme.to_owned(),
                        span: token.span,
                    })
                }
            }
        )*
    };
}

token_kinds!(
    Add
    Sub
    Mul
    Div
    Exp
    Quote
    Name
    Comma
    Semicolon
    OpenParen
    CloseParen
    OpenBracket
    CloseBracket
    Int
    Float
);
