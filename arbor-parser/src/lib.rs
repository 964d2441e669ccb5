//! Tokenizer and parser for textual math expressions.
//!
//! The entry point is [`parser::Parser`], which turns a source string into a spanned abstract
//! syntax tree:
//!
//! ```
//! use arbor_parser::parser::{expr::Expr, Parser};
//!
//! let mut parser = Parser::new("2 + 3x^2");
//! let ast = parser.try_parse_full::<Expr>().unwrap();
//! ```

pub mod parser;
pub mod tokenizer;
