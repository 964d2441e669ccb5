//! Errors produced while evaluating or transforming an expression tree.

pub mod kind;

pub use arbor_error::Error;
