//! The expression engine: evaluation, differentiation, and simplification of parsed math
//! expressions.
//!
//! Expressions are represented as an arena-backed binary [`Tree`](tree::Tree) built from the
//! AST produced by `arbor_parser`. The tree can be:
//!
//! - [evaluated](eval::evaluate) against a [`Ctxt`](ctxt::Ctxt) of variables and constants,
//!   producing a real, complex, vector, or matrix [`Value`](value::Value),
//! - checked for dimension errors without evaluation via [`shape_of`](eval::shape_of),
//! - [differentiated](derivative::derive) symbolically with respect to a variable, and
//! - [simplified](simplify::simplify) or [distributed](simplify::distribute) structurally.
//!
//! ```
//! use arbor_compute::{Ctxt, Tree, Value, evaluate};
//!
//! let ctxt = Ctxt::default();
//! let tree = Tree::parse("2 + 3 * 4", &ctxt).unwrap();
//! assert_eq!(evaluate(&tree, &ctxt).unwrap(), Value::Real(14.0));
//! ```

pub mod consts;
pub mod ctxt;
pub mod derivative;
pub mod error;
pub mod eval;
pub mod funcs;
pub mod matrix;
pub mod shape;
pub mod simplify;
pub mod tree;
pub mod value;

pub use ctxt::Ctxt;
pub use derivative::derive;
pub use error::Error;
pub use eval::{evaluate, shape_of};
pub use shape::Shape;
pub use simplify::{distribute, simplify};
pub use tree::Tree;
pub use value::Value;
