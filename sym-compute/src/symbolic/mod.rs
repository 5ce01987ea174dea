//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of immutable [`Expr`] nodes.
//! Unlike the [`sym_parser::parser::ast::Expr`] nodes produced by [`sym_parser`], [`Expr`] nodes
//! are always in **canonical form**: sums and products are flattened, their numeric parts are
//! folded into exact fractions, like terms and like bases are merged, and the children of sums
//! and products are sorted.
//!
//! For example, `x + (y + x)` is represented as a single [`Expr::Add`] node with the two terms
//! `2x` and `y`, whereas the [`sym_parser::parser::ast::Expr`] node would have two children,
//! `x` and `(y + x)`.
//!
//! Canonical form is enforced by construction: the only way to build an [`Expr`] is through the
//! smart constructors in [`simplify`], which run the simplification rules of each node kind until
//! none of them applies. Structural equality of two canonical expressions therefore coincides
//! with the algebraic equality the rules can recognize.
//!
//! ```
//! use sym_compute::symbolic::{parse::parse, simplify::*};
//!
//! let expr = parse("x + (y + x)").unwrap();
//! assert_eq!(expr, add(vec![mult(vec![constant(2), variable("x")]), variable("y")]));
//! assert_eq!(expr.to_string(), "2 * x + y");
//! ```
//!
//! # Operations
//!
//! - [`Expr::derivative`] and [`Expr::derivative_wrt`] differentiate an expression with respect
//! to a variable, or with respect to another expression.
//! - [`Expr::evaluate`] substitutes a value for a variable.
//! - [`Expr::approximate`] computes a floating-point approximation.
//! - [`Expr::as_latex`] renders an expression as LaTeX.
//!
//! Each operation that recurses over the children of sums and products has a `*_with` variant that
//! accepts a [`Ctxt`], which can process wide nodes in parallel and cache derivatives.
//!
//! Domain errors, such as dividing by zero during evaluation, are reported as [`None`] rather than
//! as errors, and propagate through every operation.

pub mod approx;
pub mod cache;
pub mod ctxt;
pub mod derivative;
pub mod eval;
pub mod expr;
pub mod parse;
pub mod simplify;

pub use ctxt::Ctxt;
pub use expr::Expr;
pub use parse::parse;
