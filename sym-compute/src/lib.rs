//! Canonical symbolic expressions.
//!
//! Every [`Expr`](symbolic::Expr) produced by this crate is in canonical form: sums and products
//! are flattened, numeric parts are folded, like terms and like bases are merged, and commutative
//! children are sorted. The only way to build an expression is through the smart constructors in
//! [`symbolic::simplify`], which is what makes structural equality coincide with the algebraic
//! equality the simplifiers can recognize.
//!
//! On top of the canonical form, this crate implements symbolic differentiation, substitution
//! of a variable by a value, floating-point approximation, and conversion from the syntax tree
//! produced by `sym-parser`.

pub mod primitive;
pub mod symbolic;
