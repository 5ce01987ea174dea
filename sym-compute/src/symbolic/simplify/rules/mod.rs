//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the children of a node under construction,
//! and returns `Some(children)` with the rewritten children if the rule applies, or `None` if the
//! rule does not apply. A rule only returns `Some` when it makes progress, so applying the rules
//! of a node kind until none of them applies always terminates.

pub mod add;
pub mod multiply;
pub mod power;

use crate::symbolic::expr::Expr;

/// A rewrite rule over the children of a sum or product.
pub(crate) type Rule = fn(&[Expr]) -> Option<Vec<Expr>>;

/// Applies the given rules to the children until none of them applies. Rules are tried in order,
/// and the first rule that applies restarts the search.
pub(crate) fn fixpoint(mut children: Vec<Expr>, rules: &[Rule]) -> Vec<Expr> {
    'outer: loop {
        for rule in rules {
            if let Some(next) = rule(&children) {
                children = next;
                continue 'outer;
            }
        }

        return children;
    }
}

/// Returns true if the expression is a numeric factor of a product: an integer, or the
/// reciprocal of a non-zero integer.
pub(crate) fn is_numeric_factor(expr: &Expr) -> bool {
    expr.is_constant() || expr.is_reciprocal_constant()
}
