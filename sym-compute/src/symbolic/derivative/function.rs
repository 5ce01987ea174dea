//! Symbolic derivatives of the trigonometric functions.

use crate::symbolic::{
    expr::{Expr, TrigFn},
    simplify::{mult, negate, power, trig},
};

/// Returns the derivative of `func(inside)` with respect to `inside`. The caller applies the chain
/// rule.
pub(super) fn trig_derivative(func: TrigFn, inside: &Expr) -> Expr {
    let apply = |func| trig(func, inside.clone());
    match func {
        TrigFn::Sin => apply(TrigFn::Cos),
        TrigFn::Cos => negate(apply(TrigFn::Sin)),
        TrigFn::Tan => power(apply(TrigFn::Sec), Expr::Constant(2)),
        TrigFn::Csc => negate(mult(vec![apply(TrigFn::Csc), apply(TrigFn::Cot)])),
        TrigFn::Sec => mult(vec![apply(TrigFn::Sec), apply(TrigFn::Tan)]),
        TrigFn::Cot => negate(power(apply(TrigFn::Csc), Expr::Constant(2))),
    }
}
