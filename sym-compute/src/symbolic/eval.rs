//! Substitution of a variable by a value.

use crate::symbolic::{
    ctxt::Ctxt,
    expr::Expr,
    simplify::{add, fraction::Ratio, log, mult, power, trig},
};

/// Returns true if the expression is a negative number.
fn is_negative_number(expr: &Expr) -> bool {
    Ratio::from_expr(expr).is_some_and(Ratio::is_negative)
}

/// Returns true if the expression is a number that is not positive.
fn is_non_positive_number(expr: &Expr) -> bool {
    Ratio::from_expr(expr).is_some_and(|value| value.numer() <= 0)
}

impl Expr {
    /// Replaces every occurrence of the variable with the given name by `value`, and simplifies
    /// the result.
    ///
    /// The reserved symbols `e` and `pi` are never replaced. Returns [`None`] if the substitution
    /// produces an undefined expression, such as `0^-1` or the logarithm of a number that is not
    /// positive.
    ///
    /// ```
    /// use sym_compute::symbolic::{parse::parse, simplify::constant};
    ///
    /// let expr = parse("x^2 + 3x").unwrap();
    /// assert_eq!(expr.evaluate("x", &constant(2)), Some(constant(10)));
    ///
    /// let expr = parse("1 / x").unwrap();
    /// assert_eq!(expr.evaluate("x", &constant(0)), None);
    /// ```
    pub fn evaluate(&self, var: &str, value: &Expr) -> Option<Expr> {
        self.evaluate_with(var, value, &Ctxt::default())
    }

    /// Same as [`Expr::evaluate`], using the given execution context.
    pub fn evaluate_with(&self, var: &str, value: &Expr, ctxt: &Ctxt) -> Option<Expr> {
        match self {
            Expr::Constant(_) => Some(self.clone()),
            Expr::Variable(v) => {
                if v.name() == var && !v.is_reserved() {
                    Some(value.clone())
                } else {
                    Some(self.clone())
                }
            },
            Expr::Add(sum) => {
                let terms = ctxt.try_map(sum.terms(), |term| term.evaluate_with(var, value, ctxt))?;
                Some(add(terms))
            },
            Expr::Mul(product) => {
                let factors = ctxt.try_map(product.factors(), |factor| factor.evaluate_with(var, value, ctxt))?;
                Some(mult(factors))
            },
            Expr::Power(pow) => {
                let base = pow.base().evaluate_with(var, value, ctxt)?;
                let exponent = pow.exponent().evaluate_with(var, value, ctxt)?;
                if base.is_zero() && is_negative_number(&exponent) {
                    return None;
                }
                Some(power(base, exponent))
            },
            Expr::Log(l) => {
                let base = l.base().evaluate_with(var, value, ctxt)?;
                let argument = l.argument().evaluate_with(var, value, ctxt)?;
                if is_non_positive_number(&argument) {
                    return None;
                }
                Some(log(base, argument))
            },
            Expr::Trig(t) => Some(trig(t.func(), t.inside().evaluate_with(var, value, ctxt)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::{expr::TrigFn, parse::parse, simplify::*};
    use super::*;

    fn x() -> Expr {
        variable("x")
    }

    #[test]
    fn substitutes_constants() {
        let expr = parse("x ^ 5 + 7x^2 - x + 9").unwrap();
        assert_eq!(expr.evaluate("x", &constant(2)), Some(constant(32 + 28 - 2 + 9)));
        assert_eq!(expr.evaluate("y", &constant(2)), Some(expr.clone()));
    }

    #[test]
    fn substitutes_expressions() {
        let expr = power(x(), constant(2));
        let value = add(vec![variable("y"), constant(1)]);
        assert_eq!(
            expr.evaluate("x", &value),
            Some(power(value, constant(2))),
        );
    }

    #[test]
    fn keeps_functions_symbolic() {
        let expr = trig(TrigFn::Sin, x());
        assert_eq!(expr.evaluate("x", &constant(0)), Some(trig(TrigFn::Sin, constant(0))));

        let expr = ln(x());
        assert_eq!(expr.evaluate("x", &Expr::euler()), Some(constant(1)));
    }

    #[test]
    fn reserved_symbols_are_not_replaced() {
        let expr = add(vec![x(), Expr::euler()]);
        assert_eq!(expr.evaluate("e", &constant(3)), Some(expr.clone()));
    }

    #[test]
    fn reciprocal_of_zero() {
        let expr = power(x(), constant(-1));
        assert_eq!(expr.evaluate("x", &constant(0)), None);
        assert_eq!(parse("x + 1 / x").unwrap().evaluate("x", &constant(0)), None);
        assert_eq!(
            power(x(), div(constant(-1), constant(2))).evaluate("x", &constant(0)),
            None,
        );
    }

    #[test]
    fn logarithm_of_non_positive() {
        let expr = log(constant(2), x());
        assert_eq!(expr.evaluate("x", &constant(0)), None);
        assert_eq!(expr.evaluate("x", &constant(-4)), None);
        assert_eq!(expr.evaluate("x", &div(constant(-1), constant(2))), None);
        assert_eq!(expr.evaluate("x", &constant(8)), Some(log(constant(2), constant(8))));
    }

    #[test]
    fn failures_propagate() {
        let expr = parse("sin(ln(x)) * y").unwrap();
        assert_eq!(expr.evaluate("x", &constant(0)), None);
    }
}
