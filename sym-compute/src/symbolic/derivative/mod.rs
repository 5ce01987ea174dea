//! Symbolic differentiation.
//!
//! Derivatives are computed recursively over the canonical form, and every intermediate result is
//! rebuilt through the smart constructors, so the derivative of a canonical expression is
//! canonical as well.
//!
//! ```
//! use sym_compute::symbolic::parse::parse;
//!
//! let expr = parse("x^4").unwrap();
//! assert_eq!(expr.derivative("x"), Some(parse("4x^3").unwrap()));
//! ```

mod function;

use crate::symbolic::{
    cache::CacheKey,
    ctxt::Ctxt,
    expr::Expr,
    simplify::{add, div, ln, mult},
};

impl Expr {
    /// Differentiates the expression with respect to the variable with the given name.
    ///
    /// The reserved symbols `e` and `pi` are constants, so differentiating with respect to one of
    /// them yields `0`. Returns [`None`] if the derivative is undefined.
    pub fn derivative(&self, var: &str) -> Option<Expr> {
        self.derivative_with(var, &Ctxt::default())
    }

    /// Differentiates the expression with respect to the variable with the given name, using the
    /// given execution context.
    pub fn derivative_with(&self, var: &str, ctxt: &Ctxt) -> Option<Expr> {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => return self.derivative_uncached(var, ctxt),
            _ => {},
        }

        ctxt.cache().compute_if_absent(
            &CacheKey::new(self.clone(), var),
            &|| self.derivative_uncached(var, ctxt),
        )
    }

    fn derivative_uncached(&self, var: &str, ctxt: &Ctxt) -> Option<Expr> {
        match self {
            Expr::Constant(_) => Some(Expr::Constant(0)),
            // `e` and `pi` are constants, even when named as the variable
            Expr::Variable(v) => Some(Expr::Constant((v.name() == var && !v.is_reserved()) as i64)),
            Expr::Add(sum) => {
                let terms = ctxt.try_map(sum.terms(), |term| term.derivative_with(var, ctxt))?;
                Some(add(terms))
            },
            Expr::Mul(product) => product_derivative(product.factors(), var, ctxt),
            Expr::Power(pow) => {
                // d(f^g) = f^g * d(g * ln(f))
                let exponent = mult(vec![pow.exponent().clone(), ln(pow.base().clone())]);
                Some(mult(vec![self.clone(), exponent.derivative_with(var, ctxt)?]))
            },
            Expr::Log(log) => {
                if log.is_natural() {
                    Some(div(log.argument().derivative_with(var, ctxt)?, log.argument().clone()))
                } else {
                    // change of base
                    div(ln(log.argument().clone()), ln(log.base().clone()))
                        .derivative_with(var, ctxt)
                }
            },
            Expr::Trig(t) => Some(mult(vec![
                function::trig_derivative(t.func(), t.inside()),
                t.inside().derivative_with(var, ctxt)?,
            ])),
        }
    }

    /// Differentiates the expression with respect to another expression, by summing the partial
    /// derivatives `(∂self/∂v) / (∂rhs/∂v)` over every free variable `v` of `rhs`.
    ///
    /// Returns [`None`] if `rhs` has no free variables, if `∂rhs/∂v` is `0` for one of them, or if
    /// any of the derivatives is undefined.
    pub fn derivative_wrt(&self, rhs: &Expr) -> Option<Expr> {
        self.derivative_wrt_with(rhs, &Ctxt::default())
    }

    /// Same as [`Expr::derivative_wrt`], using the given execution context.
    pub fn derivative_wrt_with(&self, rhs: &Expr, ctxt: &Ctxt) -> Option<Expr> {
        let vars = rhs.free_variables();
        if vars.is_empty() {
            return None;
        }

        let mut terms = Vec::with_capacity(vars.len());
        for var in vars {
            let numerator = self.derivative_with(var, ctxt)?;
            let denominator = rhs.derivative_with(var, ctxt)?;
            if denominator.is_zero() {
                return None;
            }
            terms.push(div(numerator, denominator));
        }
        Some(add(terms))
    }
}

/// Differentiates a product with the product rule, splitting the factors in two halves.
fn product_derivative(factors: &[Expr], var: &str, ctxt: &Ctxt) -> Option<Expr> {
    if let [factor] = factors {
        return factor.derivative_with(var, ctxt);
    }

    let (left, right) = factors.split_at(factors.len() / 2);
    let (d_left, d_right) = ctxt.join(
        factors.len(),
        || product_derivative(left, var, ctxt),
        || product_derivative(right, var, ctxt),
    );

    // d(lr) = l * d(r) + d(l) * r
    let left = mult(left.to_vec());
    let right = mult(right.to_vec());
    Some(add(vec![
        mult(vec![left, d_right?]),
        mult(vec![d_left?, right]),
    ]))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use crate::symbolic::{
        cache::MemoCache,
        expr::TrigFn,
        parse::parse,
        simplify::*,
    };
    use super::*;

    fn x() -> Expr {
        variable("x")
    }

    /// Checks the symbolic derivative against a central finite difference at each point.
    fn assert_matches_finite_difference(expr: &Expr, points: &[f64]) {
        let derivative = expr.derivative("x").unwrap();
        let h = 1e-6;
        for &point in points {
            let symbolic = derivative.approximate(&[("x", point)]).unwrap();
            let ahead = expr.approximate(&[("x", point + h)]).unwrap();
            let behind = expr.approximate(&[("x", point - h)]).unwrap();
            assert_float_relative_eq!(symbolic, (ahead - behind) / (2.0 * h), 1e-4);
        }
    }

    #[test]
    fn constants_and_variables() {
        assert_eq!(constant(5).derivative("x"), Some(constant(0)));
        assert_eq!(x().derivative("x"), Some(constant(1)));
        assert_eq!(variable("y").derivative("x"), Some(constant(0)));
        assert_eq!(Expr::pi().derivative("x"), Some(constant(0)));
    }

    #[test]
    fn reserved_symbols_are_constants() {
        assert_eq!(Expr::euler().derivative("e"), Some(constant(0)));
        assert_eq!(Expr::pi().derivative("pi"), Some(constant(0)));
        assert_eq!(power(Expr::euler(), x()).derivative("e"), Some(constant(0)));
        assert_eq!(mult(vec![Expr::pi(), x()]).derivative("pi"), Some(constant(0)));
        assert_eq!(
            power(Expr::euler(), x()).derivative("x"),
            Some(power(Expr::euler(), x())),
        );
    }

    #[test]
    fn power_rule() {
        let expr = power(x(), constant(4));
        assert_eq!(
            expr.derivative("x"),
            Some(mult(vec![constant(4), power(x(), constant(3))])),
        );
    }

    #[test]
    fn polynomial() {
        let expr = parse("x ^ 5 + 7x^2 - x + 9").unwrap();
        assert_eq!(expr.derivative("x"), Some(parse("5x^4 + 14x - 1").unwrap()));
    }

    #[test]
    fn chain_rule() {
        // d/dx x^x = (1 + ln x) x^x
        let expr = power(x(), x());
        assert_eq!(
            expr.derivative("x"),
            Some(mult(vec![add(vec![constant(1), ln(x())]), power(x(), x())])),
        );
    }

    #[test]
    fn trig_table() {
        let cases = [
            (TrigFn::Sin, "cos(x)"),
            (TrigFn::Cos, "-sin(x)"),
            (TrigFn::Tan, "sec(x)^2"),
            (TrigFn::Csc, "-csc(x) * cot(x)"),
            (TrigFn::Sec, "sec(x) * tan(x)"),
            (TrigFn::Cot, "-csc(x)^2"),
        ];

        for (func, expected) in cases {
            assert_eq!(trig(func, x()).derivative("x"), Some(parse(expected).unwrap()));
        }
    }

    #[test]
    fn trig_chain_rule() {
        let expr = parse("sin(x^2)").unwrap();
        assert_eq!(expr.derivative("x"), Some(parse("2x cos(x^2)").unwrap()));
    }

    #[test]
    fn logarithms() {
        assert_eq!(ln(x()).derivative("x"), Some(div(constant(1), x())));

        // change of base: d/dx log_2(x) = 1 / (x ln 2)
        let expr = log(constant(2), x());
        assert_eq!(
            expr.derivative("x"),
            Some(div(constant(1), mult(vec![x(), ln(constant(2))]))),
        );
    }

    #[test]
    fn finite_differences() {
        let sources = [
            "x^3 - 2x + 1",
            "sin(x) * cos(x)",
            "x^x",
            "ln(x^2 + 1)",
            "log(3, x) / x",
            "tan(x) + sec(x) - cot(x) + csc(x)",
            "e^(2x) / (x + 3)",
            "sqrt(x + 1)",
        ];

        for source in sources {
            assert_matches_finite_difference(&parse(source).unwrap(), &[0.3, 0.7, 1.1]);
        }
    }

    #[test]
    fn with_respect_to_expression() {
        // d(x^2) / d(x^2) = 1
        let expr = power(x(), constant(2));
        assert_eq!(expr.derivative_wrt(&expr), Some(constant(1)));

        // d(sin x) / d(2x) = cos(x) / 2
        let rhs = mult(vec![constant(2), x()]);
        assert_eq!(
            trig(TrigFn::Sin, x()).derivative_wrt(&rhs),
            Some(div(trig(TrigFn::Cos, x()), constant(2))),
        );
    }

    #[test]
    fn with_respect_to_expression_fails() {
        let expr = power(x(), constant(2));
        assert_eq!(expr.derivative_wrt(&constant(3)), None);
        assert_eq!(expr.derivative_wrt(&Expr::pi()), None);

        // the derivative of the right-hand side with respect to `y` simplifies to zero
        let rhs = parse("sin(y)^2 + cos(y)^2").unwrap();
        assert_eq!(rhs.derivative("y"), Some(constant(0)));
        assert_eq!(expr.derivative_wrt(&rhs), None);
    }

    #[test]
    fn parallel_matches_sequential() {
        let terms = (1..=100)
            .map(|k| mult(vec![constant(k), power(x(), constant(k))]))
            .collect::<Vec<_>>();
        let factors = (1..=80)
            .map(|k| trig(TrigFn::Sin, mult(vec![constant(k), x()])))
            .collect::<Vec<_>>();

        let ctxt = Ctxt::new()
            .with_threads(4)
            .unwrap()
            .with_parallel_threshold(8)
            .with_cache(Arc::new(MemoCache::new()));

        for expr in [add(terms), mult(factors)] {
            assert_eq!(expr.derivative_with("x", &ctxt), expr.derivative("x"));
        }
    }

    #[test]
    fn cache_is_consulted() {
        let cache = Arc::new(MemoCache::new());
        let ctxt = Ctxt::new().with_cache(cache.clone());
        let expr = parse("sin(x) * x^2").unwrap();

        let first = expr.derivative_with("x", &ctxt);
        let cached = cache.len();
        assert!(cached > 0);

        assert_eq!(expr.derivative_with("x", &ctxt), first);
        assert_eq!(cache.len(), cached);
    }
}
