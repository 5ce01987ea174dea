//! Floating-point approximation of expressions.

use std::f64::consts::{E, PI};
use crate::symbolic::expr::{self, Expr};

impl Expr {
    /// Approximates the value of the expression as a float, with the variables bound to the given
    /// values. The reserved symbols `e` and `pi` are always bound to their usual values.
    ///
    /// Returns [`None`] if a variable is unbound, if a logarithm has a base or argument that is
    /// not positive, or if the result is not finite.
    ///
    /// ```
    /// use sym_compute::symbolic::parse::parse;
    ///
    /// let expr = parse("x^2 + 1 / 2").unwrap();
    /// assert_eq!(expr.approximate(&[("x", 3.0)]), Some(9.5));
    /// assert_eq!(expr.approximate(&[]), None);
    /// ```
    pub fn approximate(&self, bindings: &[(&str, f64)]) -> Option<f64> {
        let value = match self {
            Expr::Constant(value) => *value as f64,
            Expr::Variable(var) => match var.name() {
                expr::EULER => E,
                expr::PI => PI,
                name => bindings.iter()
                    .find(|(bound, _)| *bound == name)
                    .map(|(_, value)| *value)?,
            },
            Expr::Add(sum) => sum.terms()
                .iter()
                .try_fold(0.0, |acc, term| Some(acc + term.approximate(bindings)?))?,
            Expr::Mul(product) => product.factors()
                .iter()
                .try_fold(1.0, |acc, factor| Some(acc * factor.approximate(bindings)?))?,
            Expr::Power(pow) => {
                let base = pow.base().approximate(bindings)?;
                let exponent = pow.exponent().approximate(bindings)?;
                base.powf(exponent)
            },
            Expr::Log(log) => {
                let argument = log.argument().approximate(bindings)?;
                if argument <= 0.0 {
                    return None;
                }

                if log.is_natural() {
                    argument.ln()
                } else {
                    let base = log.base().approximate(bindings)?;
                    if base <= 0.0 {
                        return None;
                    }
                    argument.ln() / base.ln()
                }
            },
            Expr::Trig(trig) => trig.func().eval_f64(trig.inside().approximate(bindings)?),
        };

        Some(value).filter(|value| value.is_finite())
    }
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
    use crate::symbolic::parse::parse;

    fn approx(source: &str, bindings: &[(&str, f64)]) -> Option<f64> {
        parse(source).unwrap().approximate(bindings)
    }

    #[test]
    fn reserved_symbols() {
        assert_float_relative_eq!(approx("e", &[]).unwrap(), std::f64::consts::E);
        assert_float_relative_eq!(approx("2pi", &[]).unwrap(), std::f64::consts::TAU);
        assert_float_relative_eq!(approx("ln(e^3)", &[]).unwrap(), 3.0);
    }

    #[test]
    fn functions() {
        assert_float_relative_eq!(approx("sin(x)^2 + cos(x)^2", &[("x", 0.4)]).unwrap(), 1.0);
        assert_float_relative_eq!(approx("log(2, 8)", &[]).unwrap(), 3.0);
        assert_float_relative_eq!(approx("sqrt(x)", &[("x", 16.0)]).unwrap(), 4.0);
        assert_float_relative_eq!(approx("sec(x)", &[("x", 0.5)]).unwrap(), 1.0 / 0.5f64.cos());
    }

    #[test]
    fn undefined_values() {
        assert_eq!(approx("x + y", &[("x", 1.0)]), None);
        assert_eq!(approx("ln(x)", &[("x", -1.0)]), None);
        assert_eq!(approx("log(x, 2)", &[("x", -2.0)]), None);
        assert_eq!(approx("1 / x", &[("x", 0.0)]), None);
    }
}
