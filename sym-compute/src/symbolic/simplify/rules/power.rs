//! Simplification rules for powers.

use crate::primitive::pow_rounded;
use crate::symbolic::{
    expr::{Expr, Power},
    simplify::{mult, power},
};

/// Evaluates integer powers.
///
/// `2^3 = 8`
/// `2^-3 = 8^-1`
///
/// Returns the new base and exponent, or the evaluated constant if the exponent is not negative.
fn fold_constants(base: i64, exponent: i64) -> Result<(Expr, Expr), Expr> {
    if exponent >= 0 {
        Err(Expr::Constant(pow_rounded(base, exponent)))
    } else {
        Ok((
            Expr::Constant(pow_rounded(base, exponent.saturating_neg())),
            Expr::Constant(-1),
        ))
    }
}

/// Simplifies `base^exponent` until no rule applies, then allocates the power if it is still
/// needed.
///
/// `(a*b)^c = a^c*b^c`
/// `(a^b)^c = a^(b*c)`
/// `a^1 = a`
/// `a^0 = 1`
/// `1^a = 1`
/// `(-c)^-1 = -1*c^-1`
pub(crate) fn simplify(mut base: Expr, mut exponent: Expr) -> Expr {
    loop {
        if let (Some(b), Some(e)) = (base.as_constant(), exponent.as_constant()) {
            if e != -1 {
                match fold_constants(b, e) {
                    Ok((new_base, new_exponent)) => {
                        base = new_base;
                        exponent = new_exponent;
                    },
                    Err(value) => return value,
                }
            }
        }

        match &base {
            Expr::Mul(mul) => {
                let factors = mul.factors().to_vec();
                return mult(factors.into_iter().map(|factor| power(factor, exponent.clone())));
            },
            Expr::Power(inner) => {
                let (inner_base, inner_exponent) = (inner.base().clone(), inner.exponent().clone());
                exponent = mult(vec![inner_exponent, exponent]);
                base = inner_base;
            },
            _ => break,
        }
    }

    if exponent.is_one() {
        return base;
    }

    if base.is_one() || exponent.is_zero() {
        return Expr::Constant(1);
    }

    if let (Some(b), Some(-1)) = (base.as_constant(), exponent.as_constant()) {
        if b == -1 {
            return Expr::Constant(-1);
        } else if b < 0 {
            return mult(vec![
                Expr::Constant(-1),
                power(Expr::Constant(b.saturating_neg()), Expr::Constant(-1)),
            ]);
        }
    }

    Expr::Power(Power::new_raw(base, exponent))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{constant, div, variable};
    use super::*;

    #[test]
    fn integer_powers() {
        assert_eq!(power(constant(2), constant(3)), constant(8));
        assert_eq!(power(constant(-2), constant(3)), constant(-8));
        assert_eq!(power(constant(7), constant(0)), constant(1));
        assert_eq!(power(constant(10), constant(40)), constant(i64::MAX));
    }

    #[test]
    fn negative_integer_powers() {
        assert_eq!(power(constant(2), constant(-3)), div(constant(1), constant(8)));
        assert_eq!(
            power(constant(-2), constant(-1)),
            mult(vec![constant(-1), div(constant(1), constant(2))]),
        );
        assert_eq!(power(constant(-1), constant(-1)), constant(-1));
        assert_eq!(power(constant(1), constant(-1)), constant(1));
    }

    #[test]
    fn division_by_zero_stays_symbolic() {
        let expr = power(constant(0), constant(-1));
        assert_eq!(expr, Expr::Power(Power::new_raw(constant(0), constant(-1))));
    }

    #[test]
    fn identities() {
        let x = variable("x");
        assert_eq!(power(x.clone(), constant(1)), x);
        assert_eq!(power(x.clone(), constant(0)), constant(1));
        assert_eq!(power(constant(1), x.clone()), constant(1));
    }

    #[test]
    fn nested_power_collapses() {
        let x = variable("x");
        assert_eq!(
            power(power(x.clone(), constant(2)), constant(3)),
            power(x.clone(), constant(6)),
        );
        assert_eq!(power(power(x.clone(), constant(2)), div(constant(1), constant(2))), x);
    }

    #[test]
    fn product_base_distributes() {
        let x = variable("x");
        let y = variable("y");
        assert_eq!(
            power(mult(vec![constant(2), x.clone(), y.clone()]), constant(2)),
            mult(vec![constant(4), power(x, constant(2)), power(y, constant(2))]),
        );
    }
}
