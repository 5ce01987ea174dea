//! Exact rational numbers, used to fold the numeric parts of sums and products.
//!
//! A rational number `n/d` appears in canonical expressions in one of three shapes: the integer
//! `n` when `d == 1`, the reciprocal `d^-1` when `n == 1`, or the product `d^-1 * n` otherwise.

use crate::primitive::{gcd, saturate};
use crate::symbolic::expr::{Expr, Mul, Power};
use std::ops;

/// A rational number in lowest terms, with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    numer: i64,
    denom: i64,
}

impl Ratio {
    /// The rational number `0`.
    pub const ZERO: Ratio = Ratio { numer: 0, denom: 1 };

    /// The rational number `1`.
    pub const ONE: Ratio = Ratio { numer: 1, denom: 1 };

    /// Creates a rational number, reducing it to lowest terms. Results that do not fit in an
    /// [`i64`] saturate.
    pub fn new(numer: i128, denom: i128) -> Self {
        debug_assert!(denom != 0, "rational number with zero denominator");

        let (numer, denom) = if denom < 0 { (-numer, -denom) } else { (numer, denom) };
        let divisor = gcd(numer, denom).max(1);
        Self {
            numer: saturate(numer / divisor),
            denom: saturate(denom / divisor).max(1),
        }
    }

    /// Creates a rational number from an integer.
    pub fn integer(value: i64) -> Self {
        Self { numer: value, denom: 1 }
    }

    /// Returns the numerator. The sign of the number is carried by the numerator.
    pub fn numer(self) -> i64 {
        self.numer
    }

    /// Returns the denominator, which is always positive.
    pub fn denom(self) -> i64 {
        self.denom
    }

    pub fn is_zero(self) -> bool {
        self.numer == 0
    }

    pub fn is_one(self) -> bool {
        self.numer == 1 && self.denom == 1
    }

    pub fn is_negative(self) -> bool {
        self.numer < 0
    }

    /// Reads a numeric expression as a rational number: an integer, the reciprocal of a non-zero
    /// integer, or a product made only of those.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Constant(value) => Some(Self::integer(*value)),
            Expr::Power(power) => match (power.base(), power.exponent()) {
                (Expr::Constant(denom), Expr::Constant(-1)) if *denom != 0 => {
                    Some(Self::new(1, *denom as i128))
                },
                _ => None,
            },
            Expr::Mul(mul) => mul.factors()
                .iter()
                .try_fold(Self::ONE, |product, factor| Some(product * Self::from_expr(factor)?)),
            _ => None,
        }
    }

    /// Returns the canonical factors of this number as they appear inside a product, in
    /// descending order.
    ///
    /// - `1` -> `[]`
    /// - `n` -> `[n]`
    /// - `1/d` -> `[d^-1]`
    /// - `n/d` -> `[d^-1, n]`
    pub fn to_factors(self) -> Vec<Expr> {
        let mut factors = Vec::with_capacity(2);
        if self.denom != 1 {
            factors.push(Expr::Power(Power::new_raw(
                Expr::Constant(self.denom),
                Expr::Constant(-1),
            )));
        }
        if self.numer != 1 {
            factors.push(Expr::Constant(self.numer));
        }
        factors
    }

    /// Converts this number into a canonical expression.
    pub fn into_expr(self) -> Expr {
        let mut factors = self.to_factors();
        match factors.len() {
            0 => Expr::Constant(1),
            1 => factors.remove(0),
            _ => Expr::Mul(Mul::new_raw(factors)),
        }
    }
}

impl ops::Add for Ratio {
    type Output = Ratio;

    fn add(self, rhs: Self) -> Self::Output {
        Ratio::new(
            self.numer as i128 * rhs.denom as i128 + rhs.numer as i128 * self.denom as i128,
            self.denom as i128 * rhs.denom as i128,
        )
    }
}

impl ops::Mul for Ratio {
    type Output = Ratio;

    fn mul(self, rhs: Self) -> Self::Output {
        Ratio::new(
            self.numer as i128 * rhs.numer as i128,
            self.denom as i128 * rhs.denom as i128,
        )
    }
}

impl ops::Neg for Ratio {
    type Output = Ratio;

    fn neg(self) -> Self::Output {
        Ratio {
            numer: self.numer.saturating_neg(),
            denom: self.denom,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn reciprocal(denom: i64) -> Expr {
        Expr::Power(Power::new_raw(Expr::Constant(denom), Expr::Constant(-1)))
    }

    #[test]
    fn reduces_to_lowest_terms() {
        let ratio = Ratio::new(6, -8);
        assert_eq!((ratio.numer(), ratio.denom()), (-3, 4));
        assert_eq!(Ratio::new(0, 5), Ratio::ZERO);
    }

    #[test]
    fn arithmetic() {
        let half = Ratio::new(1, 2);
        let third = Ratio::new(1, 3);
        assert_eq!(half + third, Ratio::new(5, 6));
        assert_eq!(half * third, Ratio::new(1, 6));
        assert_eq!(half + -half, Ratio::ZERO);
        assert_eq!(Ratio::new(2, 3) * Ratio::new(3, 2), Ratio::ONE);
    }

    #[test]
    fn canonical_shapes() {
        assert_eq!(Ratio::integer(7).into_expr(), Expr::Constant(7));
        assert_eq!(Ratio::new(1, 4).into_expr(), reciprocal(4));
        assert_eq!(
            Ratio::new(-3, 4).into_expr(),
            Expr::Mul(Mul::new_raw(vec![reciprocal(4), Expr::Constant(-3)])),
        );
        assert_eq!(Ratio::ONE.to_factors(), vec![]);
        assert_eq!(Ratio::ONE.into_expr(), Expr::Constant(1));
    }

    #[test]
    fn reads_numeric_expressions() {
        let expr = Ratio::new(-3, 4).into_expr();
        assert_eq!(Ratio::from_expr(&expr), Some(Ratio::new(-3, 4)));
        assert_eq!(Ratio::from_expr(&reciprocal(0)), None);
        assert_eq!(Ratio::from_expr(&Expr::euler()), None);
    }
}
