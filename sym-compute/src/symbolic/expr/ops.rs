//! Operator overloads. Each operator routes through the corresponding smart constructor, so the
//! result is canonical.

use crate::symbolic::simplify::{add, div, mult, negate, sub};
use std::ops::{Add, Div, Mul, Neg, Sub};
use super::Expr;

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        add(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        sub(self, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        mult(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        div(self, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        negate(self)
    }
}

impl Add for &Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        add(vec![self.clone(), rhs.clone()])
    }
}

impl Mul for &Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        mult(vec![self.clone(), rhs.clone()])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{constant, power, variable};
    use super::*;

    #[test]
    fn operators_are_canonical() {
        let x = variable("x");
        assert_eq!(x.clone() - x.clone(), constant(0));
        assert_eq!(x.clone() / x.clone(), constant(1));
        assert_eq!(&x * &x, power(x.clone(), constant(2)));
        assert_eq!(-(-x.clone()), x);
        assert_eq!(&x + &x, mult(vec![constant(2), x]));
    }
}
