//! Simplification rules for products, including combining like bases.

use crate::symbolic::{
    expr::Expr,
    simplify::{add, fraction::Ratio, power, rules::is_numeric_factor},
};
use std::collections::BTreeMap;

/// `a*(b*c) = a*b*c`
pub fn flatten(factors: &[Expr]) -> Option<Vec<Expr>> {
    if !factors.iter().any(|factor| factor.as_mul().is_some()) {
        return None;
    }

    let mut new_factors = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor {
            Expr::Mul(mul) => new_factors.extend(mul.factors().iter().cloned()),
            other => new_factors.push(other.clone()),
        }
    }
    Some(new_factors)
}

/// Folds the numeric factors into at most one integer and one reciprocal.
///
/// `0*a = 0`
/// `1*a = a`
/// `2*3*a = 6a`
/// `4*6^-1 = 2*3^-1`
pub fn fold_numbers(factors: &[Expr]) -> Option<Vec<Expr>> {
    if factors.len() > 1 && factors.iter().any(Expr::is_zero) {
        return Some(vec![Expr::Constant(0)]);
    }

    let (mut numbers, mut rest): (Vec<Expr>, Vec<Expr>) = factors.iter()
        .cloned()
        .partition(is_numeric_factor);
    if numbers.is_empty() {
        return None;
    }

    let product = numbers.iter()
        .filter_map(Ratio::from_expr)
        .fold(Ratio::ONE, |product, value| product * value);
    let mut folded = product.to_factors();
    if folded.is_empty() && rest.is_empty() {
        folded.push(Expr::Constant(1));
    }

    numbers.sort_by(|a, b| b.cmp(a));
    if numbers == folded {
        return None;
    }

    rest.extend(folded);
    Some(rest)
}

/// Combines factors that share a base by adding their exponents.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = 1`
pub fn combine_like_bases(factors: &[Expr]) -> Option<Vec<Expr>> {
    let mut new_factors = Vec::with_capacity(factors.len());
    let mut groups: BTreeMap<&Expr, Vec<Expr>> = BTreeMap::new();
    for factor in factors {
        if is_numeric_factor(factor) {
            new_factors.push(factor.clone());
            continue;
        }

        let (base, exponent) = factor.base_and_exponent();
        groups.entry(base).or_default().push(exponent);
    }

    if groups.values().all(|exponents| exponents.len() == 1) {
        return None;
    }

    for (base, mut exponents) in groups {
        let factor = if exponents.len() == 1 {
            power(base.clone(), exponents.remove(0))
        } else {
            power(base.clone(), add(exponents))
        };

        match factor {
            Expr::Mul(mul) => new_factors.extend(mul.factors().iter().cloned()),
            other => new_factors.push(other),
        }
    }
    Some(new_factors)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{constant, variable};
    use super::*;

    fn reciprocal(denom: i64) -> Expr {
        power(constant(denom), constant(-1))
    }

    #[test]
    fn zero_absorbs() {
        let x = variable("x");
        assert_eq!(fold_numbers(&[x, constant(0)]), Some(vec![constant(0)]));
    }

    #[test]
    fn gcd_reduction() {
        let x = variable("x");
        assert_eq!(
            fold_numbers(&[x.clone(), constant(4), reciprocal(6)]),
            Some(vec![x, reciprocal(3), constant(2)]),
        );
    }

    #[test]
    fn folded_numbers_are_stable() {
        let x = variable("x");
        assert_eq!(fold_numbers(&[x.clone(), reciprocal(3), constant(2)]), None);
        assert_eq!(fold_numbers(&[constant(1)]), None);
        assert_eq!(fold_numbers(&[x.clone(), constant(1)]), Some(vec![x]));
    }

    #[test]
    fn like_bases() {
        let x = variable("x");
        assert_eq!(
            combine_like_bases(&[x.clone(), power(x.clone(), constant(3))]),
            Some(vec![power(x.clone(), constant(4))]),
        );
        assert_eq!(
            combine_like_bases(&[x.clone(), power(x.clone(), constant(-1))]),
            Some(vec![constant(1)]),
        );
    }
}
