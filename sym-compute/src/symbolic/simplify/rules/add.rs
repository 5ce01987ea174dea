//! Simplification rules for sums, including combining like terms.

use crate::symbolic::{
    expr::{Expr, Mul},
    simplify::{fraction::Ratio, mult},
};
use std::collections::BTreeMap;

/// `a+(b+c) = a+b+c`
pub fn flatten(terms: &[Expr]) -> Option<Vec<Expr>> {
    if !terms.iter().any(Expr::is_add) {
        return None;
    }

    let mut new_terms = Vec::with_capacity(terms.len());
    for term in terms {
        match term {
            Expr::Add(add) => new_terms.extend(add.terms().iter().cloned()),
            other => new_terms.push(other.clone()),
        }
    }
    Some(new_terms)
}

/// Folds the numeric terms into a single term.
///
/// `2+3+x = 5+x`
/// `1/2+1/3 = 5/6`
/// `0+x = x`
pub fn fold_numbers(terms: &[Expr]) -> Option<Vec<Expr>> {
    let mut sum = Ratio::ZERO;
    let mut count = 0;
    let mut new_terms = Vec::with_capacity(terms.len());
    for term in terms {
        match Ratio::from_expr(term) {
            Some(value) => {
                sum = sum + value;
                count += 1;
            },
            None => new_terms.push(term.clone()),
        }
    }

    // a single non-zero number is already folded
    let lone_zero = count == 1 && sum.is_zero() && !new_terms.is_empty();
    if count < 2 && !lone_zero {
        return None;
    }

    if !sum.is_zero() || new_terms.is_empty() {
        new_terms.push(sum.into_expr());
    }
    Some(new_terms)
}

/// Splits a non-numeric term into its rational coefficient and its symbolic factor. If the term
/// is not a [`Expr::Mul`] with numeric factors, the coefficient is 1.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `ln(x)` -> `(1, ln(x))`
fn split_coefficient(term: &Expr) -> (Ratio, Expr) {
    let Expr::Mul(mul) = term else {
        return (Ratio::ONE, term.clone());
    };

    let mut coefficient = Ratio::ONE;
    let mut rest = Vec::with_capacity(mul.factors().len());
    for factor in mul.factors() {
        match Ratio::from_expr(factor) {
            Some(value) => coefficient = coefficient * value,
            None => rest.push(factor.clone()),
        }
    }

    // the factors were sorted, so any subsequence of them is still sorted
    match rest.len() {
        0 => (Ratio::ONE, term.clone()),
        1 => (coefficient, rest.remove(0)),
        _ => (coefficient, Expr::Mul(Mul::new_raw(rest))),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
pub fn combine_like_terms(terms: &[Expr]) -> Option<Vec<Expr>> {
    let mut new_terms = Vec::with_capacity(terms.len());
    let mut groups: BTreeMap<Expr, (Ratio, usize)> = BTreeMap::new();
    for term in terms {
        if Ratio::from_expr(term).is_some() {
            new_terms.push(term.clone());
            continue;
        }

        let (coefficient, factor) = split_coefficient(term);
        let group = groups.entry(factor).or_insert((Ratio::ZERO, 0));
        group.0 = group.0 + coefficient;
        group.1 += 1;
    }

    if groups.values().all(|(_, count)| *count == 1) {
        return None;
    }

    for (factor, (coefficient, _)) in groups {
        if coefficient.is_zero() {
            continue;
        }

        let term = if coefficient.is_one() {
            factor
        } else {
            mult(vec![coefficient.into_expr(), factor])
        };

        // multiplying a sum by a coefficient distributes it
        match term {
            Expr::Add(add) => new_terms.extend(add.terms().iter().cloned()),
            other => new_terms.push(other),
        }
    }

    if new_terms.is_empty() {
        new_terms.push(Expr::Constant(0));
    }
    Some(new_terms)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{constant, div, ln, variable};
    use super::*;

    #[test]
    fn fold_leaves_single_number() {
        let x = variable("x");
        assert_eq!(fold_numbers(&[x.clone(), constant(5)]), None);
        assert_eq!(fold_numbers(&[x.clone(), constant(0)]), Some(vec![x.clone()]));
        assert_eq!(fold_numbers(&[constant(0)]), None);
        assert_eq!(
            fold_numbers(&[constant(2), x.clone(), constant(-2)]),
            Some(vec![x]),
        );
    }

    #[test]
    fn fold_fractions() {
        let half = div(constant(1), constant(2));
        let third = div(constant(1), constant(3));
        assert_eq!(
            fold_numbers(&[half, third]),
            Some(vec![div(constant(5), constant(6))]),
        );
    }

    #[test]
    fn split_coefficients() {
        let x = variable("x");
        let y = variable("y");
        let term = mult(vec![constant(3), x.clone(), y.clone()]);
        assert_eq!(split_coefficient(&term), (Ratio::integer(3), mult(vec![x.clone(), y])));
        assert_eq!(split_coefficient(&ln(x.clone())), (Ratio::ONE, ln(x)));
    }

    #[test]
    fn combine_reports_no_progress() {
        let x = variable("x");
        let y = variable("y");
        assert_eq!(combine_like_terms(&[x, y, constant(1)]), None);
    }
}
