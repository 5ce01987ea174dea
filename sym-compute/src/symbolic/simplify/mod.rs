//! Smart constructors for canonical expressions.
//!
//! Every [`Expr`] is built by one of the functions in this module. Each constructor runs the
//! simplification rules for its node kind until none of them applies, and only then allocates the
//! node. Since the children passed to a constructor are themselves canonical, the result is
//! canonical as well, and building the same expression in any order yields the same tree.
//!
//! ```
//! use sym_compute::symbolic::simplify::{add, constant, ln, mult, variable};
//!
//! let x = variable("x");
//!
//! // `x + x + x + x + ln(x) = 4x + ln(x)`
//! let sum = add(vec![x.clone(), x.clone(), x.clone(), x.clone(), ln(x.clone())]);
//! assert_eq!(sum, add(vec![mult(vec![constant(4), x.clone()]), ln(x)]));
//! ```
//!
//! The rules themselves live in [`rules`]. The numeric parts of sums and products are folded
//! exactly with [`fraction::Ratio`].

pub mod fraction;
pub mod rules;

use crate::symbolic::expr::{is_reserved, Add, Expr, Log, Mul, Trig, TrigFn, Variable};
use rules::{add as add_rules, fixpoint, multiply as mul_rules};

/// Creates an integer constant.
pub fn constant(value: i64) -> Expr {
    Expr::Constant(value)
}

/// Creates a variable with the given name.
///
/// # Panics
///
/// Panics if the name is one of the reserved symbols `e` and `pi`. Use [`Expr::euler`] and
/// [`Expr::pi`] to create those.
pub fn variable(name: &str) -> Expr {
    assert!(!is_reserved(name), "`{}` is a reserved symbol and cannot be used as a variable", name);
    Expr::Variable(Variable::new_raw(name))
}

/// Creates the sum of the given terms.
///
/// # Panics
///
/// Panics if there are no terms.
pub fn add(terms: impl IntoIterator<Item = Expr>) -> Expr {
    let terms = terms.into_iter().collect::<Vec<_>>();
    assert!(!terms.is_empty(), "cannot construct a sum of zero terms");

    let mut terms = fixpoint(terms, &[
        add_rules::flatten,
        add_rules::fold_numbers,
        add_rules::combine_like_terms,
    ]);
    if terms.len() == 1 {
        return terms.remove(0);
    }

    terms.sort_by(|a, b| b.cmp(a));
    Expr::Add(Add::new_raw(terms))
}

/// Creates the product of the given factors.
///
/// A product of an integer and a sum is distributed: `2(x + 1) = 2x + 2`.
///
/// # Panics
///
/// Panics if there are no factors.
pub fn mult(factors: impl IntoIterator<Item = Expr>) -> Expr {
    let factors = factors.into_iter().collect::<Vec<_>>();
    assert!(!factors.is_empty(), "cannot construct a product of zero factors");

    let mut factors = fixpoint(factors, &[
        mul_rules::flatten,
        mul_rules::fold_numbers,
        mul_rules::combine_like_bases,
    ]);
    if factors.len() == 1 {
        return factors.remove(0);
    }

    factors.sort_by(|a, b| b.cmp(a));
    if let [Expr::Add(sum), Expr::Constant(coefficient)] = factors.as_slice() {
        let coefficient = *coefficient;
        return add(sum.terms()
            .iter()
            .map(|term| mult(vec![Expr::Constant(coefficient), term.clone()])));
    }

    Expr::Mul(Mul::new_raw(factors))
}

/// Creates `base^exponent`.
pub fn power(base: Expr, exponent: Expr) -> Expr {
    rules::power::simplify(base, exponent)
}

/// Creates the logarithm of `argument` in the given base.
///
/// `log_b(b^k) = k`
pub fn log(base: Expr, argument: Expr) -> Expr {
    if argument == base {
        return Expr::Constant(1);
    }

    let (argument_base, exponent) = argument.base_and_exponent();
    if *argument_base == base {
        return exponent;
    }

    Expr::Log(Log::new_raw(base, argument))
}

/// Creates the natural logarithm of `argument`.
pub fn ln(argument: Expr) -> Expr {
    log(Expr::euler(), argument)
}

/// Applies a trigonometric function to an expression.
pub fn trig(func: TrigFn, inside: Expr) -> Expr {
    Expr::Trig(Trig::new_raw(func, inside))
}

/// Applies the trigonometric function with the given name to an expression.
///
/// # Panics
///
/// Panics if the name is not one of `sin`, `cos`, `tan`, `csc`, `sec` and `cot`. Text from users
/// should be validated with [`TrigFn::from_str`](std::str::FromStr::from_str) instead.
pub fn trig_named(name: &str, inside: Expr) -> Expr {
    match name.parse() {
        Ok(func) => trig(func, inside),
        Err(err) => panic!("{}", err),
    }
}

/// Creates `-expr`, i.e. `-1 * expr`.
pub fn negate(expr: Expr) -> Expr {
    mult(vec![Expr::Constant(-1), expr])
}

/// Creates `lhs - rhs`.
pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    add(vec![lhs, negate(rhs)])
}

/// Creates `lhs / rhs`, i.e. `lhs * rhs^-1`.
pub fn div(lhs: Expr, rhs: Expr) -> Expr {
    mult(vec![lhs, power(rhs, Expr::Constant(-1))])
}
