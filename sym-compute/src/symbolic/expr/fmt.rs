//! Canonical text and LaTeX rendering of expressions.
//!
//! The [`Display`] output of an [`Expr`] parses back into an identical expression. A product whose
//! integer coefficient would directly precede a sum is printed with the coefficient last, since
//! parsing `2 * (x + 1)` would distribute the coefficient. For the same reason, every part of a
//! denominator is written after its own ` / `.

use std::fmt::{self, Display, Formatter};
use sym_parser::parser::fmt::Latex;
use crate::symbolic::simplify::fraction::Ratio;
use super::{Add, Expr, Log, Mul, Power, Trig};

/// A product viewed as a fraction.
struct Fraction<'a> {
    /// The product of the numeric factors.
    coefficient: Ratio,

    /// The symbolic factors of the numerator in ascending order, with sums moved last.
    numerator: Vec<&'a Expr>,

    /// The bases of the factors with a negative integer exponent, with the magnitude of that
    /// exponent.
    denominator: Vec<(&'a Expr, u64)>,
}

impl<'a> Fraction<'a> {
    fn new(mul: &'a Mul) -> Self {
        let mut coefficient = Ratio::ONE;
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();

        for factor in mul.factors().iter().rev() {
            if let Some(value) = Ratio::from_expr(factor) {
                coefficient = coefficient * value;
                continue;
            }

            match factor {
                Expr::Power(power) => match power.exponent() {
                    Expr::Constant(k) if *k < 0 => denominator.push((power.base(), k.unsigned_abs())),
                    _ => numerator.push(factor),
                },
                _ => numerator.push(factor),
            }
        }

        numerator.sort_by_key(|factor| factor.is_add());
        Self { coefficient, numerator, denominator }
    }

    /// Returns true if the coefficient must be printed after the factors.
    fn coefficient_last(&self) -> bool {
        self.coefficient.numer() != 1
            && self.numerator.first().is_some_and(|factor| factor.is_add())
    }
}

/// Returns true if the expression can be used as the base or exponent of a power without
/// parentheses.
fn is_atom(expr: &Expr) -> bool {
    match expr {
        Expr::Constant(value) => *value >= 0,
        Expr::Variable(_) | Expr::Log(_) | Expr::Trig(_) => true,
        _ => false,
    }
}

/// Returns true if the term of a sum is printed after a minus sign.
fn is_negative_term(term: &Expr) -> bool {
    match term {
        Expr::Constant(value) => *value < 0,
        Expr::Mul(mul) => Fraction::new(mul).coefficient.is_negative(),
        _ => false,
    }
}

/// Writes the expression, wrapped in parentheses if the predicate holds.
fn fmt_wrapped(f: &mut Formatter, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes the factors of a numerator, separated by ` * `.
fn fmt_factors(f: &mut Formatter, factors: &[&Expr]) -> fmt::Result {
    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, " * ")?;
        }
        fmt_wrapped(f, factor, factor.is_add())?;
    }
    Ok(())
}

/// Writes each part of the denominator after its own ` / `.
///
/// The parts are never grouped into one parenthesized product, since parsing `1 / (3 * (x + 1))`
/// would distribute the `3` and parsing `y / (2 * 0)` would fold the product to `0`.
fn fmt_denominator(f: &mut Formatter, denom: i64, parts: &[(&Expr, u64)]) -> fmt::Result {
    if denom != 1 {
        write!(f, " / {}", denom)?;
    }

    for (base, k) in parts {
        write!(f, " / ")?;
        if *k == 1 {
            fmt_wrapped(f, base, base.is_add())?;
        } else {
            fmt_wrapped(f, base, !is_atom(base))?;
            write!(f, "^{}", k)?;
        }
    }
    Ok(())
}

/// Writes a product. If `negate` is true, the product is printed with its sign flipped, which is
/// used to print the terms after a ` - ` in a sum.
fn fmt_mul(f: &mut Formatter, mul: &Mul, negate: bool) -> fmt::Result {
    let mut fraction = Fraction::new(mul);
    if negate {
        fraction.coefficient = -fraction.coefficient;
    }
    let numer = fraction.coefficient.numer();
    let denom = fraction.coefficient.denom();

    if fraction.coefficient_last() {
        fmt_factors(f, &fraction.numerator)?;
        fmt_denominator(f, denom, &fraction.denominator)?;
        return write!(f, " * {}", numer);
    }

    if numer < 0 {
        write!(f, "-")?;
    }
    if numer.unsigned_abs() != 1 || fraction.numerator.is_empty() {
        write!(f, "{}", numer.unsigned_abs())?;
        if !fraction.numerator.is_empty() {
            write!(f, " * ")?;
        }
    }
    fmt_factors(f, &fraction.numerator)?;
    fmt_denominator(f, denom, &fraction.denominator)
}

fn fmt_add(f: &mut Formatter, add: &Add) -> fmt::Result {
    for (i, term) in add.terms().iter().enumerate() {
        if i == 0 {
            write!(f, "{}", term)?;
            continue;
        }

        match term {
            Expr::Constant(value) if *value < 0 => write!(f, " - {}", value.unsigned_abs())?,
            Expr::Mul(mul) if is_negative_term(term) => {
                write!(f, " - ")?;
                fmt_mul(f, mul, true)?;
            },
            _ => write!(f, " + {}", term)?,
        }
    }
    Ok(())
}

fn fmt_power(f: &mut Formatter, power: &Power) -> fmt::Result {
    let base = power.base();
    if let Expr::Constant(k) = power.exponent() {
        if *k < 0 {
            write!(f, "1 / ")?;
            if *k == -1 {
                return fmt_wrapped(f, base, base.is_add());
            }
            fmt_wrapped(f, base, !is_atom(base))?;
            return write!(f, "^{}", k.unsigned_abs());
        }
    }

    fmt_wrapped(f, base, !is_atom(base))?;
    write!(f, "^")?;
    fmt_wrapped(f, power.exponent(), !is_atom(power.exponent()))
}

fn fmt_log(f: &mut Formatter, log: &Log) -> fmt::Result {
    if log.is_natural() {
        write!(f, "ln({})", log.argument())
    } else {
        write!(f, "log({}, {})", log.base(), log.argument())
    }
}

fn fmt_trig(f: &mut Formatter, trig: &Trig) -> fmt::Result {
    write!(f, "{}({})", trig.func().name(), trig.inside())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Variable(var) => write!(f, "{}", var.name()),
            Expr::Log(log) => fmt_log(f, log),
            Expr::Trig(trig) => fmt_trig(f, trig),
            Expr::Power(power) => fmt_power(f, power),
            Expr::Mul(mul) => fmt_mul(f, mul, false),
            Expr::Add(add) => fmt_add(f, add),
        }
    }
}

/// Writes the expression as LaTeX, wrapped in `\left(` and `\right)` if the predicate holds.
fn latex_wrapped(f: &mut Formatter, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "\\left({}\\right)", expr.as_display())
    } else {
        expr.fmt_latex(f)
    }
}

fn latex_mul(f: &mut Formatter, mul: &Mul, negate: bool) -> fmt::Result {
    let mut fraction = Fraction::new(mul);
    if negate {
        fraction.coefficient = -fraction.coefficient;
    }
    let numer = fraction.coefficient.numer();
    let denom = fraction.coefficient.denom();

    let mut top = String::new();
    if numer.unsigned_abs() != 1 || fraction.numerator.is_empty() {
        top.push_str(&numer.unsigned_abs().to_string());
    }
    for (i, factor) in fraction.numerator.iter().enumerate() {
        let rendered = if factor.is_add() {
            format!("\\left({}\\right)", factor.as_display())
        } else {
            factor.as_latex()
        };

        // the coefficient is juxtaposed unless two numbers would run together
        if i > 0 || !top.is_empty() && rendered.starts_with(|c: char| c.is_ascii_digit()) {
            top.push_str(" \\cdot ");
        }
        top.push_str(&rendered);
    }

    let mut bottom = Vec::new();
    if denom != 1 {
        bottom.push(denom.to_string());
    }
    for (base, k) in &fraction.denominator {
        let rendered = if base.is_add() || !is_atom(base) && *k != 1 {
            format!("\\left({}\\right)", base.as_display())
        } else {
            base.as_latex()
        };
        if *k == 1 {
            bottom.push(rendered);
        } else {
            bottom.push(format!("{}^{{{}}}", rendered, k));
        }
    }

    if numer < 0 {
        write!(f, "-")?;
    }
    if bottom.is_empty() {
        write!(f, "{}", top)
    } else {
        write!(f, "\\frac{{{}}}{{{}}}", top, bottom.join(" \\cdot "))
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Variable(var) if var.name() == super::PI => write!(f, "\\pi"),
            Expr::Variable(var) => write!(f, "{}", var.name()),
            Expr::Log(log) => {
                if log.is_natural() {
                    write!(f, "\\ln\\left({}\\right)", log.argument().as_display())
                } else {
                    write!(
                        f,
                        "\\log_{{{}}}\\left({}\\right)",
                        log.base().as_display(),
                        log.argument().as_display(),
                    )
                }
            },
            Expr::Trig(trig) => write!(
                f,
                "\\{}\\left({}\\right)",
                trig.func().name(),
                trig.inside().as_display(),
            ),
            Expr::Power(power) => {
                let base = power.base();
                if let Expr::Constant(k) = power.exponent() {
                    if *k < 0 {
                        write!(f, "\\frac{{1}}{{")?;
                        if *k == -1 {
                            base.fmt_latex(f)?;
                        } else {
                            latex_wrapped(f, base, !is_atom(base))?;
                            write!(f, "^{{{}}}", k.unsigned_abs())?;
                        }
                        return write!(f, "}}");
                    }
                }

                latex_wrapped(f, base, !is_atom(base))?;
                write!(f, "^{{{}}}", power.exponent().as_display())
            },
            Expr::Mul(mul) => latex_mul(f, mul, false),
            Expr::Add(add) => {
                for (i, term) in add.terms().iter().enumerate() {
                    if i == 0 {
                        term.fmt_latex(f)?;
                        continue;
                    }

                    match term {
                        Expr::Constant(value) if *value < 0 => write!(f, "-{}", value.unsigned_abs())?,
                        Expr::Mul(mul) if is_negative_term(term) => {
                            write!(f, "-")?;
                            latex_mul(f, mul, true)?;
                        },
                        _ => write!(f, "+{}", term.as_display())?,
                    }
                }
                Ok(())
            },
        }
    }
}

impl Expr {
    /// Renders the expression as LaTeX.
    pub fn as_latex(&self) -> String {
        self.as_display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::*;
    use crate::symbolic::expr::TrigFn;
    use super::*;

    fn x() -> Expr {
        variable("x")
    }

    #[test]
    fn display_polynomial() {
        let expr = add(vec![
            power(x(), constant(5)),
            mult(vec![constant(7), power(x(), constant(2))]),
            negate(x()),
            constant(9),
        ]);
        assert_eq!(expr.to_string(), "7 * x^2 - x + x^5 + 9");
    }

    #[test]
    fn display_fractions() {
        assert_eq!(div(constant(3), constant(4)).to_string(), "3 / 4");
        assert_eq!(div(constant(-3), constant(4)).to_string(), "-3 / 4");
        assert_eq!(div(x(), constant(2)).to_string(), "x / 2");
        assert_eq!(div(constant(1), mult(vec![constant(2), x()])).to_string(), "1 / 2 / x");
        assert_eq!(power(x(), constant(-2)).to_string(), "1 / x^2");
        assert_eq!(sub(variable("y"), div(constant(1), x())).to_string(), "-1 / x + y");
    }

    #[test]
    fn display_denominator_parts_separately() {
        let sum = add(vec![x(), constant(1)]);
        let expr = mult(vec![div(constant(1), constant(3)), div(constant(1), sum)]);
        assert_eq!(expr.to_string(), "1 / 3 / (x + 1)");
        assert_eq!(crate::symbolic::parse::parse(&expr.to_string()).unwrap(), expr);

        let expr = mult(vec![
            variable("y"),
            power(constant(2), constant(-1)),
            power(constant(0), constant(-1)),
        ]);
        assert_eq!(expr.to_string(), "y / 2 / 0");
        assert_eq!(crate::symbolic::parse::parse(&expr.to_string()).unwrap(), expr);

        let expr = div(x(), mult(vec![variable("y"), power(variable("z"), constant(3))]));
        assert_eq!(expr.to_string(), "x / y / z^3");
    }

    #[test]
    fn display_coefficient_before_sum() {
        let sum = add(vec![x(), constant(1)]);
        let expr = mult(vec![constant(3), sum.clone(), variable("y")]);
        assert_eq!(expr.to_string(), "3 * y * (x + 1)");

        let expr = div(sum.clone(), constant(2));
        assert_eq!(expr.to_string(), "(x + 1) / 2");

        let expr = mult(vec![constant(3), div(sum, constant(2))]);
        assert_eq!(expr.to_string(), "(x + 1) / 2 * 3");
    }

    #[test]
    fn display_functions() {
        assert_eq!(add(vec![trig(TrigFn::Sin, x()), constant(12)]).to_string(), "sin(x) + 12");
        assert_eq!(ln(x()).to_string(), "ln(x)");
        assert_eq!(log(constant(2), x()).to_string(), "log(2, x)");
        assert_eq!(power(Expr::euler(), mult(vec![constant(2), x()])).to_string(), "e^(2 * x)");
        assert_eq!(power(constant(-2), x()).to_string(), "(-2)^x");
    }

    #[test]
    fn latex_output() {
        assert_eq!(div(x(), constant(2)).as_latex(), "\\frac{x}{2}");
        assert_eq!(
            mult(vec![constant(4), power(x(), constant(3))]).as_latex(),
            "4x^{3}",
        );
        assert_eq!(
            sub(trig(TrigFn::Cos, x()), ln(x())).as_latex(),
            "-\\ln\\left(x\\right)+\\cos\\left(x\\right)",
        );
        assert_eq!(log(constant(2), x()).as_latex(), "\\log_{2}\\left(x\\right)");
        assert_eq!(mult(vec![constant(2), Expr::pi()]).as_latex(), "2\\pi");
        assert_eq!(power(x(), constant(-2)).as_latex(), "\\frac{1}{x^{2}}");
    }
}
