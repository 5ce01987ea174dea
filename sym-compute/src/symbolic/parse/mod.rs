//! Conversion of source text into canonical expressions.
//!
//! Source text is parsed with [`sym_parser`] into a spanned syntax tree, which is then converted
//! node by node through the smart constructors. Conversion does not stop at the first error: every
//! unknown function, wrong argument count and unrepresentable literal in the tree is reported.
//!
//! ```
//! use sym_compute::symbolic::{parse::parse, simplify::*};
//!
//! let expr = parse("2x + x").unwrap();
//! assert_eq!(expr, mult(vec![constant(3), variable("x")]));
//!
//! let errors = parse("foo(x) + log(1, 2, 3)").unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod error;

use std::str::FromStr;
use sym_error::Error;
use sym_parser::parser::{
    ast::{Call, Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use crate::primitive::gcd;
use crate::symbolic::{
    expr::{self, Expr, TrigFn},
    simplify::{add, constant, div, fraction::Ratio, ln, log, mult, negate, power, sub, trig, variable},
};
use error::{IntegerOverflow, NonIntegerLiteral, UnknownFunction, WrongArgumentCount};

/// Parses source text into a canonical expression.
pub fn parse(source: &str) -> Result<Expr, Vec<Error>> {
    let mut parser = Parser::new(source);
    let ast = parser.try_parse_full::<AstExpr>().map_err(|err| vec![err])?;
    convert(&ast)
}

/// Converts a syntax tree into a canonical expression.
pub fn convert(ast: &AstExpr) -> Result<Expr, Vec<Error>> {
    let mut errors = Vec::new();
    match convert_expr(ast, &mut errors) {
        Some(expr) if errors.is_empty() => Ok(expr),
        _ => Err(errors),
    }
}

/// A function that can be called from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Trig(TrigFn),
    Ln,
    Log,
    Sqrt,
    Exp,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ln" => Some(Function::Ln),
            "log" => Some(Function::Log),
            "sqrt" => Some(Function::Sqrt),
            "exp" => Some(Function::Exp),
            _ => TrigFn::from_str(name).ok().map(Function::Trig),
        }
    }

    /// Returns a description of the number of arguments the function accepts, if `count` is not
    /// one of them.
    fn check_arity(self, count: usize) -> Result<(), &'static str> {
        match self {
            Function::Log if count == 1 || count == 2 => Ok(()),
            Function::Log => Err("1 or 2 arguments"),
            _ if count == 1 => Ok(()),
            _ => Err("1 argument"),
        }
    }

    /// Applies the function to arguments of a valid count.
    fn apply(self, mut args: Vec<Expr>) -> Expr {
        let last = args.pop().unwrap_or(Expr::Constant(0));
        match self {
            Function::Trig(func) => trig(func, last),
            Function::Ln => ln(last),
            Function::Log => match args.pop() {
                Some(base) => log(base, last),
                None => ln(last),
            },
            Function::Sqrt => power(last, div(constant(1), constant(2))),
            Function::Exp => power(Expr::euler(), last),
        }
    }
}

/// Converts a decimal literal such as `2.75` into an exact fraction.
fn decimal_to_ratio(value: &str) -> Option<Ratio> {
    let (whole, fractional) = value.split_once('.')?;
    let numer = format!("{}{}", whole, fractional).parse::<i128>().ok()?;
    let denom = 10i128.checked_pow(u32::try_from(fractional.len()).ok()?)?;

    let divisor = gcd(numer, denom).max(1);
    let (numer, denom) = (numer / divisor, denom / divisor);
    if i64::try_from(numer).is_err() || i64::try_from(denom).is_err() {
        return None;
    }
    Some(Ratio::new(numer, denom))
}

fn convert_literal(literal: &Literal, errors: &mut Vec<Error>) -> Option<Expr> {
    match literal {
        Literal::Int(int) => match int.value.parse::<i64>() {
            Ok(value) => Some(constant(value)),
            Err(_) => {
                errors.push(Error::new(vec![int.span.clone()], IntegerOverflow {
                    value: int.value.clone(),
                }));
                None
            },
        },
        Literal::Float(float) => match decimal_to_ratio(&float.value) {
            Some(ratio) => Some(ratio.into_expr()),
            None => {
                errors.push(Error::new(vec![float.span.clone()], NonIntegerLiteral {
                    value: float.value.clone(),
                }));
                None
            },
        },
        Literal::Symbol(sym) => Some(match sym.name.as_str() {
            expr::EULER => Expr::euler(),
            expr::PI => Expr::pi(),
            name => variable(name),
        }),
    }
}

fn convert_call(call: &Call, errors: &mut Vec<Error>) -> Option<Expr> {
    // convert the arguments first, to report errors inside them even if the call is invalid
    let args = call.args.iter()
        .map(|arg| convert_expr(arg, errors))
        .collect::<Vec<_>>();

    let name = &call.name.name;
    let Some(function) = Function::from_name(name) else {
        errors.push(Error::new(vec![call.name.span.clone()], UnknownFunction {
            name: name.clone(),
        }));
        return None;
    };

    if let Err(expected) = function.check_arity(args.len()) {
        errors.push(Error::new(call.outer_span().to_vec(), WrongArgumentCount {
            name: name.clone(),
            expected,
            found: args.len(),
        }));
        return None;
    }

    let args = args.into_iter().collect::<Option<Vec<_>>>()?;
    Some(function.apply(args))
}

fn convert_expr(ast: &AstExpr, errors: &mut Vec<Error>) -> Option<Expr> {
    match ast {
        AstExpr::Literal(literal) => convert_literal(literal, errors),
        AstExpr::Paren(paren) => convert_expr(paren.innermost(), errors),
        AstExpr::Call(call) => convert_call(call, errors),
        AstExpr::Unary(unary) => {
            let operand = convert_expr(&unary.operand, errors)?;
            match unary.op.kind {
                UnaryOpKind::Neg => Some(negate(operand)),
            }
        },
        AstExpr::Binary(binary) => {
            let lhs = convert_expr(&binary.lhs, errors);
            let rhs = convert_expr(&binary.rhs, errors);
            let (lhs, rhs) = (lhs?, rhs?);
            Some(match binary.op.kind {
                BinOpKind::Exp => power(lhs, rhs),
                BinOpKind::Mul => mult(vec![lhs, rhs]),
                BinOpKind::Div => div(lhs, rhs),
                BinOpKind::Add => add(vec![lhs, rhs]),
                BinOpKind::Sub => sub(lhs, rhs),
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        variable("x")
    }

    /// Asserts that printing the parsed expression and parsing it again yields the same
    /// expression.
    fn assert_round_trip(source: &str) -> Expr {
        let expr = parse(source).unwrap();
        let printed = expr.to_string();
        assert_eq!(parse(&printed).unwrap(), expr, "`{}` printed as `{}`", source, printed);
        expr
    }

    #[test]
    fn round_trip_examples() {
        let expr = assert_round_trip("sin(x) + 12");
        assert_eq!(expr, add(vec![trig(TrigFn::Sin, x()), constant(12)]));
        assert_eq!(expr.to_string(), "sin(x) + 12");

        let expr = assert_round_trip("1 - 1 - 1 - 1 - 1");
        assert_eq!(expr, constant(-3));
        assert_eq!(expr.to_string(), "-3");

        let expr = assert_round_trip("x ^ 5 + 7x^2 - x + 9");
        assert_eq!(expr, add(vec![
            power(x(), constant(5)),
            mult(vec![constant(7), power(x(), constant(2))]),
            negate(x()),
            constant(9),
        ]));
        assert_eq!(expr.to_string(), "7 * x^2 - x + x^5 + 9");
    }

    /// Small expressions covering every node kind, signs, fractions and reserved symbols.
    fn atoms() -> Vec<Expr> {
        vec![
            constant(0),
            constant(1),
            constant(-1),
            constant(2),
            constant(-3),
            div(constant(1), constant(2)),
            div(constant(-2), constant(3)),
            x(),
            variable("y"),
            Expr::euler(),
            Expr::pi(),
            add(vec![x(), constant(1)]),
            sub(variable("y"), x()),
            ln(x()),
            log(constant(2), variable("y")),
            trig(TrigFn::Sin, variable("y")),
            power(x(), constant(-2)),
        ]
    }

    #[test]
    fn round_trip_generated() {
        let atoms = atoms();
        let binary: [fn(Expr, Expr) -> Expr; 5] = [
            |a, b| add(vec![a, b]),
            |a, b| mult(vec![a, b]),
            sub,
            div,
            power,
        ];

        let mut pairs = Vec::new();
        for a in &atoms {
            for b in &atoms {
                for op in &binary {
                    pairs.push(op(a.clone(), b.clone()));
                }
            }
        }

        let mut failures = Vec::new();
        let mut check = |expr: &Expr| {
            let printed = expr.to_string();
            if parse(&printed).ok().as_ref() != Some(expr) {
                failures.push(printed);
            }
        };

        for pair in &pairs {
            check(pair);
            for atom in &atoms {
                check(&mult(vec![pair.clone(), atom.clone()]));
                check(&div(pair.clone(), atom.clone()));
                check(&sub(atom.clone(), pair.clone()));
            }
        }

        assert_eq!(failures, Vec::<String>::new());
    }

    #[test]
    fn round_trip_products() {
        let sources = [
            "3(x + 1) y",
            "(x + 1) / 2 * 3",
            "-(x + 1) * y",
            "(x + 1)(y - 1) * 4",
            "x / (2y)",
            "-3/4 x",
            "x - 3/4",
            "2^x * 3",
            "1 / (x + 1)^2",
            "x / 0",
            "-x / (y z^3)",
        ];

        for source in sources {
            assert_round_trip(source);
        }
    }

    #[test]
    fn round_trip_functions() {
        let sources = [
            "x^(1/2) + e^(-x)",
            "log(2, x) + ln(y)",
            "sec(x)^2 - 2csc(x) cot(x)",
            "(-2)^x + pi",
            "sqrt(x^2 + 1)",
            "exp(2x) / ln(x)",
        ];

        for source in sources {
            assert_round_trip(source);
        }
    }

    #[test]
    fn reserved_symbols() {
        assert_eq!(parse("e").unwrap(), Expr::euler());
        assert_eq!(parse("pi").unwrap(), Expr::pi());
        assert_eq!(parse("exp(x)").unwrap(), power(Expr::euler(), x()));
    }

    #[test]
    fn operators() {
        assert_eq!(parse("x - y").unwrap(), sub(x(), variable("y")));
        assert_eq!(parse("-x^2").unwrap(), negate(power(x(), constant(2))));
        assert_eq!(parse("2^3^2").unwrap(), constant(512));
        assert_eq!(parse("x / y / 2").unwrap(), div(div(x(), variable("y")), constant(2)));
    }

    #[test]
    fn functions() {
        assert_eq!(parse("log(x)").unwrap(), ln(x()));
        assert_eq!(parse("log(10, x)").unwrap(), log(constant(10), x()));
        assert_eq!(parse("sqrt(x)").unwrap(), power(x(), div(constant(1), constant(2))));
        assert_eq!(parse("cot(x)").unwrap(), trig(TrigFn::Cot, x()));
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(parse("2.75").unwrap(), div(constant(11), constant(4)));
        assert_eq!(parse("0.5x").unwrap(), div(x(), constant(2)));
        assert_eq!(parse("3.0").unwrap(), constant(3));
    }

    #[test]
    fn unknown_function() {
        let errors = parse("foo(x)").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].spans, vec![0..3]);
    }

    #[test]
    fn wrong_argument_count() {
        let errors = parse("sin(x, y)").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].spans, vec![0..4, 8..9]);

        assert!(parse("log(1, 2, 3)").is_err());
        assert!(parse("ln()").is_err());
    }

    #[test]
    fn collects_every_error() {
        let errors = parse("foo(x) + sin(99999999999999999999) + bar(1, 2)").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[1].spans, vec![13..33]);
    }

    #[test]
    fn literal_errors() {
        assert_eq!(parse("99999999999999999999").unwrap_err().len(), 1);
        assert_eq!(parse("0.00000000000000000000001").unwrap_err().len(), 1);
    }

    #[test]
    fn syntax_errors() {
        assert!(parse("x +").is_err());
        assert!(parse("(x").is_err());
        assert!(parse("x $ y").is_err());
    }
}
