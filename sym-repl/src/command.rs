use sym_compute::symbolic::{
    expr::{self, Expr},
    parse::convert,
    Ctxt,
};
use sym_error::Error as SourceError;
use sym_parser::parser::{
    ast::{Call, Expr as AstExpr, Literal},
    Parser,
};
use tracing::debug;
use crate::error::{Error, ExpectedVariable, WrongCommandArgs};

/// What to differentiate with respect to.
#[derive(Debug, Clone, PartialEq)]
pub enum Wrt {
    /// A single variable, such as `x`.
    Var(String),

    /// Any other expression, such as `x^2`.
    Expr(Expr),
}

/// A line of input to the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the canonical form of an expression.
    Show(Expr),

    /// `diff(expr, x)` or `diff(expr, rhs)`.
    Diff {
        expr: Expr,
        wrt: Wrt,
    },

    /// `eval(expr, x, value)`.
    Eval {
        expr: Expr,
        var: String,
        value: Expr,
    },

    /// `approx(expr)` or `approx(expr, x, value)`.
    Approx {
        expr: Expr,
        binding: Option<(String, Expr)>,
    },

    /// `latex(expr)`.
    Latex(Expr),
}

/// Returns the name of the variable the argument consists of, or an error pointing at it.
fn expect_variable(arg: &AstExpr) -> Result<String, SourceError> {
    match arg.innermost() {
        AstExpr::Literal(Literal::Symbol(sym)) if !expr::is_reserved(&sym.name) => {
            Ok(sym.name.clone())
        },
        _ => Err(SourceError::new(vec![arg.span()], ExpectedVariable)),
    }
}

/// Converts every argument, collecting the errors of all of them.
fn convert_all<const N: usize>(args: [&AstExpr; N]) -> Result<[Expr; N], Vec<SourceError>> {
    let mut errors = Vec::new();
    let mut converted = Vec::with_capacity(N);
    for arg in args {
        match convert(arg) {
            Ok(expr) => converted.push(expr),
            Err(errs) => errors.extend(errs),
        }
    }

    match converted.try_into() {
        Ok(converted) if errors.is_empty() => Ok(converted),
        _ => Err(errors),
    }
}

/// Merges an error from a variable argument into the errors of the other arguments.
fn merge<T, U>(
    converted: Result<T, Vec<SourceError>>,
    var: Result<U, SourceError>,
) -> Result<(T, U), Vec<SourceError>> {
    match (converted, var) {
        (Ok(converted), Ok(var)) => Ok((converted, var)),
        (Ok(_), Err(err)) => Err(vec![err]),
        (Err(errs), Ok(_)) => Err(errs),
        (Err(mut errs), Err(err)) => {
            errs.push(err);
            Err(errs)
        },
    }
}

impl Command {
    /// Parses a line of input into a command.
    pub fn parse(input: &str) -> Result<Self, Vec<SourceError>> {
        let ast = Parser::new(input)
            .try_parse_full::<AstExpr>()
            .map_err(|err| vec![err])?;
        Self::from_ast(&ast)
    }

    fn from_ast(ast: &AstExpr) -> Result<Self, Vec<SourceError>> {
        let AstExpr::Call(call) = ast else {
            return convert(ast).map(Command::Show);
        };

        match (call.name.name.as_str(), call.args.as_slice()) {
            ("diff", [expr, wrt]) => {
                let wrt = match wrt.innermost() {
                    AstExpr::Literal(Literal::Symbol(_)) => expect_variable(wrt)
                        .map(Wrt::Var)
                        .map_err(|err| vec![err]),
                    _ => convert(wrt).map(Wrt::Expr),
                };
                let (expr, wrt) = match (convert(expr), wrt) {
                    (Ok(expr), Ok(wrt)) => (expr, wrt),
                    (Err(mut errs), Err(more)) => {
                        errs.extend(more);
                        return Err(errs);
                    },
                    (Err(errs), _) | (_, Err(errs)) => return Err(errs),
                };
                Ok(Command::Diff { expr, wrt })
            },
            ("eval", [expr, var, value]) => {
                let ([expr, value], var) = merge(convert_all([expr, value]), expect_variable(var))?;
                Ok(Command::Eval { expr, var, value })
            },
            ("approx", [expr]) => Ok(Command::Approx {
                expr: convert(expr)?,
                binding: None,
            }),
            ("approx", [expr, var, value]) => {
                let ([expr, value], var) = merge(convert_all([expr, value]), expect_variable(var))?;
                Ok(Command::Approx { expr, binding: Some((var, value)) })
            },
            ("latex", [expr]) => Ok(Command::Latex(convert(expr)?)),
            (name, _) => match usage(name) {
                Some(usage) => Err(vec![wrong_args(call, usage)]),
                None => convert(ast).map(Command::Show),
            },
        }
    }

    /// Runs the command, returning the text to print.
    pub fn run(&self, ctxt: &Ctxt) -> Result<String, Error> {
        let output = match self {
            Command::Show(expr) => {
                debug!(%expr, "show");
                Some(expr.to_string())
            },
            Command::Diff { expr, wrt: Wrt::Var(var) } => {
                debug!(%expr, %var, "differentiate");
                expr.derivative_with(var, ctxt).map(|d| d.to_string())
            },
            Command::Diff { expr, wrt: Wrt::Expr(rhs) } => {
                debug!(%expr, %rhs, "differentiate with respect to expression");
                expr.derivative_wrt_with(rhs, ctxt).map(|d| d.to_string())
            },
            Command::Eval { expr, var, value } => {
                debug!(%expr, %var, %value, "evaluate");
                expr.evaluate_with(var, value, ctxt).map(|v| v.to_string())
            },
            Command::Approx { expr, binding } => {
                debug!(%expr, ?binding, "approximate");
                match binding {
                    Some((var, value)) => value.approximate(&[])
                        .and_then(|value| expr.approximate(&[(var.as_str(), value)])),
                    None => expr.approximate(&[]),
                }.map(|v| v.to_string())
            },
            Command::Latex(expr) => {
                debug!(%expr, "latex");
                Some(expr.as_latex())
            },
        };

        output.ok_or(Error::InvalidInput)
    }
}

/// Returns how the command with the given name is called, if it is a command.
fn usage(name: &str) -> Option<&'static str> {
    match name {
        "diff" => Some("diff(expr, x) or diff(expr, rhs)"),
        "eval" => Some("eval(expr, x, value)"),
        "approx" => Some("approx(expr) or approx(expr, x, value)"),
        "latex" => Some("latex(expr)"),
        _ => None,
    }
}

fn wrong_args(call: &Call, usage: &'static str) -> SourceError {
    SourceError::new(call.outer_span().to_vec(), WrongCommandArgs {
        name: call.name.name.clone(),
        usage,
    })
}
