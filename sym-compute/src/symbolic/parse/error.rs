use ariadne::Fmt;
use sym_attrs::ErrorKind;
use sym_error::{ErrorKind, EXPR};

/// The function being called does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = [format!("this {}", "function".fg(EXPR))],
    help = "the supported functions are: sin, cos, tan, csc, sec, cot, ln, log, sqrt, exp",
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments to `{}`", name),
    labels = ["this function call", ""],
    help = format!("`{}` takes {}, but {} {} given", name, expected, found, if *found == 1 { "was" } else { "were" }),
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// A description of the accepted number of arguments, such as `1 argument`.
    pub expected: &'static str,

    /// The number of arguments that were given.
    pub found: usize,
}

/// A decimal literal has too many digits to be represented exactly as a fraction.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "decimal literal is too precise",
    labels = ["this literal"],
    help = format!("`{}` cannot be written as a fraction of two 64-bit integers", value),
)]
pub struct NonIntegerLiteral {
    /// The literal as written.
    pub value: String,
}

/// An integer literal does not fit in a 64-bit integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "integer literal is too large",
    labels = ["this literal"],
    help = format!("integers must be between {} and {}", i64::MIN, i64::MAX),
)]
pub struct IntegerOverflow {
    /// The literal as written.
    pub value: String,
}
