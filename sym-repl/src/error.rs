use ariadne::Fmt;
use sym_attrs::ErrorKind;
use sym_error::{Error as SourceError, ErrorKind, EXPR};

/// A command was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments to `{}`", name),
    labels = ["this command", ""],
    help = format!("usage: {}", usage),
)]
pub struct WrongCommandArgs {
    /// The name of the command.
    pub name: String,

    /// How the command is meant to be called.
    pub usage: &'static str,
}

/// A command argument that names a variable was something else.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a variable name",
    labels = [format!("this must be a {}", "variable".fg(EXPR))],
    help = "`e` and `pi` are constants and cannot be used as variables",
)]
pub struct ExpectedVariable;

/// Utility enum to package errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// Errors that occurred while parsing the command.
    Parse(Vec<SourceError>),

    /// The command parsed, but its result is undefined.
    InvalidInput,
}

impl Error {
    /// Report the errors in this [`Error`] to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Parse(errs) => errs.iter().for_each(|err| {
                if let Err(io_err) = err.report_to_stderr("input", input) {
                    eprintln!("{}", io_err);
                }
            }),
            Self::InvalidInput => eprintln!("error: invalid input(s)"),
        }
    }
}

impl From<Vec<SourceError>> for Error {
    fn from(errs: Vec<SourceError>) -> Self {
        Self::Parse(errs)
    }
}
