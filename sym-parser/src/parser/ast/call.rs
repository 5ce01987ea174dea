use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren::expect_close},
        error::Error,
        fmt::Latex,
        token::{Name, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `log(2, x)`. The opening parenthesis must directly follow the name;
/// `x (y)` is parsed as implicit multiplication instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        let open = input.try_parse::<OpenParen>()?;
        let mut args = Vec::new();

        let close = if input.peek_kind() == Some(TokenKind::CloseParen) {
            input.next_token()?
        } else {
            loop {
                args.push(input.try_parse::<Expr>()?);
                let token = expect_close(input, &open.span, true)?;
                if token.kind == TokenKind::CloseParen {
                    break token;
                }
            }
        };

        Ok(Self {
            name: LitSym {
                name: name.lexeme,
                span: name.span.clone(),
            },
            args,
            span: name.span.start..close.span.end,
            paren_span: open.span.start..close.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                write!(f, "{}, ", arg)?;
            }
            last.fmt(f)?;
        }
        write!(f, ")")
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.name.name.as_str(), self.args.as_slice()) {
            ("sqrt", [arg]) => {
                write!(f, "\\sqrt{{")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            ("exp", [arg]) => {
                write!(f, "e^{{")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            ("log", [base, arg]) => {
                write!(f, "\\log_{{")?;
                base.innermost().fmt_latex(f)?;
                write!(f, "}}\\left(")?;
                arg.fmt_latex(f)?;
                write!(f, "\\right)")
            },
            (name, args) => {
                match name {
                    "sin" | "cos" | "tan" | "csc" | "sec" | "cot" | "ln" | "log" => {
                        write!(f, "\\{}", name)?;
                    },
                    _ => write!(f, "\\mathrm{{{}}}", name)?,
                }
                write!(f, "\\left(")?;
                if let Some((last, args)) = args.split_last() {
                    for arg in args {
                        arg.fmt_latex(f)?;
                        write!(f, ", ")?;
                    }
                    last.fmt_latex(f)?;
                }
                write!(f, "\\right)")
            },
        }
    }
}
