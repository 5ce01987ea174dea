use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        fmt::Latex,
        token::OpenParen,
        Parse,
        Parser,
    },
    tokenizer::{Token, TokenKind},
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Consumes the token that should close the parenthesis opened at `open_span`. If `allow_comma`
/// is set, a comma is also accepted, which is how argument lists continue.
pub(crate) fn expect_close<'source>(
    input: &mut Parser<'source>,
    open_span: &Range<usize>,
    allow_comma: bool,
) -> Result<Token<'source>, Error> {
    let token = input.next_token()
        .map_err(|_| Error::new(vec![open_span.clone()], kind::UnclosedParenthesis { opening: true }))?;

    match token.kind {
        TokenKind::CloseParen => Ok(token),
        TokenKind::Comma if allow_comma => Ok(token),
        TokenKind::Symbol => Err(Error::new(vec![token.span], kind::InvalidCharacter {
            character: token.lexeme.to_owned(),
        })),
        found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: if allow_comma {
                &[TokenKind::Comma, TokenKind::CloseParen]
            } else {
                &[TokenKind::CloseParen]
            },
            found,
        })),
    }
}

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;

        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let close = input.next_token()?;
            return Err(Error::new(vec![open.span.start..close.span.end], kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close = expect_close(input, &open.span, false)?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\left(")?;
        self.expr.fmt_latex(f)?;
        write!(f, "\\right)")
    }
}
