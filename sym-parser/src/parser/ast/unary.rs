use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        fmt::Latex,
        token::op::UnaryOp,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Negation binds looser than exponentiation, so `-x^2` is
/// parsed as `-(x^2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_kind() != Some(TokenKind::Sub) {
            return input.try_parse::<Primary>().map(Expr::from);
        }

        let op = input.try_parse::<UnaryOp>()?;
        let operand = {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let span = op.span.start..operand.span().end;
        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt_latex(f)?;
        self.operand.fmt_latex(f)
    }
}
