use crate::{
    parser::{
        ast::{expr::Expr, unary::Unary},
        error::Error,
        fmt::{fmt_pow, Latex},
        token::op::{BinOp, BinOpKind},
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns the precedence and associativity of the operator that the given token would begin. A
/// token that starts an operand begins an implicit multiplication.
fn upcoming_op(kind: TokenKind) -> Option<(Precedence, Associativity)> {
    if kind.starts_operand() {
        return Some((Precedence::Factor, Associativity::Left));
    }

    BinOpKind::from_token(kind).map(|op| (op.precedence(), op.associativity()))
}

impl BinOpKind {
    /// Returns the binary operator kind the given token represents, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Exp => Some(Self::Exp),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            _ => None,
        }
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before we build the corresponding AST
    /// node, we check if the operator after `2` has higher precedence than `+`. It does, so we
    /// parse the expression starting with `2` first, and get `2 * 3` as the right-hand-side of
    /// the `1 +` node.
    ///
    /// An operand directly following `rhs` (as in `1 + 2x`) is treated as an implicit
    /// multiplication operator.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some((next_precedence, next_associativity)) = input.peek_kind().and_then(upcoming_op) {
            if next_precedence > precedence
                || (next_precedence == precedence && next_associativity == Associativity::Right)
            {
                // the operator binds tighter, so it takes `rhs` as its left-hand side
                rhs = Self::parse_expr(input, rhs, next_precedence)?;
            } else {
                // lower precedence, or equal precedence and left-associative, as in `1 * 2 + 3`
                // or `1 * 2 * 3`; let the caller build `lhs op rhs` first
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator (with at least the given precedence) and a right-hand-side.
    ///
    /// Each iteration of the loop consumes at least one token, since it is only entered when the
    /// next token is an operator or the start of an operand.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            match input.peek_kind() {
                Some(kind) if BinOpKind::from_token(kind).map_or(false, |op| op.precedence() >= precedence) => {
                    let op = input.try_parse::<BinOp>()?;
                    let rhs = Unary::parse_or_lower(input)?;
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                Some(kind) if kind.starts_operand() && Precedence::Factor >= precedence => {
                    let rhs = Unary::parse_or_lower(input)?;
                    let op = BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: lhs.span().end..rhs.span().start,
                    };
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                _ => break,
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            _ => {
                self.lhs.fmt_latex(f)?;
                self.op.fmt_latex(f)?;
                self.rhs.fmt_latex(f)
            },
        }
    }
}
