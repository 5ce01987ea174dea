use std::fmt::{Display, Formatter, Result};
use super::{ast::expr::Expr, Precedence};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Helper to format powers.
pub fn fmt_pow(f: &mut Formatter, left: &Expr, right: &Expr) -> Result {
    let left = left.innermost();
    let needs_paren = match left {
        Expr::Unary(unary) => unary.op.precedence() <= Precedence::Exp,
        Expr::Binary(binary) => binary.op.precedence() <= Precedence::Exp,
        _ => false,
    };

    if needs_paren {
        write!(f, "\\left(")?;
        left.fmt_latex(f)?;
        write!(f, "\\right)")?;
    } else {
        left.fmt_latex(f)?;
    }

    write!(f, "^{{")?;
    right.innermost().fmt_latex(f)?;
    write!(f, "}}")
}
