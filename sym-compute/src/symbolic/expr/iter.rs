use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Expressions still to be visited, each with a flag indicating whether its children have
    /// already been pushed onto the stack.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![(expr, false)],
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            let children = expr.children();
            if children.is_empty() {
                return Some(expr);
            }

            self.stack.push((expr, true));
            for child in children.into_iter().rev() {
                self.stack.push((child, false));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::simplify::{constant, power, trig, variable};
    use crate::symbolic::expr::TrigFn;
    use super::*;

    #[test]
    fn post_order() {
        // sin(x^2)
        let x = variable("x");
        let square = power(x.clone(), constant(2));
        let expr = trig(TrigFn::Sin, square.clone());

        let visited = expr.post_order_iter().collect::<Vec<_>>();
        assert_eq!(visited, vec![&x, &constant(2), &square, &expr]);
    }
}
