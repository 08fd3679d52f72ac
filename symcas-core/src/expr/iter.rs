use super::{Expr, ExprKind, Primary};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given child was the last visited expression, meaning that every child
    /// of its parent has been yielded.
    ///
    /// Children are compared by address, not by value: `x + x**2` has two distinct `x` nodes.
    fn is_last_visited(&self, expr: Option<&'a Expr>) -> bool {
        match (self.last_visited, expr) {
            (Some(last_visited), Some(expr)) => std::ptr::eq(last_visited, expr),
            _ => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr.kind() {
                ExprKind::Primary(Primary::Call(_, arg)) => {
                    if self.is_last_visited(Some(arg)) {
                        return self.visit();
                    }
                    self.stack.push(arg);
                },
                ExprKind::Primary(_) => return self.visit(),
                ExprKind::Add(exprs) | ExprKind::Mul(exprs) => {
                    if exprs.is_empty() || self.is_last_visited(exprs.last()) {
                        return self.visit();
                    }
                    for child in exprs.iter().rev() {
                        self.stack.push(child);
                    }
                },
                ExprKind::Exp(base, exponent) => {
                    if self.is_last_visited(Some(exponent)) {
                        return self.visit();
                    }
                    self.stack.push(exponent);
                    self.stack.push(base);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Expr;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_order() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let expr = crate::sin(&(x.clone() * y.clone()));

        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "x*y", "sin(x*y)"]);
    }

    #[test]
    fn shared_children_are_visited_once_each() {
        let x = Expr::symbol("x");
        let expr = crate::exp(&x).pow(&x).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(expr.post_order_iter().count(), 4);
    }
}
