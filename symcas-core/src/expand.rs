//! Expansion: distributing products over sums.

use crate::{
    consts::MAX_EXPAND_POWER,
    error::Error,
    expr::{Expr, ExprKind, Primary},
};

/// Returns true if the expression is a sum, or a product with a sum among its factors.
fn needs_distribution(expr: &Expr) -> bool {
    match expr.kind() {
        ExprKind::Add(_) => true,
        ExprKind::Mul(factors) => factors.iter().any(|factor| matches!(factor.kind(), ExprKind::Add(_))),
        _ => false,
    }
}

/// Multiplies two expanded expressions together, distributing over their terms.
fn distribute(lhs: &Expr, rhs: &Expr) -> Expr {
    let mut terms = Vec::with_capacity(lhs.terms().len() * rhs.terms().len());
    for a in lhs.terms() {
        for b in rhs.terms() {
            let product = a * b;

            // combining factors can turn a product back into a sum: `(x+1)**(1/2) * (x+1)**(1/2)`
            if matches!(product.kind(), ExprKind::Mul(_)) && needs_distribution(&product) {
                terms.push(distribute_all(product.factors()));
            } else {
                terms.push(product);
            }
        }
    }
    Expr::add(terms)
}

/// Multiplies a list of expanded factors together.
fn distribute_all(factors: &[Expr]) -> Expr {
    factors.iter().fold(Expr::one(), |acc, factor| distribute(&acc, factor))
}

impl Expr {
    /// Expands this expression, distributing products over sums and multiplying out positive
    /// integer powers of sums.
    ///
    /// Powers larger than [`MAX_EXPAND_POWER`] are left as powers of the expanded base. Function
    /// arguments are expanded too.
    pub fn expand(&self) -> Result<Expr, Error> {
        match self.kind() {
            ExprKind::Primary(Primary::Call(func, arg)) => Expr::call(*func, &arg.expand()?),
            ExprKind::Primary(_) => Ok(self.clone()),
            ExprKind::Add(terms) => {
                let terms = terms.iter()
                    .map(Expr::expand)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::add(terms))
            },
            ExprKind::Mul(factors) => {
                let factors = factors.iter()
                    .map(Expr::expand)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(distribute_all(&factors))
            },
            ExprKind::Exp(base, exponent) => {
                let base = base.expand()?;
                let exponent = exponent.expand()?;
                let power = exponent.as_integer()
                    .and_then(|n| n.to_u32())
                    .filter(|n| (1..=MAX_EXPAND_POWER).contains(n));

                match power {
                    Some(n) if matches!(base.kind(), ExprKind::Add(_)) => {
                        log::debug!("expanding ({})**{}", base, n);
                        Ok((1..n).fold(base.clone(), |acc, _| distribute(&acc, &base)))
                    },
                    _ => base.pow(&exponent),
                }
            },
        }
    }
}
