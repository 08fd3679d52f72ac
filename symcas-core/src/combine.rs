//! Combining powers of exponentials.
//!
//! Canonicalization rewrites `exp(a)**b` as `exp(a*b)` only when `a` is free of symbols, since the
//! identity does not hold on every branch of `exp(a)**b` once `a` may be complex.
//! [`Expr::combine`] applies it everywhere, on request.

use crate::{
    error::Error,
    eval::exp,
    expr::{Expr, ExprKind, Func, Primary},
};

impl Expr {
    /// Rewrites every power of an exponential, `exp(a)**b`, as `exp(a*b)`, including those whose
    /// argument contains symbols. Function arguments are combined too.
    pub fn combine(&self) -> Result<Expr, Error> {
        match self.kind() {
            ExprKind::Primary(Primary::Call(func, arg)) => Expr::call(*func, &arg.combine()?),
            ExprKind::Primary(_) => Ok(self.clone()),
            ExprKind::Add(terms) => {
                let terms = terms.iter()
                    .map(Expr::combine)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::add(terms))
            },
            ExprKind::Mul(factors) => {
                let factors = factors.iter()
                    .map(Expr::combine)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::mul(factors))
            },
            ExprKind::Exp(base, exponent) => {
                let base = base.combine()?;
                let exponent = exponent.combine()?;
                match base.as_call(Func::Exp) {
                    Some(arg) => {
                        log::debug!("combining ({})**{}", base, exponent);
                        Ok(exp(&(arg * &exponent)))
                    },
                    None => base.pow(&exponent),
                }
            },
        }
    }
}
