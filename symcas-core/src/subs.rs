//! Substitution of sub-expressions.

use crate::{
    error::Error,
    eval::{exp, log},
    expr::{Expr, ExprKind, Func, Primary},
};

/// Returns `exp(exponent * log(base))`, the exponential form of a power.
fn exp_form(base: &Expr, exponent: &Expr) -> Result<Expr, Error> {
    Ok(exp(&(exponent * &log(base)?)))
}

/// Returns true if `expr` and `old` are a power and an exponential that denote the same value,
/// `b**e` and `exp(e*log(b))`, in either order.
fn is_exp_alias(expr: &Expr, old: &Expr) -> Result<bool, Error> {
    match (expr.kind(), old.kind()) {
        (ExprKind::Exp(base, exponent), _) if old.as_call(Func::Exp).is_some() => {
            Ok(exp_form(base, exponent)? == *old)
        },
        (ExprKind::Primary(Primary::Call(Func::Exp, _)), ExprKind::Exp(base, exponent)) => {
            Ok(exp_form(base, exponent)? == *expr)
        },
        _ => Ok(false),
    }
}

impl Expr {
    /// Replaces every occurrence of `old` in this expression with `new`.
    ///
    /// The result is rebuilt through the canonicalizing constructors, which is where it can fail:
    /// substituting `x = 0` into `x**-1` is a [`PoleError`](crate::error::PoleError).
    ///
    /// A power `b**e` is also recognized as an occurrence of `exp(e*log(b))`, and vice versa.
    pub fn subs(&self, old: &Expr, new: &Expr) -> Result<Expr, Error> {
        if self == old || is_exp_alias(self, old)? {
            return Ok(new.clone());
        }

        match self.kind() {
            ExprKind::Primary(Primary::Call(func, arg)) => Expr::call(*func, &arg.subs(old, new)?),
            ExprKind::Primary(_) => Ok(self.clone()),
            ExprKind::Add(terms) => {
                let terms = terms.iter()
                    .map(|term| term.subs(old, new))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::add(terms))
            },
            ExprKind::Mul(factors) => {
                let factors = factors.iter()
                    .map(|factor| factor.subs(old, new))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::mul(factors))
            },
            ExprKind::Exp(base, exponent) => base.subs(old, new)?.pow(&exponent.subs(old, new)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, exp, log, sin, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: i64) -> Expr {
        base.pow(&Expr::from(exponent)).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn replaces_symbols_and_reevaluates() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let expr = pow(&x, 2) + y.clone();
        assert_eq!(expr.subs(&x, &Expr::from(3)), Ok(Expr::from(9) + y.clone()));
        assert_eq!(sin(&x).subs(&x, &Expr::zero()), Ok(Expr::zero()));
    }

    #[test]
    fn replaces_whole_subtrees() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let expr = sin(&pow(&x, 2));
        assert_eq!(expr.subs(&pow(&x, 2), &y), Ok(sin(&y)));
    }

    #[test]
    fn substitution_can_hit_a_pole() {
        let x = Expr::symbol("x");
        assert!(matches!(pow(&x, -1).subs(&x, &Expr::zero()), Err(Error::Pole(_))));
    }

    #[test]
    fn power_and_exponential_forms_alias() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let log_x = log(&x).unwrap_or_else(|err| panic!("{err}"));
        let exp_form = exp(&(Expr::from(2) * log_x));

        assert_eq!(exp_form.subs(&pow(&x, 2), &y), Ok(y.clone()));
        assert_eq!(pow(&x, 2).subs(&exp_form, &y), Ok(y));
    }
}
