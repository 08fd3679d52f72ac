//! Symbolic differentiation.
//!
//! Every rule builds its result through the canonicalizing constructors, so trivial terms
//! (`0*f`, `1*f`, `f + 0`) vanish as the derivative is assembled.

mod function;

use crate::{error::Error, eval::log, expr::{Expr, ExprKind, Primary}};

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], with: &str) -> Result<Expr, Error> {
    let derivatives = terms.iter()
        .map(|term| derivative(term, with))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::add(derivatives))
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[Expr], with: &str) -> Result<Expr, Error> {
    let mut terms = Vec::with_capacity(factors.len());
    for derivative_index in 0..factors.len() {
        let factor_derivative = derivative(&factors[derivative_index], with)?;
        if factor_derivative.is_zero() {
            continue;
        }

        let term = factors.iter()
            .enumerate()
            .map(|(index, factor)| if index == derivative_index {
                factor_derivative.clone()
            } else {
                factor.clone()
            });
        terms.push(Expr::mul(term));
    }

    Ok(Expr::add(terms))
}

/// `(b**e)' = b**e * (e*log(b))'`
///
/// This single rule covers the power rule, the exponential rule, and every mix of the two.
fn power_rule(expr: &Expr, base: &Expr, exponent: &Expr, with: &str) -> Result<Expr, Error> {
    let log_form = exponent * &log(base)?;
    Ok(expr * &derivative(&log_form, with)?)
}

/// Computes the derivative of the given expression with respect to the symbol `with`.
pub(crate) fn derivative(f: &Expr, with: &str) -> Result<Expr, Error> {
    if !f.has_symbol(with) {
        return Ok(Expr::zero());
    }

    match f.kind() {
        ExprKind::Primary(Primary::Symbol(_)) => Ok(Expr::one()),
        ExprKind::Primary(Primary::Call(func, arg)) => function::function_derivative(*func, arg, with),
        ExprKind::Primary(Primary::Number(_) | Primary::ImaginaryUnit) => Ok(Expr::zero()),
        ExprKind::Add(terms) => sum_rule(terms, with),
        ExprKind::Mul(factors) => product_rule(factors, with),
        ExprKind::Exp(base, exponent) => power_rule(f, base, exponent, with),
    }
}

impl Expr {
    /// Returns the derivative of this expression with respect to `sym`.
    ///
    /// Returns an [`ExpectedSymbol`](crate::error::ExpectedSymbol) error if `sym` is not a
    /// symbol.
    pub fn diff(&self, sym: &Expr) -> Result<Expr, Error> {
        derivative(self, sym.expect_symbol()?)
    }

    /// Returns the `n`-th derivative of this expression with respect to `sym`.
    pub fn diffn(&self, sym: &Expr, n: u32) -> Result<Expr, Error> {
        let with = sym.expect_symbol()?;
        let mut result = self.clone();
        for _ in 0..n {
            if result.is_zero() {
                break;
            }
            result = derivative(&result, with)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{cos, error::Error, exp, log, primitive::rat, sin, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap_or_else(|err| panic!("{err}"))
    }

    fn diff(expr: &Expr, sym: &Expr) -> Expr {
        expr.diff(sym).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn power_rule() {
        let x = Expr::symbol("x");
        assert_eq!(diff(&pow(&x, 3), &x), Expr::from(3) * pow(&x, 2));
        assert_eq!(diff(&pow(&x, -1), &x), -pow(&x, -2));
        assert_eq!(diff(&pow(&x, rat((1, 2))), &x), Expr::from(rat((1, 2))) * pow(&x, rat((-1, 2))));
    }

    #[test]
    fn polynomial() {
        // x**2 + x + 1
        let x = Expr::symbol("x");
        let poly = Expr::add([pow(&x, 2), x.clone(), Expr::one()]);
        assert_eq!(diff(&poly, &x), Expr::add([Expr::from(2) * x.clone(), Expr::one()]));
        assert_eq!(poly.diffn(&x, 2), Ok(Expr::from(2)));
        assert_eq!(poly.diffn(&x, 3), Ok(Expr::zero()));
    }

    #[test]
    fn exponential_with_symbolic_base() {
        // (a**x)' = a**x * log(a)
        let x = Expr::symbol("x");
        let a = Expr::symbol("a");
        let expr = pow(&a, x.clone());
        let expected = expr.clone() * log(&a).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(diff(&expr, &x), expected);
    }

    #[test]
    fn exponential_with_base_e() {
        // (E**x)' = E**x
        let x = Expr::symbol("x");
        let expr = pow(&exp(&Expr::one()), x.clone());
        assert_eq!(expr, exp(&x));
        assert_eq!(diff(&expr, &x), expr);
    }

    #[test]
    fn chain_rule() {
        let x = Expr::symbol("x");
        let two_x = Expr::from(2) * x.clone();
        assert_eq!(diff(&sin(&two_x), &x), Expr::from(2) * cos(&two_x));
        assert_eq!(diff(&cos(&x), &x), -sin(&x));
        assert_eq!(diff(&exp(&two_x), &x), Expr::from(2) * exp(&two_x));
    }

    #[test]
    fn product_rule() {
        let x = Expr::symbol("x");
        let expr = x.clone() * sin(&x);
        assert_eq!(diff(&expr, &x), sin(&x) + x.clone() * cos(&x));
    }

    #[test]
    fn other_symbols_are_constants() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(diff(&(y.clone() * x.clone()), &x), y.clone());
        assert_eq!(diff(&pow(&y, 2), &x), Expr::zero());
    }

    #[test]
    fn non_symbol_variable() {
        let x = Expr::symbol("x");
        assert!(matches!(x.diff(&Expr::from(2)), Err(Error::ExpectedSymbol(_))));
    }
}
