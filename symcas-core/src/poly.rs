//! Helpers for expressions that are sums of terms of the form `c * x**r`, such as the results of
//! series expansion.
//!
//! A term's degree in `x` is the sum of the rational exponents of its `x` factors. Every other
//! factor, including non-polynomial ones like `log(x)` or `x**y`, belongs to the coefficient.

use crate::{
    error::{Error, NotPolynomial},
    expr::{Expr, ExprKind},
    primitive::factorial,
};
use rug::Rational;

/// Splits a single term into its coefficient and its degree in `sym`.
fn split_term(term: &Expr, sym: &Expr) -> (Expr, Rational) {
    let mut degree = Rational::new();
    let mut coeff = Vec::new();
    for factor in term.factors() {
        if factor == sym {
            degree += 1;
            continue;
        }

        match factor.kind() {
            ExprKind::Exp(base, exponent) if base == sym => match exponent.as_rational() {
                Some(r) => degree += r,
                None => coeff.push(factor.clone()),
            },
            _ => coeff.push(factor.clone()),
        }
    }

    (Expr::mul(coeff), degree)
}

impl Expr {
    /// Returns the degree of this single term in `sym`.
    pub fn term_degree(&self, sym: &Expr) -> Rational {
        split_term(self, sym).1
    }

    /// Returns the lowest degree in `sym` among the terms of this expression.
    ///
    /// The expression should already be expanded. `0` has degree `0`.
    pub fn ldegree(&self, sym: &Expr) -> Rational {
        self.terms()
            .iter()
            .map(|term| term.term_degree(sym))
            .min()
            .unwrap_or_default()
    }

    /// Returns the coefficient and degree of the lowest-degree terms of this expression in `sym`.
    /// Coefficients of terms that share the lowest degree are added together.
    ///
    /// The expression should already be expanded. Returns a [`NotPolynomial`] error for `0`,
    /// which has no leading term.
    pub fn leadterm(&self, sym: &Expr) -> Result<(Expr, Rational), Error> {
        if self.is_zero() {
            return Err(NotPolynomial {
                expr: self.to_string(),
                symbol: sym.to_string(),
            }.into());
        }

        let degree = self.ldegree(sym);
        let coeff = self.terms()
            .iter()
            .map(|term| split_term(term, sym))
            .filter(|(_, d)| *d == degree)
            .map(|(c, _)| c);
        Ok((Expr::add(coeff), degree))
    }

    /// Drops every term of this expression whose degree in `sym` is `n` or higher.
    ///
    /// The expression should already be expanded.
    pub fn truncate(&self, sym: &Expr, n: &Rational) -> Expr {
        let kept = self.terms()
            .iter()
            .filter(|term| term.term_degree(sym) < *n)
            .cloned()
            .collect::<Vec<_>>();
        Expr::add(kept)
    }

    /// Returns true if this expression is a polynomial in `sym`: after expansion, every term is a
    /// coefficient free of `sym` times a non-negative integer power of `sym`.
    pub fn is_polynomial(&self, sym: &Expr) -> Result<bool, Error> {
        let name = sym.expect_symbol()?;
        let expanded = self.expand()?;
        Ok(expanded.terms().iter().all(|term| {
            let (coeff, degree) = split_term(term, sym);
            !coeff.has_symbol(name) && *degree.denom() == 1 && degree.cmp0().is_ge()
        }))
    }

    /// Returns the coefficient of `sym**n` in this polynomial, computed as the `n`-th derivative
    /// at `sym = 0` divided by `n!`.
    ///
    /// Returns a [`NotPolynomial`] error if this expression is not a polynomial in `sym`.
    pub fn coefficient(&self, sym: &Expr, n: u32) -> Result<Expr, Error> {
        if !self.is_polynomial(sym)? {
            return Err(NotPolynomial {
                expr: self.to_string(),
                symbol: sym.to_string(),
            }.into());
        }

        let derivative = self.diffn(sym, n)?.subs(sym, &Expr::zero())?;
        derivative.try_div(&Expr::from(factorial(n)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, log, primitive::rat, sin, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn degrees() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!((Expr::from(3) * pow(&x, 2) * y.clone()).term_degree(&x), rat(2));
        assert_eq!(pow(&x, rat((-1, 2))).term_degree(&x), rat((-1, 2)));
        assert_eq!(y.term_degree(&x), rat(0));

        let series = Expr::add([pow(&x, -1), Expr::one(), x.clone()]);
        assert_eq!(series.ldegree(&x), rat(-1));
    }

    #[test]
    fn leadterm_collects_coefficients() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let expr = Expr::add([Expr::from(2) * x.clone(), y.clone() * x.clone(), pow(&x, 3)]);
        assert_eq!(expr.leadterm(&x), Ok((Expr::from(2) + y, rat(1))));
        assert!(matches!(Expr::zero().leadterm(&x), Err(Error::NotPolynomial(_))));
    }

    #[test]
    fn truncation() {
        let x = Expr::symbol("x");
        let expr = Expr::add([pow(&x, -1), Expr::one(), x.clone(), pow(&x, 2)]);
        assert_eq!(expr.truncate(&x, &rat(1)), pow(&x, -1) + Expr::one());
    }

    #[test]
    fn polynomial_checks() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let poly = pow(&(x.clone() + y.clone()), 2);
        assert_eq!(poly.is_polynomial(&x), Ok(true));
        assert_eq!(pow(&x, -1).is_polynomial(&x), Ok(false));
        assert_eq!(sin(&x).is_polynomial(&x), Ok(false));
        assert_eq!(log(&y).map(|l| l * x.clone()).and_then(|e| e.is_polynomial(&x)), Ok(true));
    }

    #[test]
    fn coefficients() {
        // (x + y)**2 = x**2 + 2*x*y + y**2
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let poly = pow(&(x.clone() + y.clone()), 2);
        assert_eq!(poly.coefficient(&x, 0), Ok(pow(&y, 2)));
        assert_eq!(poly.coefficient(&x, 1), Ok(Expr::from(2) * y));
        assert_eq!(poly.coefficient(&x, 2), Ok(Expr::one()));
        assert_eq!(poly.coefficient(&x, 3), Ok(Expr::zero()));
        assert!(matches!(sin(&x).coefficient(&x, 1), Err(Error::NotPolynomial(_))));
    }
}
