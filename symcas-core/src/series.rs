//! Series expansion about `0`.
//!
//! The generic strategy is a Taylor expansion: differentiate, substitute `x = 0`, and divide by
//! the factorial. When the expression has a pole at `0`, the substitution raises a
//! [`PoleError`](crate::error::PoleError), and the expansion falls back to a strategy specific to
//! the kind of node that caused it (a geometric series for reciprocals, a shift by the leading
//! degree for other powers, and so on). Each fallback consumes the pole exactly once. Any other
//! error, and a pole that survives the fallback, is returned to the caller.

use crate::{
    consts::{MAX_LEADING_ORDERS, MAX_SERIES_DEPTH},
    error::{DepthExceeded, Error},
    eval::{exp, log},
    expr::{Expr, ExprKind, Func, Primary},
    primitive::factorial,
};
use rug::Rational;

/// State of one series expansion.
struct Series<'a> {
    /// The expansion variable.
    sym: &'a Expr,

    /// How many nested expansions are in progress.
    depth: usize,
}

impl<'a> Series<'a> {
    /// Expands `expr` to order `n` one level deeper.
    fn nested(&self, expr: &Expr, n: u32) -> Result<Expr, Error> {
        Series { sym: self.sym, depth: self.depth + 1 }.expand(expr, n)
    }

    /// Returns `sym**exponent`.
    fn sym_pow(&self, exponent: Rational) -> Result<Expr, Error> {
        self.sym.pow(&Expr::from(exponent))
    }

    /// Drops the terms of `expr` of degree `n` or higher.
    fn truncate(&self, expr: &Expr, n: u32) -> Expr {
        expr.truncate(self.sym, &Rational::from(n))
    }

    /// Returns the series of `expr` with terms of degree less than `n`.
    fn expand(&self, expr: &Expr, n: u32) -> Result<Expr, Error> {
        if self.depth > MAX_SERIES_DEPTH {
            return Err(DepthExceeded { limit: MAX_SERIES_DEPTH }.into());
        }

        if expr == self.sym || !expr.has(self.sym) {
            return Ok(expr.clone());
        }

        match expr.kind() {
            ExprKind::Add(terms) => self.add_series(terms, n),
            ExprKind::Mul(factors) => self.mul_series(factors, n),
            ExprKind::Primary(Primary::Call(Func::Log, arg)) => self.log_series(arg, n),
            ExprKind::Exp(base, exponent) => self.pow_series(expr, base, exponent, n),
            ExprKind::Primary(_) => self.taylor(expr, n),
        }
    }

    /// `sum_{i<n} f^(i)(0) / i! * x**i`
    ///
    /// Returns a [`PoleError`](crate::error::PoleError) if any derivative has a pole at `0`.
    fn taylor(&self, expr: &Expr, n: u32) -> Result<Expr, Error> {
        let zero = Expr::zero();
        let mut terms = Vec::with_capacity(n as usize);
        let mut derivative = expr.clone();
        for i in 0..n {
            if i > 0 {
                derivative = derivative.diff(self.sym)?;
            }
            let coeff = derivative.subs(self.sym, &zero)?
                .try_div(&Expr::from(factorial(i)))?;
            terms.push(coeff * self.sym.pow(&Expr::from(i64::from(i)))?);
        }
        Ok(Expr::add(terms))
    }

    /// Termwise expansion of a sum.
    fn add_series(&self, terms: &[Expr], n: u32) -> Result<Expr, Error> {
        let terms = terms.iter()
            .map(|term| self.nested(term, n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.truncate(&Expr::add(terms), n))
    }

    /// Product of the series of the factors.
    ///
    /// A factor with a pole of order `k` lowers the degree of every term of the product by `k`, so
    /// every other factor is expanded `k` orders further.
    fn mul_series(&self, factors: &[Expr], n: u32) -> Result<Expr, Error> {
        let mut series = factors.iter()
            .map(|factor| self.nested(factor, n))
            .collect::<Result<Vec<_>, _>>()?;
        let pole_orders = series.iter()
            .map(|s| {
                let degree = s.ldegree(self.sym);
                if degree.cmp0().is_lt() {
                    (-degree).ceil().numer().to_u32().unwrap_or(0)
                } else {
                    0
                }
            })
            .collect::<Vec<_>>();
        let total_pole: u32 = pole_orders.iter().sum();

        for (i, factor) in factors.iter().enumerate() {
            let extra = total_pole - pole_orders[i];
            if extra > 0 {
                series[i] = self.nested(factor, n + extra)?;
            }
        }

        let product = Expr::mul(series).expand()?;
        Ok(self.truncate(&product, n))
    }

    /// Expands `base` far enough that `base**exponent` keeps every term of degree less than `n`.
    ///
    /// If the base has leading degree `l`, its term of degree `d` contributes to degree
    /// `d + l*(exponent - 1)` of the power, so the base is expanded to order `n - l*(exponent - 1)`.
    /// Finding `l` may take more than `n` orders when the low-order terms of the base cancel.
    fn leading_series(&self, base: &Expr, exponent: &Rational, n: u32) -> Result<Expr, Error> {
        let mut order = n;
        let mut g = self.nested(base, order)?;
        while g.is_zero() && order < n.saturating_add(MAX_LEADING_ORDERS) {
            order += 1;
            g = self.nested(base, order)?;
        }

        let (_, l) = g.leadterm(self.sym)?;
        let shift = (exponent.clone() - 1) * l;
        let needed = orders(&(Rational::from(n) - shift));
        if needed > order {
            g = self.nested(base, needed)?;
        }
        Ok(g)
    }

    /// Splits an expanded series `g` into `(c0, e0, phi)`, where `g = c0 * x**e0 * (1 + phi)` and
    /// `phi` vanishes at `0`.
    fn factor_leadterm(&self, g: &Expr) -> Result<(Expr, Rational, Expr), Error> {
        let (c0, e0) = g.leadterm(self.sym)?;
        let lead = &c0 * &self.sym_pow(e0.clone())?;
        let phi = (g.try_div(&lead)? - Expr::one()).expand()?;
        Ok((c0, e0, phi))
    }

    /// `phi**i` for every `i >= 0` whose lowest degree is less than `limit`.
    fn powers(&self, phi: &Expr, limit: &Rational) -> Result<Vec<Expr>, Error> {
        let step = phi.ldegree(self.sym);
        let count = if phi.is_zero() {
            1
        } else if step.cmp0().is_gt() {
            orders(&Rational::from(limit / &step)).max(1)
        } else {
            orders(limit).max(1)
        };

        let mut powers = Vec::new();
        let mut power = Expr::one();
        for i in 0..count {
            if i > 0 {
                power = (&power * phi).expand()?;
            }
            powers.push(power.clone());
        }
        Ok(powers)
    }

    /// `log(u) = log(c0) + e0*log(x) + sum_{i>=1} (-1)**(i+1) * phi**i / i`
    fn log_series(&self, arg: &Expr, n: u32) -> Result<Expr, Error> {
        let g = self.leading_series(arg, &Rational::new(), n)?;
        let (c0, e0, phi) = self.factor_leadterm(&g)?;

        let mut terms = vec![log(&c0)?, Expr::from(e0) * log(self.sym)?];
        for (i, power) in self.powers(&phi, &Rational::from(n))?.into_iter().enumerate().skip(1) {
            let sign = if i % 2 == 1 { 1 } else { -1 };
            let coeff = Expr::from(Rational::from((sign, i as u32)));
            terms.push(coeff * power);
        }

        let sum = Expr::add(terms).expand()?;
        Ok(self.truncate(&sum, n))
    }

    /// Series of `base**exponent`.
    fn pow_series(&self, expr: &Expr, base: &Expr, exponent: &Expr, n: u32) -> Result<Expr, Error> {
        if exponent.has(self.sym) {
            return self.symbolic_exponent_series(expr, base, exponent, n);
        }

        if base == self.sym {
            return Ok(expr.clone());
        }

        // at least one term, so that a pole shows up even when only negative degrees are kept
        match self.taylor(expr, n.max(1)) {
            Ok(series) => return Ok(self.truncate(&series, n)),
            Err(Error::Pole(pole)) => {
                log::debug!("series of {} hit a pole ({}), trying another strategy", expr, pole.expr);
            },
            Err(err) => return Err(err),
        }

        match exponent.as_rational() {
            _ if exponent.is_minus_one() => self.reciprocal_series(base, n),
            Some(e) => self.shifted_series(base, exponent, e, n),
            None => {
                log::debug!("expanding {} as an exponential", expr);
                self.nested(&exp(&(exponent * &log(base)?)), n)
            },
        }
    }

    /// `1/g = x**-e0 / c0 * sum_{i>=0} (-phi)**i`
    fn reciprocal_series(&self, base: &Expr, n: u32) -> Result<Expr, Error> {
        log::debug!("expanding 1/({}) as a geometric series", base);
        let g = self.leading_series(base, &Rational::from(-1), n)?;
        let (c0, e0, phi) = self.factor_leadterm(&g)?;
        let neg_phi = (-&phi).expand()?;

        // the i-th term lands on degree `deg(phi**i) - e0`
        let terms = self.powers(&neg_phi, &(Rational::from(n) + &e0))?;
        let scale = self.sym_pow(-e0)?.try_div(&c0)?;
        let sum = (Expr::add(terms) * scale).expand()?;
        Ok(self.truncate(&sum, n))
    }

    /// `g**e = x**(l*e) * (g * x**-l)**e`, where `l` is the lowest degree of `g`, so the second
    /// factor has no pole.
    fn shifted_series(&self, base: &Expr, exponent: &Expr, e: &Rational, n: u32) -> Result<Expr, Error> {
        let g = self.leading_series(base, e, n)?;
        let l = g.ldegree(self.sym);
        log::debug!("expanding ({})**{} shifted by degree {}", base, exponent, l);

        let shifted = (&g * &self.sym_pow(Rational::from(-&l))?).expand()?;
        let scale_degree = Rational::from(&l * e);
        let order = orders(&(Rational::from(n) - &scale_degree));
        let inner = self.nested(&shifted.pow(exponent)?, order)?;

        let scale = self.sym_pow(scale_degree)?;
        let product = (inner * scale).expand()?;
        Ok(self.truncate(&product, n))
    }

    /// Series of a power whose exponent depends on the expansion variable.
    fn symbolic_exponent_series(&self, expr: &Expr, base: &Expr, exponent: &Expr, n: u32) -> Result<Expr, Error> {
        match self.taylor(expr, n) {
            Err(Error::Pole(pole)) => log::debug!("series of {} hit a pole ({})", expr, pole.expr),
            other => return other,
        }

        let base_series = self.nested(base, n)?;
        let exponent_series = self.nested(exponent, n)?;
        match base_series.pow(&exponent_series).and_then(|p| self.taylor(&p, n)) {
            Err(Error::Pole(pole)) => log::debug!("series of {} hit a second pole ({})", expr, pole.expr),
            other => return other,
        }

        log::debug!("expanding {} as an exponential", expr);
        self.nested(&exp(&(exponent * &log(base)?)), n)
    }
}

/// Smallest order that keeps every term of degree less than `degree`; `0` if `degree` is not
/// positive.
fn orders(degree: &Rational) -> u32 {
    if degree.cmp0().is_le() {
        return 0;
    }
    degree.clone().ceil().numer().to_u32().unwrap_or(u32::MAX)
}

impl Expr {
    /// Returns the series expansion of this expression about `sym = 0`, keeping the terms whose
    /// degree in `sym` is less than `n`.
    ///
    /// Laurent terms (negative powers) and fractional powers of `sym` are produced when the
    /// expression has a pole or a branch point at `0`.
    pub fn series(&self, sym: &Expr, n: u32) -> Result<Expr, Error> {
        sym.expect_symbol()?;
        Series { sym, depth: 0 }.expand(self, n)
    }
}

#[cfg(test)]
mod tests {
    use crate::{cos, exp, log, primitive::rat, sin, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap_or_else(|err| panic!("{err}"))
    }

    fn series(expr: &Expr, sym: &Expr, n: u32) -> Expr {
        expr.series(sym, n).unwrap_or_else(|err| panic!("{err}"))
    }

    fn r(n: i64, d: i64) -> Expr {
        Expr::from(rat((n, d)))
    }

    #[test]
    fn constants_and_the_variable() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(series(&y, &x, 3), y);
        assert_eq!(series(&x, &x, 3), x.clone());
        assert_eq!(series(&pow(&x, -2), &x, 3), pow(&x, -2));
    }

    #[test]
    fn taylor_series() {
        let x = Expr::symbol("x");
        assert_eq!(
            series(&exp(&x), &x, 4),
            Expr::add([Expr::one(), x.clone(), r(1, 2) * pow(&x, 2), r(1, 6) * pow(&x, 3)]),
        );
        assert_eq!(
            series(&cos(&x), &x, 4),
            Expr::one() - r(1, 2) * pow(&x, 2),
        );
        assert_eq!(series(&exp(&x), &x, 1), Expr::one());
        assert_eq!(series(&exp(&x), &x, 2), Expr::one() + x.clone());
    }

    #[test]
    fn reciprocal_without_pole() {
        // (1+x)**-1 = 1 - x + x**2
        let x = Expr::symbol("x");
        let expr = pow(&(Expr::one() + x.clone()), -1);
        assert_eq!(
            series(&expr, &x, 3),
            Expr::add([Expr::one(), -x.clone(), pow(&x, 2)]),
        );
    }

    #[test]
    fn sinc() {
        // sin(x)/x = 1 - x**2/6
        let x = Expr::symbol("x");
        let expr = sin(&x) * pow(&x, -1);
        assert_eq!(series(&expr, &x, 3), Expr::one() - r(1, 6) * pow(&x, 2));
    }

    #[test]
    fn reciprocal_with_pole() {
        // 1/(x + x**2) = 1/x - 1 + x - x**2 + ...
        let x = Expr::symbol("x");
        let expr = pow(&(x.clone() + pow(&x, 2)), -1);
        assert_eq!(
            series(&expr, &x, 3),
            Expr::add([pow(&x, -1), Expr::minus_one(), x.clone(), -pow(&x, 2)]),
        );
        assert_eq!(
            series(&expr, &x, 2),
            Expr::add([pow(&x, -1), Expr::minus_one(), x.clone()]),
        );
    }

    #[test]
    fn reciprocal_at_low_order() {
        // the base expands to 0 at order 1, so its leading term is found at a higher order
        let x = Expr::symbol("x");
        let expr = pow(&(x.clone() + pow(&x, 2)), -1);
        assert_eq!(series(&expr, &x, 1), pow(&x, -1) - Expr::one());
        assert_eq!(series(&expr, &x, 0), pow(&x, -1));
    }

    #[test]
    fn cosecant() {
        // 1/sin(x) = 1/x + x/6 + 7*x**3/360 + ...
        let x = Expr::symbol("x");
        let expr = pow(&sin(&x), -1);
        assert_eq!(series(&expr, &x, 3), pow(&x, -1) + r(1, 6) * x.clone());
        assert_eq!(series(&expr, &x, 1), pow(&x, -1));
    }

    #[test]
    fn reciprocal_of_cancelling_base() {
        // sin(x) - x = -x**3/6 + x**5/120 - ...
        let x = Expr::symbol("x");
        let expr = pow(&(sin(&x) - x.clone()), -1);
        assert_eq!(
            series(&expr, &x, 1),
            Expr::from(-6) * pow(&x, -3) + r(-3, 10) * pow(&x, -1),
        );
    }

    #[test]
    fn fractional_power_with_branch_point() {
        // (x + x**2)**(1/2) = x**(1/2) * (1 + x)**(1/2) = x**(1/2) + x**(3/2)/2 - ...
        let x = Expr::symbol("x");
        let expr = pow(&(x.clone() + pow(&x, 2)), r(1, 2));
        assert_eq!(
            series(&expr, &x, 2),
            pow(&x, r(1, 2)) + r(1, 2) * pow(&x, r(3, 2)),
        );
        assert_eq!(series(&expr, &x, 1), pow(&x, r(1, 2)));
    }

    #[test]
    fn logarithm() {
        // log(1 + x) = x - x**2/2 + x**3/3
        let x = Expr::symbol("x");
        let expr = log(&(Expr::one() + x.clone())).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(
            series(&expr, &x, 4),
            Expr::add([x.clone(), r(-1, 2) * pow(&x, 2), r(1, 3) * pow(&x, 3)]),
        );
    }

    #[test]
    fn logarithm_with_pole() {
        // log(x + x**2) = log(x) + x - x**2/2
        let x = Expr::symbol("x");
        let log_x = log(&x).unwrap_or_else(|err| panic!("{err}"));
        let expr = log(&(x.clone() + pow(&x, 2))).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(
            series(&expr, &x, 3),
            Expr::add([log_x.clone(), x.clone(), r(-1, 2) * pow(&x, 2)]),
        );
        assert_eq!(series(&expr, &x, 1), log_x);
    }

    #[test]
    fn symbolic_exponent() {
        // 2**x = 1 + log(2)*x
        let x = Expr::symbol("x");
        let expr = pow(&Expr::from(2), x.clone());
        let log_2 = log(&Expr::from(2)).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(series(&expr, &x, 2), Expr::one() + log_2 * x);
    }

    #[test]
    fn non_symbol_variable() {
        let x = Expr::symbol("x");
        assert!(x.series(&Expr::one(), 3).is_err());
    }
}
