//! Canonicalization rules for rational powers of rationals, including roots.
//!
//! Roots are only extracted when they are exact: `8**(1/3) = 2` and `(4/9)**(3/2) = 8/27`, while
//! `2**(1/2)` stays a power. Roots of negative numbers are split into a root of `-1` and a root of
//! the magnitude. For `-1` itself, an odd root is taken on the real branch (`(-1)**(1/3) = -1`)
//! and a square root is the imaginary unit.

use super::{fired, multiply::eval_mul, power::eval_power};
use crate::{
    expr::Expr,
    primitive::{exact_root, rational_pow},
};
use rug::Rational;

/// `a**n` for rationals `a` and integer `n`, computed exactly.
///
/// Exponents whose magnitude exceeds [`MAX_EXACT_EXPONENT`](crate::consts::MAX_EXACT_EXPONENT)
/// are left unevaluated, unless the base is `1` or `-1`.
fn integer_power(base: &Rational, exponent: &Rational) -> Option<Expr> {
    let result = rational_pow(base, exponent.numer())?;
    fired!("integer_power", "({})**{}", base, exponent);
    Some(Expr::from(result))
}

/// `(-1)**(p/q)`, for a non-integer exponent.
fn minus_one_root(exponent: &Rational, q: u32) -> Option<Expr> {
    if q % 2 == 1 {
        // real branch: the q-th root of -1 is -1
        let sign = rational_pow(&Rational::from(-1), exponent.numer())?;
        fired!("minus_one_root", "(-1)**{}", exponent);
        Some(Expr::from(sign))
    } else if q == 2 {
        fired!("minus_one_root", "(-1)**{}", exponent);
        Some(eval_power(&Expr::imaginary_unit(), &Expr::from(exponent.numer().clone())))
    } else {
        None
    }
}

/// `a**(p/q)` for rationals `a`, if `a` is a perfect `q`-th power or is negative.
fn root(base: &Rational, exponent: &Rational, q: u32) -> Option<Expr> {
    let negative = base.cmp0().is_lt();
    let numer = rug::Integer::from(base.numer().abs_ref());
    let exponent_expr = Expr::from(exponent.clone());

    let exact = exact_root(&numer, q)
        .zip(exact_root(base.denom(), q))
        .and_then(|(numer_root, denom_root)| {
            rational_pow(&Rational::from((numer_root, denom_root)), exponent.numer())
        });

    match (exact, negative) {
        (Some(magnitude), false) => {
            fired!("root", "({})**{}", base, exponent);
            Some(Expr::from(magnitude))
        },
        (Some(magnitude), true) => {
            fired!("root", "({})**{}", base, exponent);
            let sign = eval_power(&Expr::minus_one(), &exponent_expr);
            Some(eval_mul([sign, Expr::from(magnitude)]))
        },
        (None, true) => {
            fired!("negative_root", "({})**{}", base, exponent);
            let sign = eval_power(&Expr::minus_one(), &exponent_expr);
            let magnitude = eval_power(&Expr::from(Rational::from(base.abs_ref())), &exponent_expr);
            Some(eval_mul([sign, magnitude]))
        },
        (None, false) => None,
    }
}

/// Evaluates a rational raised to a rational.
pub fn rational_power(base: &Expr, exponent: &Expr) -> Option<Expr> {
    let base = base.as_rational()?;
    let exponent = exponent.as_rational()?;

    if *exponent.denom() == 1 {
        return integer_power(base, exponent);
    }

    let q = exponent.denom().to_u32()?;
    if *base == -1 {
        minus_one_root(exponent, q)
    } else {
        root(base, exponent, q)
    }
}
