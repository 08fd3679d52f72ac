//! Canonicalization rules for powers.
//!
//! [`crate::Expr::pow`] applies, in order: [`power_zero`], [`power_one`], [`power_zero_left`],
//! and then every rule in [`all`]. The rules that can only fire when the base is zero are split
//! out because they are the only ones that can fail.

use super::{fired, imaginary, root};
use crate::{
    error::{Error, PoleError},
    eval::{exp, rules::multiply::eval_mul},
    expr::{Expr, ExprKind, Func},
    number::Number,
};

/// Builds the unevaluated power node `base**exponent`.
pub fn raw_power(base: &Expr, exponent: &Expr) -> Expr {
    Expr::raw(ExprKind::Exp(base.clone(), exponent.clone()))
}

/// `a**0 = 1`
///
/// `0**0` is defined as `1` by this rule, though it may be undefined in other mathematical
/// contexts.
pub fn power_zero(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if exponent.is_zero() {
        fired!("power_zero", "{}**0", base);
        Some(Expr::one())
    } else {
        None
    }
}

/// `a**1 = a`
pub fn power_one(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if exponent.is_one() {
        fired!("power_one", "{}**1", base);
        Some(base.clone())
    } else {
        None
    }
}

/// `0**a = 0`, unless `a` is a negative rational, in which case `0**a` is a pole.
///
/// `0**0` is handled by the [`power_zero`] rule.
pub fn power_zero_left(base: &Expr, exponent: &Expr) -> Result<Option<Expr>, Error> {
    if !base.is_zero() {
        return Ok(None);
    }

    if exponent.as_number().is_some_and(|n| !n.is_float() && n.is_negative()) {
        return Err(PoleError { expr: format!("0**({})", exponent) }.into());
    }

    fired!("power_zero_left", "0**{}", exponent);
    Ok(Some(Expr::zero()))
}

/// `1**a = 1`
pub fn power_one_left(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if base.is_one() {
        fired!("power_one_left", "1**{}", exponent);
        Some(Expr::one())
    } else {
        None
    }
}

/// A float raised to a float is left unevaluated.
pub fn float_float(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if base.as_number().is_some_and(Number::is_float) && exponent.as_number().is_some_and(Number::is_float) {
        Some(raw_power(base, exponent))
    } else {
        None
    }
}

/// `(a**b)**c = a**(b*c)`
///
/// This is not an identity for every complex `a` (`((-1)**2)**(1/2) = 1`, but `(-1)**1 = -1`),
/// but it is applied unconditionally.
pub fn power_power(base: &Expr, exponent: &Expr) -> Option<Expr> {
    let (inner_base, inner_exponent) = base.as_pow()?;
    fired!("power_power", "({})**{}", base, exponent);
    Some(eval_power(inner_base, &eval_mul([inner_exponent.clone(), exponent.clone()])))
}

/// `exp(u)**a = exp(a*u)`, if `u` contains no symbols.
pub fn exp_base(base: &Expr, exponent: &Expr) -> Option<Expr> {
    let arg = base.as_call(Func::Exp)?;
    if !arg.free_symbols().is_empty() {
        return None;
    }

    fired!("exp_base", "({})**{}", base, exponent);
    Some(exp(&eval_mul([exponent.clone(), arg.clone()])))
}

/// `(a*b)**c = a**c * b**c`, if `c = -1` or `a` is a positive rational.
///
/// `a` is the first factor of the product, which is its numeric coefficient when it has one.
pub fn distribute_mul(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if !matches!(base.kind(), ExprKind::Mul(_)) {
        return None;
    }

    let (a, b) = base.getab()?;
    let positive_rational = a.as_rational().is_some_and(|r| r.cmp0().is_gt());
    if !exponent.is_minus_one() && !positive_rational {
        return None;
    }

    fired!("distribute_mul", "({})**{}", base, exponent);
    Some(eval_mul([eval_power(&a, exponent), eval_power(&b, exponent)]))
}

/// `(-a)**n = a**n`, if `n` is an even integer and the product `-a` has a negative coefficient.
pub fn even_power_of_negative(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if !exponent.as_integer()?.is_even() {
        return None;
    }

    let ExprKind::Mul(factors) = base.kind() else {
        return None;
    };
    if !factors.first()?.as_number()?.is_negative() {
        return None;
    }

    fired!("even_power_of_negative", "({})**{}", base, exponent);
    let positive = eval_mul([Expr::minus_one(), base.clone()]);
    Some(eval_power(&positive, exponent))
}

/// Evaluates a float raised to a number, if the result is real.
pub fn float_base(base: &Expr, exponent: &Expr) -> Option<Expr> {
    let base_num = base.as_number().filter(|n| n.is_float())?;
    let result = base_num.float_pow(exponent.as_number()?)?;
    fired!("float_base", "{}**{}", base, exponent);
    Some(Expr::number(result))
}

/// Applies all rules that assume a nonzero base.
pub fn all(base: &Expr, exponent: &Expr) -> Option<Expr> {
    power_zero(base, exponent)
        .or_else(|| power_one(base, exponent))
        .or_else(|| power_one_left(base, exponent))
        .or_else(|| float_float(base, exponent))
        .or_else(|| root::rational_power(base, exponent))
        .or_else(|| power_power(base, exponent))
        .or_else(|| exp_base(base, exponent))
        .or_else(|| distribute_mul(base, exponent))
        .or_else(|| imaginary::all(base, exponent))
        .or_else(|| even_power_of_negative(base, exponent))
        .or_else(|| float_base(base, exponent))
}

/// Canonicalizes `base**exponent` for a base that is known to be nonzero, such as the base of an
/// existing canonical power or product factor.
pub(crate) fn eval_power(base: &Expr, exponent: &Expr) -> Expr {
    all(base, exponent).unwrap_or_else(|| raw_power(base, exponent))
}

/// Canonicalizes `base**exponent`.
pub(crate) fn pow(base: &Expr, exponent: &Expr) -> Result<Expr, Error> {
    if let Some(expr) = power_zero(base, exponent).or_else(|| power_one(base, exponent)) {
        return Ok(expr);
    }
    if let Some(expr) = power_zero_left(base, exponent)? {
        return Ok(expr);
    }
    Ok(eval_power(base, exponent))
}
