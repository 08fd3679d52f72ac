//! Canonicalization rules for integer powers of the imaginary unit.

use super::{fired, multiply::eval_mul};
use crate::expr::Expr;

// I**..
// 0 1 2  3
// 1 I -1 -I
//
// 4 5 6  7
// 1 I -1 -I

/// Returns `n mod 4` if `base**exponent` is the imaginary unit raised to an integer `n`.
fn residue(base: &Expr, exponent: &Expr) -> Option<u32> {
    if base.is_imaginary_unit() {
        Some(exponent.as_integer()?.mod_u(4))
    } else {
        None
    }
}

/// `I**(4n) = 1`
pub fn i_pow_0(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if residue(base, exponent)? == 0 {
        fired!("i_pow_0", "I**{}", exponent);
        Some(Expr::one())
    } else {
        None
    }
}

/// `I**(4n+1) = I`
pub fn i_pow_1(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if residue(base, exponent)? == 1 {
        fired!("i_pow_1", "I**{}", exponent);
        Some(Expr::imaginary_unit())
    } else {
        None
    }
}

/// `I**(4n+2) = -1`
pub fn i_pow_2(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if residue(base, exponent)? == 2 {
        fired!("i_pow_2", "I**{}", exponent);
        Some(Expr::minus_one())
    } else {
        None
    }
}

/// `I**(4n+3) = -I`
pub fn i_pow_3(base: &Expr, exponent: &Expr) -> Option<Expr> {
    if residue(base, exponent)? == 3 {
        fired!("i_pow_3", "I**{}", exponent);
        Some(eval_mul([Expr::minus_one(), Expr::imaginary_unit()]))
    } else {
        None
    }
}

/// Applies all imaginary unit rules.
pub fn all(base: &Expr, exponent: &Expr) -> Option<Expr> {
    i_pow_0(base, exponent)
        .or_else(|| i_pow_1(base, exponent))
        .or_else(|| i_pow_2(base, exponent))
        .or_else(|| i_pow_3(base, exponent))
}
