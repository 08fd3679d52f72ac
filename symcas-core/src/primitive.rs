//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types, plus the
//! exact integer arithmetic the canonicalization rules need.

use crate::consts::MAX_EXACT_EXPONENT;
use rug::{ops::Pow, Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing floating-point values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Returns `n!`.
pub fn factorial(n: u32) -> Integer {
    Integer::from(Integer::factorial(n))
}

/// Raises a nonzero rational to an integer power exactly, by raising the numerator and denominator
/// separately and swapping them for negative exponents.
///
/// Returns [`None`] if a zero base is raised to a negative power, or if the magnitude of the
/// exponent exceeds [`MAX_EXACT_EXPONENT`] and the base is not `1` or `-1`.
pub fn rational_pow(base: &Rational, exponent: &Integer) -> Option<Rational> {
    if base.cmp0().is_eq() && exponent.cmp0().is_lt() {
        return None;
    }

    if *base.denom() == 1 && base.numer().significant_bits() == 1 {
        let negative = base.cmp0().is_lt() && exponent.is_odd();
        return Some(Rational::from(if negative { -1 } else { 1 }));
    }

    let magnitude = Integer::from(exponent.abs_ref()).to_u32()
        .filter(|m| *m <= MAX_EXACT_EXPONENT)?;
    let numer = Integer::from(base.numer().pow(magnitude));
    let denom = Integer::from(base.denom().pow(magnitude));

    if exponent.cmp0().is_lt() {
        Some(Rational::from((denom, numer)))
    } else {
        Some(Rational::from((numer, denom)))
    }
}

/// Returns the exact `k`-th root of a non-negative integer, if there is one.
///
/// The candidate root is computed with truncating integer root extraction, then verified by
/// raising it back to the `k`-th power.
pub fn exact_root(n: &Integer, k: u32) -> Option<Integer> {
    if n.cmp0().is_lt() || k == 0 {
        return None;
    }

    let root = Integer::from(n.root_ref(k));
    if Integer::from((&root).pow(k)) == *n {
        Some(root)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_roots() {
        assert_eq!(exact_root(&int(4), 2), Some(int(2)));
        assert_eq!(exact_root(&int(27), 3), Some(int(3)));
        assert_eq!(exact_root(&int(1), 7), Some(int(1)));
        assert_eq!(exact_root(&int(0), 2), Some(int(0)));
        assert_eq!(exact_root(&int(2), 2), None);
        assert_eq!(exact_root(&int(26), 3), None);
        assert_eq!(exact_root(&int(-8), 3), None);
    }

    #[test]
    fn large_exact_root() {
        // 2^200 is well outside the range an `f64` represents exactly
        let n = Integer::from(Integer::u_pow_u(2, 200));
        assert_eq!(exact_root(&n, 4), Some(Integer::from(Integer::u_pow_u(2, 50))));
        assert_eq!(exact_root(&(n + 1u32), 4), None);
    }

    #[test]
    fn rational_powers() {
        assert_eq!(rational_pow(&rat((2, 3)), &int(3)), Some(rat((8, 27))));
        assert_eq!(rational_pow(&rat((2, 3)), &int(-2)), Some(rat((9, 4))));
        assert_eq!(rational_pow(&rat(-2), &int(-3)), Some(rat((-1, 8))));
        assert_eq!(rational_pow(&rat(5), &int(0)), Some(rat(1)));
        assert_eq!(rational_pow(&rat(0), &int(-1)), None);
    }

    #[test]
    fn bounded_exponents() {
        let limit = int(MAX_EXACT_EXPONENT);
        assert!(rational_pow(&rat(3), &limit).is_some());
        assert_eq!(rational_pow(&rat(3), &(limit.clone() + 1u32)), None);
        assert_eq!(rational_pow(&rat((1, 3)), &-(limit + 1u32)), None);

        // units stay cheap at any exponent
        assert_eq!(rational_pow(&rat(-1), &int(1i64 << 40)), Some(rat(1)));
        assert_eq!(rational_pow(&rat(-1), &int((1i64 << 40) + 1)), Some(rat(-1)));
        assert_eq!(rational_pow(&rat(1), &int(-100_001)), Some(rat(1)));
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
    }
}
