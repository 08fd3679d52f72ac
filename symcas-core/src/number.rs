//! The numeric tower: exact rationals and fixed-precision floats.
//!
//! Rationals are always in lowest terms with a positive denominator (this is maintained by `rug`).
//! Floats are always finite; nothing in this crate constructs a `NaN` or an infinity, and
//! operations that would produce one either leave the expression unevaluated or report an error.

use crate::primitive::{float, rat};
use rug::{ops::Pow, Float, Integer, Rational};
use std::{cmp::Ordering, fmt, hash::{Hash, Hasher}};

/// A number, either exact or approximate.
#[derive(Debug, Clone)]
pub enum Number {
    /// An exact rational number, such as `3` or `-2/5`.
    Rational(Rational),

    /// A floating-point number with [`PRECISION`](crate::primitive::PRECISION) bits of
    /// precision, such as `0.5`.
    Float(Float),
}

impl Number {
    /// Creates a float from an [`f64`], returning [`None`] if the value is not finite.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| Self::Float(float(value)))
    }

    /// Creates a float from a [`Float`] result, returning [`None`] if the value is not finite.
    pub fn from_float(value: Float) -> Option<Self> {
        value.is_finite().then_some(Self::Float(value))
    }

    /// Returns the rational value of this number, if it is exact.
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Rational(r) => Some(r),
            Self::Float(_) => None,
        }
    }

    /// Returns the integer value of this number, if it is an exact integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Rational(r) if *r.denom() == 1 => Some(r.numer()),
            _ => None,
        }
    }

    /// Returns true if this number is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns true if this number is an exact integer. Floats with an integral value are not
    /// considered integers.
    pub fn is_integer(&self) -> bool {
        self.as_integer().is_some()
    }

    /// Returns true if this number is the exact rational zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Rational(r) if r.cmp0() == Ordering::Equal)
    }

    /// Returns true if this number is the exact rational one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == 1)
    }

    /// Returns true if this number is the exact rational minus one.
    pub fn is_minus_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == -1)
    }

    /// Returns true if this number is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Greater,
            Self::Float(f) => f.is_sign_positive() && !f.is_zero(),
        }
    }

    /// Returns true if this number is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Less,
            Self::Float(f) => f.is_sign_negative() && !f.is_zero(),
        }
    }

    /// Converts this number to a [`Float`].
    pub fn to_float(&self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Float(f) => f.clone(),
        }
    }

    /// Adds two numbers. The result is exact only if both operands are exact.
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(rat(a + b)),
            _ => Self::Float(float(self.to_float() + other.to_float())),
        }
    }

    /// Multiplies two numbers. The result is exact only if both operands are exact.
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(rat(a * b)),
            _ => Self::Float(float(self.to_float() * other.to_float())),
        }
    }

    /// Returns the additive inverse of this number.
    pub fn neg(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(rat(-r)),
            Self::Float(f) => Self::Float(float(-f)),
        }
    }

    /// Returns the absolute value of this number.
    pub fn abs(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(rat(r.abs_ref())),
            Self::Float(f) => Self::Float(float(f.abs_ref())),
        }
    }

    /// Raises this number to the given power in floating-point arithmetic.
    ///
    /// Returns [`None`] if the result is not a finite real number (for example, a negative base
    /// raised to a fractional power).
    pub fn float_pow(&self, exponent: &Self) -> Option<Self> {
        let base = self.to_float();
        let exponent = exponent.to_float();
        Self::from_float(float((&base).pow(&exponent)))
    }

    /// Compares two numbers by value. An exact number sorts before a float of the same value.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Rational(_), Self::Float(_)) => self.to_float().total_cmp(&other.to_float())
                .then(Ordering::Less),
            (Self::Float(_), Self::Rational(_)) => self.to_float().total_cmp(&other.to_float())
                .then(Ordering::Greater),
        }
    }
}

/// A rational and a float are never equal, even if they have the same value; they are different
/// kinds of expression.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            _ => false,
        }
    }
}

/// [`Eq`] is sound because floats are never `NaN`.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Rational(r) => {
                0u8.hash(state);
                r.hash(state);
            },
            Self::Float(f) => {
                1u8.hash(state);
                // `-0.0 == 0.0`, so both must hash the same
                if f.is_zero() {
                    0u64.hash(state);
                } else {
                    f.to_f64().to_bits().hash(state);
                }
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) if *r.denom() == 1 => write!(f, "{}", r.numer()),
            Self::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Self::Float(n) => {
                let value = n.to_f64();
                if value.fract() == 0.0 && value.abs() < 1e16 {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            },
        }
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::Rational(Rational::from(n))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Rational(Rational::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::int;

    #[test]
    fn predicates() {
        let half = Number::from(rat((1, 2)));
        assert!(half.is_positive());
        assert!(!half.is_integer());
        assert!(Number::from(int(-1)).is_minus_one());
        assert!(Number::from(0).is_zero());
        assert!(!Number::Float(float(0.0)).is_zero());
        assert!(Number::Float(float(-2.5)).is_negative());
    }

    #[test]
    fn exactness_is_contagious_only_for_floats() {
        let a = Number::from(rat((1, 3)));
        let b = Number::from(rat((2, 3)));
        assert_eq!(a.add(&b), Number::from(1));
        assert!(a.add(&Number::Float(float(1.0))).is_float());
    }

    #[test]
    fn rational_and_float_differ() {
        assert_ne!(Number::from(1), Number::Float(float(1.0)));
        assert_eq!(Number::from(1).cmp_value(&Number::Float(float(1.0))), Ordering::Less);
    }

    #[test]
    fn float_pow_rejects_non_real() {
        let base = Number::Float(float(-2.0));
        assert!(base.float_pow(&Number::from(rat((1, 2)))).is_none());
        assert_eq!(base.float_pow(&Number::from(2)), Some(Number::Float(float(4.0))));
    }

    #[test]
    fn display() {
        assert_eq!(Number::from(rat((-2, 6))).to_string(), "-1/3");
        assert_eq!(Number::from(7).to_string(), "7");
        assert_eq!(Number::Float(float(2.0)).to_string(), "2.0");
        assert_eq!(Number::Float(float(0.25)).to_string(), "0.25");
    }
}
