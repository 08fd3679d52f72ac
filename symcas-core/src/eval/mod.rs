//! Canonicalizing constructors.
//!
//! Every expression built through this module is reduced to canonical form exactly once, at
//! construction. The constructors call each other (a power can distribute into a product, a
//! product can combine factors into a power, and so on), but every rule either shrinks the
//! expression or moves it strictly closer to canonical form, so the recursion terminates.
//!
//! Only two situations can fail: `0` raised to a negative rational, and `log(0)`. Both are
//! reported as a [`PoleError`](crate::error::PoleError).

pub mod rules;

use crate::{error::Error, expr::{Expr, Func}, primitive::rat};
use rules::{add::eval_add, function, multiply::eval_mul, power};

impl Expr {
    /// Returns the canonical sum of the given terms.
    pub fn add(terms: impl IntoIterator<Item = Expr>) -> Expr {
        eval_add(terms)
    }

    /// Returns the canonical product of the given factors.
    pub fn mul(factors: impl IntoIterator<Item = Expr>) -> Expr {
        eval_mul(factors)
    }

    /// Returns the canonical power `self**exponent`.
    ///
    /// Returns a [`PoleError`](crate::error::PoleError) if `self` is zero and `exponent` is a
    /// negative rational.
    pub fn pow(&self, exponent: &Expr) -> Result<Expr, Error> {
        power::pow(self, exponent)
    }

    /// Returns the canonical function call `func(arg)`.
    pub fn call(func: Func, arg: &Expr) -> Result<Expr, Error> {
        function::eval_call(func, arg)
    }

    /// Returns the canonical quotient `self / other`, computed as `self * other**-1`.
    ///
    /// Returns a [`PoleError`](crate::error::PoleError) if `other` is zero.
    pub fn try_div(&self, other: &Expr) -> Result<Expr, Error> {
        let recip = other.pow(&Expr::minus_one())?;
        Ok(eval_mul([self.clone(), recip]))
    }

    /// Returns the canonical product `self * other`.
    pub(crate) fn times(&self, other: &Expr) -> Expr {
        eval_mul([self.clone(), other.clone()])
    }

    /// Returns the canonical sum `self + other`.
    pub(crate) fn plus(&self, other: &Expr) -> Expr {
        eval_add([self.clone(), other.clone()])
    }
}

/// Returns `exp(arg)`.
pub fn exp(arg: &Expr) -> Expr {
    function::eval_exp(arg)
}

/// Returns `log(arg)`, the natural logarithm.
///
/// Returns a [`PoleError`](crate::error::PoleError) if `arg` is zero.
pub fn log(arg: &Expr) -> Result<Expr, Error> {
    function::eval_log(arg)
}

/// Returns `sin(arg)`.
pub fn sin(arg: &Expr) -> Expr {
    function::eval_sin(arg)
}

/// Returns `cos(arg)`.
pub fn cos(arg: &Expr) -> Expr {
    function::eval_cos(arg)
}

/// Returns `sqrt(arg)`, which is `arg**(1/2)`.
pub fn sqrt(arg: &Expr) -> Expr {
    let half = Expr::from(rat((1, 2)));
    if arg.is_zero() {
        Expr::zero()
    } else {
        power::eval_power(arg, &half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn division() {
        let x = Expr::symbol("x");
        assert_eq!(x.try_div(&x), Ok(Expr::one()));
        assert_eq!(Expr::from(3).try_div(&Expr::from(6)), Ok(Expr::from(rat((1, 2)))));
        assert!(matches!(x.try_div(&Expr::zero()), Err(Error::Pole(_))));
    }

    #[test]
    fn square_roots() {
        assert_eq!(sqrt(&Expr::from(9)), Expr::from(3));
        assert_eq!(sqrt(&Expr::zero()), Expr::zero());
        assert_eq!(sqrt(&Expr::from(-1)), Expr::imaginary_unit());
    }

    #[test]
    fn constructors_are_canonical() {
        // the same expression built in two different orders
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let a = Expr::add([Expr::mul([y.clone(), x.clone()]), Expr::from(1), x.clone()]);
        let b = Expr::add([x.clone(), Expr::one(), Expr::mul([x, y])]);
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
    }
}
