//! Operator overloads. Every operator goes through the canonicalizing constructors.
//!
//! Division is not overloaded because it can fail; use [`Expr::try_div`] instead.

use super::Expr;
use std::ops::{Add, Mul, Neg, Sub};

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::add([self, rhs])
    }
}

impl Add<&Expr> for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Self::Output {
        self.plus(rhs)
    }
}

/// `a - b = a + (-1)*b`
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::add([self, -rhs])
    }
}

impl Sub<&Expr> for &Expr {
    type Output = Expr;

    fn sub(self, rhs: &Expr) -> Self::Output {
        self.plus(&-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::mul([self, rhs])
    }
}

impl Mul<&Expr> for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Self::Output {
        self.times(rhs)
    }
}

/// `-a = (-1)*a`
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::mul([Expr::minus_one(), self])
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.times(&Expr::minus_one())
    }
}

#[cfg(test)]
mod tests {
    use crate::Expr;
    use pretty_assertions::assert_eq;

    #[test]
    fn owned_and_borrowed_agree() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(&x + &y, x.clone() + y.clone());
        assert_eq!(&x - &y, x.clone() - y.clone());
        assert_eq!(&x * &y, x.clone() * y.clone());
        assert_eq!(-&x, -x.clone());
    }

    #[test]
    fn subtraction_cancels() {
        let x = Expr::symbol("x");
        assert_eq!(x.clone() - x, Expr::zero());
        assert_eq!(-(-Expr::symbol("y")), Expr::symbol("y"));
    }
}
