//! Printers for expressions.
//!
//! - [`Display`](std::fmt::Display) prints the plain form, which can be parsed back: `x**2 + 1`.
//! - [`Expr::to_latex`] prints LaTeX: `{x}^{2} + 1`.
//! - [`Expr::to_pretty`] draws 2-D ASCII art, with exponents raised and fractions stacked.
//!
//! All three printers share the same parenthesization rules, decided by [`Precedence`].

mod latex;
mod pretty;

use crate::expr::{Expr, ExprKind, Primary};
use std::fmt;

/// How tightly a printed expression binds, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    /// A sum, or a negative number (which starts with a unary minus).
    Add,

    /// A product, or a non-integer rational (which contains a `/`).
    Mul,

    /// A power.
    Pow,

    /// Anything that never needs parentheses.
    Atom,
}

impl Expr {
    /// Returns the precedence of this expression when printed.
    pub(crate) fn precedence(&self) -> Precedence {
        match self.kind() {
            ExprKind::Primary(Primary::Number(n)) if n.is_negative() => Precedence::Add,
            ExprKind::Primary(Primary::Number(n)) if !n.is_float() && !n.is_integer() => Precedence::Mul,
            ExprKind::Primary(_) => Precedence::Atom,
            ExprKind::Add(_) => Precedence::Add,
            ExprKind::Mul(factors) if factors.first().is_some_and(|f| f.as_number().is_some_and(|n| n.is_negative())) => {
                Precedence::Add
            },
            ExprKind::Mul(_) => Precedence::Mul,
            ExprKind::Exp(..) => Precedence::Pow,
        }
    }

    /// Returns true if this expression needs parentheses when printed as the base or exponent of
    /// a power.
    pub(crate) fn needs_parens_in_power(&self) -> bool {
        self.precedence() <= Precedence::Pow
    }

    /// Returns true if this expression needs parentheses when printed as a factor of a product.
    pub(crate) fn needs_parens_in_product(&self) -> bool {
        self.precedence() <= Precedence::Add
    }
}

/// Splits the factors of a product into an optional leading minus sign and the factors to print.
/// A coefficient of `-1` is printed as a bare minus sign.
pub(crate) fn split_sign(factors: &[Expr]) -> (bool, &[Expr]) {
    match factors.split_first() {
        Some((first, rest)) if first.is_minus_one() && !rest.is_empty() => (true, rest),
        _ => (false, factors),
    }
}

/// Writes `expr`, wrapped in parentheses if `parens` is true.
fn write_wrapped(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::ImaginaryUnit => write!(f, "I"),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Call(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Primary(primary) => write!(f, "{}", primary),
            ExprKind::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            ExprKind::Mul(factors) => {
                let (negative, factors) = split_sign(factors);
                if negative {
                    write!(f, "-")?;
                }

                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    // the coefficient leads the product, so its sign needs no parentheses
                    write_wrapped(f, factor, !factor.is_number() && factor.needs_parens_in_product())?;
                    for factor in iter {
                        write!(f, "*")?;
                        write_wrapped(f, factor, factor.needs_parens_in_product())?;
                    }
                }
                Ok(())
            },
            ExprKind::Exp(base, exponent) if exponent.is_minus_one() => {
                write!(f, "(1/")?;
                write_wrapped(f, base, base.needs_parens_in_power())?;
                write!(f, ")")
            },
            ExprKind::Exp(base, exponent) => {
                write_wrapped(f, base, base.needs_parens_in_power())?;
                write!(f, "**")?;
                write_wrapped(f, exponent, exponent.needs_parens_in_power())
            },
        }
    }
}
