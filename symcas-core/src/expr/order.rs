//! The canonical total order of expressions.
//!
//! Sums and products are sorted with this order when they are constructed, so it decides how
//! every canonical expression is laid out (and printed). Numbers come first. Everything else is
//! compared as a monomial: the numeric coefficient is split off, and the remaining factors are
//! compared lexicographically by base and then by exponent. This keeps powers of the same base
//! next to each other and sorted by exponent, so a polynomial in `x` sorts by ascending degree:
//! `1 + x + x**2 + y`.

use super::{Expr, ExprKind, Primary};
use crate::number::Number;
use std::{borrow::Cow, cmp::Ordering};

/// Splits an expression into its base and exponent. Expressions that are not powers have an
/// exponent of `1`.
pub(crate) fn split_pow(expr: &Expr) -> (&Expr, Cow<'_, Expr>) {
    match expr.kind() {
        ExprKind::Exp(base, exponent) => (base, Cow::Borrowed(exponent)),
        _ => (expr, Cow::Owned(Expr::one())),
    }
}

/// Splits an expression into its numeric coefficient (if any) and its non-numeric factors.
fn split_coeff(expr: &Expr) -> (Option<&Number>, &[Expr]) {
    match expr.kind() {
        ExprKind::Mul(factors) => match factors.split_first() {
            Some((first, rest)) if first.is_number() => (first.as_number(), rest),
            _ => (None, factors),
        },
        _ => (None, std::slice::from_ref(expr)),
    }
}

/// Sorting rank of a base, by kind.
fn rank(expr: &Expr) -> u8 {
    match expr.kind() {
        ExprKind::Primary(Primary::Number(_)) => 0,
        ExprKind::Primary(Primary::ImaginaryUnit) => 1,
        ExprKind::Primary(Primary::Symbol(_)) => 2,
        ExprKind::Primary(Primary::Call(..)) => 3,
        ExprKind::Exp(..) => 4,
        ExprKind::Mul(_) => 5,
        ExprKind::Add(_) => 6,
    }
}

/// Compares two lists of expressions lexicographically, then by length.
fn cmp_lists(a: &[Expr], b: &[Expr], cmp: fn(&Expr, &Expr) -> Ordering) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| cmp(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Compares two bases: first by kind, then by content.
fn cmp_base(a: &Expr, b: &Expr) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| match (a.kind(), b.kind()) {
        (ExprKind::Primary(Primary::Number(a)), ExprKind::Primary(Primary::Number(b))) => a.cmp_value(b),
        (ExprKind::Primary(Primary::Symbol(a)), ExprKind::Primary(Primary::Symbol(b))) => a.cmp(b),
        (ExprKind::Primary(Primary::Call(fa, a)), ExprKind::Primary(Primary::Call(fb, b))) => {
            fa.cmp(fb).then_with(|| a.cmp(b))
        },
        (ExprKind::Exp(ba, ea), ExprKind::Exp(bb, eb)) => ba.cmp(bb).then_with(|| ea.cmp(eb)),
        (ExprKind::Mul(a), ExprKind::Mul(b)) | (ExprKind::Add(a), ExprKind::Add(b)) => {
            cmp_lists(a, b, Expr::cmp)
        },
        _ => Ordering::Equal,
    })
}

/// Compares two factors by base, then by exponent.
fn cmp_factor(a: &Expr, b: &Expr) -> Ordering {
    let (base_a, exp_a) = split_pow(a);
    let (base_b, exp_b) = split_pow(b);
    cmp_base(base_a, base_b).then_with(|| exp_a.cmp(&exp_b))
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }

        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => return a.cmp_value(b),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {},
        }

        let (coeff_a, factors_a) = split_coeff(self);
        let (coeff_b, factors_b) = split_coeff(other);
        cmp_lists(factors_a, factors_b, cmp_factor).then_with(|| {
            match (coeff_a, coeff_b) {
                (Some(a), Some(b)) => a.cmp_value(b),
                (Some(a), None) => a.cmp_value(&Number::from(1)),
                (None, Some(b)) => Number::from(1).cmp_value(b),
                (None, None) => Ordering::Equal,
            }
        })
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use crate::Expr;
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: i64) -> Expr {
        base.pow(&Expr::from(exponent)).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn numbers_first_then_ascending_degree() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let mut exprs = vec![
            y.clone(),
            pow(&x, 2),
            Expr::integer(3),
            x.clone(),
            Expr::integer(2) * x.clone(),
        ];
        exprs.sort();

        assert_eq!(exprs, vec![
            Expr::integer(3),
            x.clone(),
            Expr::integer(2) * x.clone(),
            pow(&x, 2),
            y,
        ]);
    }

    #[test]
    fn symbols_before_calls_before_sums() {
        let x = Expr::symbol("x");
        let sum = x.clone() + Expr::one();
        let call = crate::cos(&x);

        assert!(x < call);
        assert!(call < sum);
        assert!(Expr::imaginary_unit() < x);
    }
}
