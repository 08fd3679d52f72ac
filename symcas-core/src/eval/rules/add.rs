//! Canonicalization of sums, including combining like terms.

use super::{fired, multiply::eval_mul};
use crate::{
    expr::{Expr, ExprKind},
    number::Number,
};

/// Splits a term into its numeric coefficient and the rest of the term. If the term is not a
/// product with a numeric coefficient, the coefficient is 1.
///
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
pub(crate) fn split_coeff(term: &Expr) -> (Number, Expr) {
    if let ExprKind::Mul(factors) = term.kind() {
        if let Some((coeff, rest)) = factors.split_first() {
            if let Some(coeff) = coeff.as_number() {
                return (coeff.clone(), Expr::from_canonical_mul(rest.to_vec()));
            }
        }
    }

    (Number::from(1), term.clone())
}

/// Flattens nested sums into a single list of terms.
fn flatten(terms: impl IntoIterator<Item = Expr>, out: &mut Vec<Expr>) {
    for term in terms {
        match term.kind() {
            ExprKind::Add(inner) => out.extend(inner.iter().cloned()),
            _ => out.push(term),
        }
    }
}

/// Canonicalizes a sum.
///
/// - nested sums are flattened;
/// - numbers are folded into a single constant term;
/// - like terms are combined (`2a+3a = 5a`);
/// - zero terms are dropped;
/// - the remaining terms are sorted in canonical order.
pub(crate) fn eval_add(terms: impl IntoIterator<Item = Expr>) -> Expr {
    let mut flat = Vec::new();
    flatten(terms, &mut flat);

    let mut constant: Option<Number> = None;
    let mut like_terms: Vec<(Expr, Number)> = Vec::new();
    for term in flat {
        if let Some(n) = term.as_number() {
            constant = Some(match constant {
                Some(c) => c.add(n),
                None => n.clone(),
            });
            continue;
        }

        let (coeff, rest) = split_coeff(&term);
        match like_terms.iter_mut().find(|(existing, _)| *existing == rest) {
            Some((_, total)) => {
                fired!("combine_like_terms", "{}", rest);
                *total = total.add(&coeff);
            },
            None => like_terms.push((rest, coeff)),
        }
    }

    let mut out = Vec::with_capacity(like_terms.len() + 1);
    if let Some(constant) = constant.filter(|c| !c.is_zero()) {
        out.push(Expr::number(constant));
    }
    for (rest, coeff) in like_terms {
        if coeff.is_zero() {
            continue;
        }
        if coeff.is_one() {
            out.push(rest);
        } else {
            out.push(eval_mul([Expr::number(coeff), rest]));
        }
    }

    out.sort();
    Expr::from_canonical_add(out)
}

#[cfg(test)]
mod tests {
    use crate::{primitive::rat, Expr};
    use pretty_assertions::assert_eq;

    #[test]
    fn fold_numbers() {
        let sum = Expr::add([Expr::from(rat((1, 2))), Expr::from(rat((1, 3)))]);
        assert_eq!(sum, Expr::from(rat((5, 6))));

        let mixed = Expr::add([Expr::from(1), Expr::from(0.5)]);
        assert_eq!(mixed, Expr::from(1.5));
    }

    #[test]
    fn combine_like_terms() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let sum = Expr::add([x.clone(), Expr::integer(2) * x.clone(), y.clone()]);
        assert_eq!(sum, Expr::add([y.clone(), Expr::integer(3) * x.clone()]));

        let cancelled = Expr::add([x.clone(), -x.clone(), y.clone()]);
        assert_eq!(cancelled, y);
    }

    #[test]
    fn downgrades() {
        let x = Expr::symbol("x");
        assert_eq!(Expr::add([]), Expr::zero());
        assert_eq!(Expr::add([x.clone()]), x.clone());
        assert_eq!(Expr::add([x.clone(), Expr::zero()]), x);
    }

    #[test]
    fn flattens_and_sorts() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let inner = y.clone() + Expr::one();
        let sum = Expr::add([inner, x.clone()]);
        assert_eq!(sum.terms(), &[Expr::one(), x, y]);
    }
}
