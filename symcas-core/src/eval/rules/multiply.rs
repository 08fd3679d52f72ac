//! Canonicalization of products, including combining like factors.

use super::{add::eval_add, fired, power::eval_power};
use crate::{
    expr::{split_pow, Expr, ExprKind},
    number::Number,
};

/// Flattens nested products into a single list of factors.
fn flatten(factors: impl IntoIterator<Item = Expr>, out: &mut Vec<Expr>) {
    for factor in factors {
        match factor.kind() {
            ExprKind::Mul(inner) => out.extend(inner.iter().cloned()),
            _ => out.push(factor),
        }
    }
}

/// A group of factors that share a base.
struct LikeFactors {
    base: Expr,
    exponents: Vec<Expr>,

    /// The first factor of the group as it was given, reused when the group has one member.
    first: Expr,
}

/// Canonicalizes a product.
///
/// - nested products are flattened;
/// - numbers are folded into a single coefficient, and a zero coefficient makes the whole
///   product zero;
/// - factors with the same base are combined by adding their exponents (`a * a**2 = a**3`);
/// - a coefficient of one is dropped;
/// - the remaining factors are sorted in canonical order, coefficient first.
///
/// Combining factors can produce numbers (`I * I = -1`) or new products (`(a*b)**-1`), in which
/// case the product is canonicalized again.
pub(crate) fn eval_mul(factors: impl IntoIterator<Item = Expr>) -> Expr {
    let mut flat = Vec::new();
    flatten(factors, &mut flat);

    let mut coeff = Number::from(1);
    let mut groups: Vec<LikeFactors> = Vec::new();
    for factor in flat {
        if let Some(n) = factor.as_number() {
            coeff = coeff.mul(n);
            continue;
        }

        let (base, exponent) = split_pow(&factor);
        match groups.iter_mut().find(|group| group.base == *base) {
            Some(group) => group.exponents.push(exponent.into_owned()),
            None => groups.push(LikeFactors {
                base: base.clone(),
                exponents: vec![exponent.into_owned()],
                first: factor.clone(),
            }),
        }
    }

    if coeff.is_zero() {
        return Expr::zero();
    }

    let mut out = Vec::with_capacity(groups.len() + 1);
    let mut again = false;
    for LikeFactors { base, exponents, first } in groups {
        if exponents.len() == 1 {
            out.push(first);
            continue;
        }

        fired!("combine_like_factors", "{}", base);
        let combined = eval_power(&base, &eval_add(exponents));
        if let Some(n) = combined.as_number() {
            coeff = coeff.mul(n);
            continue;
        }

        // the result is no longer a power of `base`, so it may combine with other factors
        if matches!(combined.kind(), ExprKind::Mul(_)) || *split_pow(&combined).0 != base {
            again = true;
        }
        out.push(combined);
    }

    if again {
        out.push(Expr::number(coeff));
        return eval_mul(out);
    }

    if coeff.is_zero() {
        return Expr::zero();
    }
    if !coeff.is_one() {
        out.push(Expr::number(coeff));
    }

    out.sort();
    Expr::from_canonical_mul(out)
}

#[cfg(test)]
mod tests {
    use crate::{primitive::rat, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: Expr) -> Expr {
        base.pow(&exponent).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn fold_coefficient() {
        let x = Expr::symbol("x");
        let product = Expr::mul([Expr::from(2), x.clone(), Expr::from(rat((1, 2)))]);
        assert_eq!(product, x.clone());
        assert_eq!(Expr::mul([Expr::zero(), x]), Expr::zero());
    }

    #[test]
    fn combine_powers() {
        let x = Expr::symbol("x");
        assert_eq!(Expr::mul([x.clone(), pow(&x, Expr::from(2))]), pow(&x, Expr::from(3)));
        assert_eq!(Expr::mul([x.clone(), pow(&x, Expr::from(-1))]), Expr::one());
        assert_eq!(
            Expr::mul([pow(&x, Expr::from(rat((1, 2)))), pow(&x, Expr::from(rat((1, 2))))]),
            x,
        );
    }

    #[test]
    fn combine_numeric_roots() {
        let sqrt2 = pow(&Expr::from(2), Expr::from(rat((1, 2))));
        assert_eq!(sqrt2.clone() * sqrt2, Expr::from(2));
    }

    #[test]
    fn coefficient_first() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let product = Expr::mul([y.clone(), x.clone(), Expr::from(3)]);
        assert_eq!(product.factors(), &[Expr::from(3), x, y]);
    }

    #[test]
    fn downgrades() {
        let x = Expr::symbol("x");
        assert_eq!(Expr::mul([]), Expr::one());
        assert_eq!(Expr::mul([x.clone(), Expr::one()]), x);
    }
}
