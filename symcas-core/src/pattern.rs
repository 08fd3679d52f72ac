//! Structural pattern matching with wildcard symbols.
//!
//! A pattern is an ordinary expression in which some symbols are designated as wildcards. A
//! wildcard matches any expression, but every occurrence of the same wildcard must match the
//! same expression. Sums and products match their children in any order.

use crate::{
    error::Error,
    expr::{Expr, ExprKind, Primary},
};
use std::collections::{BTreeMap, BTreeSet};

/// Values bound to each wildcard by a successful match, keyed by wildcard name.
pub type Bindings = BTreeMap<String, Expr>;

/// Merges two sets of bindings. Returns [`None`] if a wildcard is bound to different expressions
/// in each set.
pub fn merge(mut lhs: Bindings, rhs: Bindings) -> Option<Bindings> {
    for (name, value) in rhs {
        match lhs.get(&name) {
            Some(existing) if *existing != value => return None,
            Some(_) => {},
            None => {
                lhs.insert(name, value);
            },
        }
    }
    Some(lhs)
}

/// Matches patterns against expressions, for a fixed set of wildcards.
struct Matcher {
    wildcards: BTreeSet<String>,
}

impl Matcher {
    /// Returns true if the pattern contains no wildcards, so that it can only match itself.
    fn is_literal(&self, pattern: &Expr) -> bool {
        pattern.post_order_iter()
            .all(|e| e.as_symbol().map_or(true, |name| !self.wildcards.contains(name)))
    }

    /// Matches `pattern` against `expr`, extending `bindings`.
    fn match_expr(&self, pattern: &Expr, expr: &Expr, bindings: Bindings) -> Option<Bindings> {
        if self.is_literal(pattern) {
            return (pattern == expr).then_some(bindings);
        }

        match pattern.kind() {
            ExprKind::Primary(Primary::Symbol(name)) => {
                let mut single = Bindings::new();
                single.insert(name.clone(), expr.clone());
                merge(bindings, single)
            },
            ExprKind::Primary(Primary::Call(func, arg)) => match expr.kind() {
                ExprKind::Primary(Primary::Call(other, expr_arg)) if func == other => {
                    self.match_expr(arg, expr_arg, bindings)
                },
                _ => None,
            },
            ExprKind::Primary(_) => None,
            ExprKind::Exp(pattern_base, pattern_exponent) => {
                let (base, exponent) = expr.as_pow()?;
                let base_bindings = self.match_expr(pattern_base, base, Bindings::new())?;
                let exponent_bindings = self.match_expr(pattern_exponent, exponent, Bindings::new())?;
                merge(merge(bindings, base_bindings)?, exponent_bindings)
            },
            ExprKind::Mul(pattern_factors) => {
                // a non-product is matched as `1 * expr`, so that `a*x` can match `x` with `a = 1`
                let one_times = [Expr::one(), expr.clone()];
                let factors = match expr.kind() {
                    ExprKind::Mul(factors) => factors.as_slice(),
                    _ => &one_times,
                };
                self.match_unordered(pattern_factors, factors, bindings)
            },
            ExprKind::Add(pattern_terms) => match expr.kind() {
                ExprKind::Add(terms) => self.match_unordered(pattern_terms, terms, bindings),
                _ => None,
            },
        }
    }

    /// Matches a list of patterns against a list of expressions of the same length, in any
    /// order, by backtracking over the assignment of patterns to expressions.
    fn match_unordered(&self, patterns: &[Expr], exprs: &[Expr], bindings: Bindings) -> Option<Bindings> {
        if patterns.len() != exprs.len() {
            return None;
        }

        let mut used = vec![false; exprs.len()];
        self.assign(patterns, exprs, &mut used, bindings)
    }

    /// Assigns the first remaining pattern to every unused expression in turn.
    fn assign(
        &self,
        patterns: &[Expr],
        exprs: &[Expr],
        used: &mut [bool],
        bindings: Bindings,
    ) -> Option<Bindings> {
        let Some((pattern, rest)) = patterns.split_first() else {
            return Some(bindings);
        };

        for i in 0..exprs.len() {
            if used[i] {
                continue;
            }

            if let Some(extended) = self.match_expr(pattern, &exprs[i], bindings.clone()) {
                used[i] = true;
                if let Some(result) = self.assign(rest, exprs, used, extended) {
                    return Some(result);
                }
                used[i] = false;
            }
        }

        None
    }
}

impl Expr {
    /// Matches this expression against `pattern`.
    ///
    /// `wildcards` lists the symbols of the pattern that act as wildcards; if it is [`None`],
    /// every symbol in the pattern is a wildcard. Returns the bindings of the wildcards if the
    /// match succeeds, or [`None`] if it does not.
    ///
    /// Returns an [`ExpectedSymbol`](crate::error::ExpectedSymbol) error if a given wildcard is not
    /// a symbol.
    pub fn matches(&self, pattern: &Expr, wildcards: Option<&[Expr]>) -> Result<Option<Bindings>, Error> {
        let wildcards = match wildcards {
            Some(wildcards) => wildcards.iter()
                .map(|w| w.expect_symbol().map(str::to_string))
                .collect::<Result<BTreeSet<_>, _>>()?,
            None => pattern.free_symbols(),
        };

        Ok(Matcher { wildcards }.match_expr(pattern, self, Bindings::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sin, error::Error};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap_or_else(|err| panic!("{err}"))
    }

    fn bindings(pairs: &[(&str, Expr)]) -> Bindings {
        pairs.iter().map(|(name, value)| (name.to_string(), value.clone())).collect()
    }

    #[test]
    fn power_pattern() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let b = Expr::symbol("b");
        let e = Expr::symbol("e");

        let expr = pow(&(x.clone() + y.clone()), 3);
        assert_eq!(
            expr.matches(&pow(&b, e.clone()), None),
            Ok(Some(bindings(&[("b", x.clone() + y.clone()), ("e", Expr::from(3))]))),
        );

        // a power pattern never matches a non-power
        assert_eq!(x.matches(&pow(&b, e), None), Ok(None));
    }

    #[test]
    fn repeated_wildcard_must_agree() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let a = Expr::symbol("a");

        let pattern = pow(&a, a.clone());
        assert_eq!(pow(&x, x.clone()).matches(&pattern, None), Ok(Some(bindings(&[("a", x.clone())]))));
        assert_eq!(pow(&x, y.clone()).matches(&pattern, None), Ok(None));
    }

    #[test]
    fn explicit_wildcards() {
        let x = Expr::symbol("x");
        let a = Expr::symbol("a");

        // only `a` is a wildcard, so `x` in the pattern must match `x` literally
        let pattern = a.clone() * x.clone();
        let expr = Expr::from(3) * x.clone();
        assert_eq!(
            expr.matches(&pattern, Some(&[a.clone()])),
            Ok(Some(bindings(&[("a", Expr::from(3))]))),
        );
        assert_eq!(
            (Expr::from(3) * Expr::symbol("z")).matches(&pattern, Some(&[a.clone()])),
            Ok(None),
        );

        // a non-product matches as `1 * expr`
        assert_eq!(
            x.matches(&pattern, Some(&[a])),
            Ok(Some(bindings(&[("a", Expr::one())]))),
        );
    }

    #[test]
    fn commutative_sum() {
        let x = Expr::symbol("x");
        let a = Expr::symbol("a");

        let pattern = sin(&a) + Expr::from(1);
        let expr = Expr::from(1) + sin(&pow(&x, 2));
        assert_eq!(
            expr.matches(&pattern, None),
            Ok(Some(bindings(&[("a", pow(&x, 2))]))),
        );
    }

    #[test]
    fn literal_patterns() {
        let x = Expr::symbol("x");
        assert_eq!(x.matches(&x, Some(&[])), Ok(Some(Bindings::new())));
        assert_eq!(x.matches(&Expr::symbol("y"), Some(&[])), Ok(None));
    }

    #[test]
    fn wildcards_must_be_symbols() {
        let x = Expr::symbol("x");
        assert!(matches!(x.matches(&x, Some(&[Expr::one()])), Err(Error::ExpectedSymbol(_))));
    }

    #[test]
    fn merging_conflicts() {
        let x = Expr::symbol("x");
        let lhs = bindings(&[("a", x.clone())]);
        assert_eq!(merge(lhs.clone(), bindings(&[("a", x.clone())])), Some(lhs.clone()));
        assert_eq!(merge(lhs, bindings(&[("a", Expr::one())])), None);
    }
}
