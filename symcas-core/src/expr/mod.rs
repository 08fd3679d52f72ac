//! The expression tree.
//!
//! An [`Expr`] is an immutable, reference-counted node. Cloning an [`Expr`] is cheap and shares
//! the node; nothing is ever mutated after construction. Each node lazily computes and caches a
//! structural hash the first time it is needed, which makes equality checks between unrelated
//! trees cheap: two nodes with different hashes are rejected without walking either tree.
//!
//! Nodes should be constructed through the canonicalizing constructors ([`Expr::add`],
//! [`Expr::mul`], [`Expr::pow`], [`Expr::call`], and the operator overloads), which normalize
//! the node before returning it. Two mathematically identical inputs built through these
//! constructors produce equal trees.
//!
//! # Equality
//!
//! [`PartialEq`] implements **structural** equality. `x**2 + 2*x + 1` and `(x + 1)**2` are
//! different expressions, and so are `1/2` and `0.5`. Because every node is canonical, structural
//! equality is a useful stand-in for semantic equality, but it can never report that two
//! different-looking expressions are equal.

mod iter;
mod ops;
mod order;

use crate::{
    error::{Error, ExpectedSymbol},
    number::Number,
    primitive::{float, rat},
};
pub use iter::ExprIter;
use once_cell::unsync::OnceCell;
use rug::{Integer, Rational};
use std::{
    collections::{hash_map::DefaultHasher, BTreeSet},
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

pub(crate) use order::split_pow;

/// A function that can be applied to a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    /// The exponential function, `exp(x)`.
    Exp,

    /// The natural logarithm, `log(x)`.
    Log,

    /// The sine function, `sin(x)`.
    Sin,

    /// The cosine function, `cos(x)`.
    Cos,
}

impl Func {
    /// The name of the function, as it is written in input and output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
        }
    }
}

/// A single term / factor that is not itself a sum, product, or power.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primary {
    /// A number, such as `2`, `1/3`, or `0.5`.
    Number(Number),

    /// The imaginary unit, `I`.
    ImaginaryUnit,

    /// A symbol, such as `x`.
    Symbol(String),

    /// A function applied to an argument, such as `sin(x)`.
    Call(Func, Expr),
}

/// The kind of an expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// A single term or factor.
    Primary(Primary),

    /// A sum of at least two terms, in canonical order.
    Add(Vec<Expr>),

    /// A product of at least two factors, in canonical order, with the numeric coefficient (if
    /// any) first.
    Mul(Vec<Expr>),

    /// A power, `base**exponent`.
    Exp(Expr, Expr),
}

/// The shared node behind an [`Expr`].
struct Node {
    kind: ExprKind,

    /// Structural hash of `kind`, computed on first use. Nodes are immutable, so the cached value
    /// never goes stale.
    hash: OnceCell<u64>,
}

/// An immutable mathematical expression.
#[derive(Clone)]
pub struct Expr(Rc<Node>);

impl Expr {
    /// Wraps the given kind in a new node **without** canonicalizing it.
    ///
    /// The caller is responsible for upholding the canonical-form invariants of the kind.
    pub(crate) fn raw(kind: ExprKind) -> Self {
        Self(Rc::new(Node { kind, hash: OnceCell::new() }))
    }

    /// Creates a number expression.
    pub fn number(n: Number) -> Self {
        Self::raw(ExprKind::Primary(Primary::Number(n)))
    }

    /// Creates an exact integer.
    pub fn integer(n: impl Into<Integer>) -> Self {
        Self::number(Number::Rational(Rational::from(n.into())))
    }

    /// Creates an exact rational, `numer / denom`. The result is reduced to lowest terms.
    ///
    /// Returns [`None`] if the denominator is zero.
    pub fn rational(numer: impl Into<Integer>, denom: impl Into<Integer>) -> Option<Self> {
        let denom = denom.into();
        if denom.cmp0().is_eq() {
            return None;
        }
        Some(Self::number(Number::Rational(rat((numer.into(), denom)))))
    }

    /// Creates a float, returning [`None`] if the value is not finite.
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::number)
    }

    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::raw(ExprKind::Primary(Primary::Symbol(name.into())))
    }

    /// Returns the imaginary unit, `I`.
    pub fn imaginary_unit() -> Self {
        Self::raw(ExprKind::Primary(Primary::ImaginaryUnit))
    }

    /// Returns the rational `0`.
    pub fn zero() -> Self {
        Self::integer(0)
    }

    /// Returns the rational `1`.
    pub fn one() -> Self {
        Self::integer(1)
    }

    /// Returns the rational `-1`.
    pub fn minus_one() -> Self {
        Self::integer(-1)
    }

    /// Returns the kind of this expression.
    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Returns the cached structural hash of this expression, computing it if needed.
    pub fn hash_value(&self) -> u64 {
        *self.0.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.0.kind.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Returns the number stored in this expression, if it is a number.
    pub fn as_number(&self) -> Option<&Number> {
        match self.kind() {
            ExprKind::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns the exact rational stored in this expression, if it is one.
    pub fn as_rational(&self) -> Option<&Rational> {
        self.as_number()?.as_rational()
    }

    /// Returns the exact integer stored in this expression, if it is one.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()?.as_integer()
    }

    /// Returns the name of the symbol, if this expression is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self.kind() {
            ExprKind::Primary(Primary::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the base and exponent, if this expression is a power.
    pub fn as_pow(&self) -> Option<(&Expr, &Expr)> {
        match self.kind() {
            ExprKind::Exp(base, exponent) => Some((base, exponent)),
            _ => None,
        }
    }

    /// Returns the argument, if this expression is a call to the given function.
    pub fn as_call(&self, func: Func) -> Option<&Expr> {
        match self.kind() {
            ExprKind::Primary(Primary::Call(f, arg)) if *f == func => Some(arg),
            _ => None,
        }
    }

    /// Returns true if this expression is a number.
    pub fn is_number(&self) -> bool {
        self.as_number().is_some()
    }

    /// Returns true if this expression is the rational zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Number::is_zero)
    }

    /// Returns true if this expression is the rational one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(Number::is_one)
    }

    /// Returns true if this expression is the rational minus one.
    pub fn is_minus_one(&self) -> bool {
        self.as_number().is_some_and(Number::is_minus_one)
    }

    /// Returns true if this expression is an exact integer.
    pub fn is_integer(&self) -> bool {
        self.as_integer().is_some()
    }

    /// Returns true if this expression is the imaginary unit.
    pub fn is_imaginary_unit(&self) -> bool {
        matches!(self.kind(), ExprKind::Primary(Primary::ImaginaryUnit))
    }

    /// Returns the name of the symbol, or an [`ExpectedSymbol`] error if this expression is not
    /// a symbol.
    pub fn expect_symbol(&self) -> Result<&str, Error> {
        self.as_symbol()
            .ok_or_else(|| ExpectedSymbol { found: self.to_string() }.into())
    }

    /// Returns the immediate children of this expression, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match self.kind() {
            ExprKind::Primary(Primary::Call(_, arg)) => vec![arg],
            ExprKind::Primary(_) => Vec::new(),
            ExprKind::Add(exprs) | ExprKind::Mul(exprs) => exprs.iter().collect(),
            ExprKind::Exp(base, exponent) => vec![base, exponent],
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). The expression itself is yielded last.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if `target` occurs anywhere in this expression, including at the root.
    pub fn has(&self, target: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == target)
    }

    /// Returns true if the symbol with the given name occurs anywhere in this expression.
    pub fn has_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns the names of all symbols in this expression.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| expr.as_symbol().map(str::to_string))
            .collect()
    }

    /// Returns the atoms of this expression: every number, symbol, and imaginary unit that
    /// occurs in it.
    pub fn atoms(&self) -> BTreeSet<Expr> {
        self.post_order_iter()
            .filter(|expr| matches!(
                expr.kind(),
                ExprKind::Primary(Primary::Number(_) | Primary::Symbol(_) | Primary::ImaginaryUnit)
            ))
            .cloned()
            .collect()
    }

    /// Splits a sum or product into its first term / factor and the rest.
    ///
    /// For a product, the first factor is the numeric coefficient when there is one. The rest is
    /// rebuilt from the remaining, already canonical children. Returns [`None`] for every other
    /// kind of expression.
    pub fn getab(&self) -> Option<(Expr, Expr)> {
        match self.kind() {
            ExprKind::Add(terms) => {
                let (a, rest) = terms.split_first()?;
                Some((a.clone(), Self::from_canonical_add(rest.to_vec())))
            },
            ExprKind::Mul(factors) => {
                let (a, rest) = factors.split_first()?;
                Some((a.clone(), Self::from_canonical_mul(rest.to_vec())))
            },
            _ => None,
        }
    }

    /// Builds a sum from terms that are already canonical, distinct, and sorted, downgrading a
    /// sum with fewer than two terms.
    pub(crate) fn from_canonical_add(mut terms: Vec<Expr>) -> Self {
        match terms.len() {
            0 => Self::zero(),
            1 => terms.remove(0),
            _ => Self::raw(ExprKind::Add(terms)),
        }
    }

    /// Builds a product from factors that are already canonical, distinct, and sorted,
    /// downgrading a product with fewer than two factors.
    pub(crate) fn from_canonical_mul(mut factors: Vec<Expr>) -> Self {
        match factors.len() {
            0 => Self::one(),
            1 => factors.remove(0),
            _ => Self::raw(ExprKind::Mul(factors)),
        }
    }

    /// Returns the terms of this expression if it is a sum, or the expression itself otherwise.
    pub fn terms(&self) -> &[Expr] {
        match self.kind() {
            ExprKind::Add(terms) => terms,
            _ => std::slice::from_ref(self),
        }
    }

    /// Returns the factors of this expression if it is a product, or the expression itself
    /// otherwise.
    pub fn factors(&self) -> &[Expr] {
        match self.kind() {
            ExprKind::Mul(factors) => factors,
            _ => std::slice::from_ref(self),
        }
    }
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.0.kind
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0.kind, f)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
            || (self.hash_value() == other.hash_value() && self.0.kind == other.0.kind)
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Self::integer(n)
    }
}

impl From<Integer> for Expr {
    fn from(n: Integer) -> Self {
        Self::integer(n)
    }
}

impl From<Rational> for Expr {
    fn from(r: Rational) -> Self {
        Self::number(Number::Rational(r))
    }
}

impl From<Number> for Expr {
    fn from(n: Number) -> Self {
        Self::number(n)
    }
}

/// Non-finite values are mapped to `0.0`; use [`Expr::float`] to detect them instead.
impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::float(value).unwrap_or_else(|| Self::number(Number::Float(float(0.0))))
    }
}

/// Creates a symbol.
impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::symbol(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::int;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_equality() {
        let a = Expr::symbol("x");
        let b = Expr::symbol("x");
        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
        assert_ne!(Expr::symbol("x"), Expr::symbol("y"));
        assert_ne!(Expr::one(), Expr::from(1.0));
    }

    #[test]
    fn rational_constructor() {
        assert_eq!(Expr::rational(4, 6), Some(Expr::from(rat((2, 3)))));
        assert_eq!(Expr::rational(1, 0), None);
        assert!(Expr::rational(-3, 3).is_some_and(|e| e.is_minus_one()));
    }

    #[test]
    fn predicates() {
        assert!(Expr::zero().is_zero());
        assert!(Expr::from(int(5)).is_integer());
        assert!(!Expr::from(rat((1, 2))).is_integer());
        assert!(Expr::imaginary_unit().is_imaginary_unit());
        assert!(Expr::float(f64::NAN).is_none());
    }

    #[test]
    fn expect_symbol() {
        assert_eq!(Expr::symbol("x").expect_symbol(), Ok("x"));
        assert!(matches!(Expr::one().expect_symbol(), Err(Error::ExpectedSymbol(_))));
    }

    #[test]
    fn free_symbols_and_atoms() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let expr = x.clone() * y.clone() + crate::exp(&x) + Expr::integer(2);

        assert_eq!(
            expr.free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string()],
        );
        assert!(expr.has(&y));
        assert!(expr.has(&crate::exp(&x)));
        assert!(!expr.has(&Expr::symbol("z")));

        let atoms = expr.atoms();
        assert!(atoms.contains(&Expr::integer(2)));
        assert!(atoms.contains(&x));
        assert_eq!(atoms.len(), 3);
    }

    #[test]
    fn getab_of_product() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let product = Expr::integer(3) * x.clone() * y.clone();
        let (a, b) = product.getab().unwrap_or_else(|| panic!("a product splits"));
        assert_eq!(a, Expr::integer(3));
        assert_eq!(b, x * y);
        assert_eq!(Expr::symbol("z").getab(), None);
    }
}
