//! Errors produced by the kernel.
//!
//! Every kind is a plain struct deriving [`ErrorKind`], so that it can be rendered with `ariadne`
//! once it is attached to a span of user input with [`Error::into_report`]. Kernel operations
//! return the [`Error`] enum, which lets callers react to specific kinds. In particular,
//! [`series`](crate::Expr::series) matches on [`Error::Pole`] to pick a different expansion
//! strategy.

use ariadne::Fmt;
use symcas_attrs::ErrorKind;
use symcas_error::{ErrorKind, EXPR};
use std::ops::Range;

/// A pole was hit while constructing an expression: `0` raised to a negative power, or the
/// logarithm of `0`.
///
/// Series expansion recovers from this error; everywhere else it reaches the caller.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("pole encountered: `{}` is undefined", self.expr),
    labels = ["this expression has a pole"],
    help = format!("a {} of the expression may still exist", "series expansion".fg(EXPR)),
)]
pub struct PoleError {
    /// The offending sub-expression, printed.
    pub expr: String,
}

/// Numeric evaluation was requested for an expression that still contains symbols.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot numerically evaluate an expression with free symbols: {}", self.symbols.join(", ")),
    labels = ["this expression"],
    help = format!("substitute values for the symbols first, using {}", "subs(expr, symbol, value)".fg(EXPR)),
)]
pub struct FreeSymbols {
    /// The free symbols, sorted by name.
    pub symbols: Vec<String>,
}

/// Numeric evaluation would produce a non-real value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to a real number", self.expr),
    labels = ["this expression"],
)]
pub struct NotReal {
    /// The offending sub-expression, printed.
    pub expr: String,
}

/// A symbol was required (as the variable of a derivative or series, or as a wildcard), but
/// another kind of expression was given.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a symbol, found `{}`", self.found),
    labels = ["this expression"],
)]
pub struct ExpectedSymbol {
    /// The expression that was given instead, printed.
    pub found: String,
}

/// A polynomial in the given symbol was required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a polynomial in `{}`", self.expr, self.symbol),
    labels = ["this expression"],
)]
pub struct NotPolynomial {
    /// The expression, printed.
    pub expr: String,

    /// The symbol the expression was expected to be a polynomial in.
    pub symbol: String,
}

/// Series expansion recursed through too many representation changes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("series expansion exceeded the maximum nesting depth of {}", self.limit),
    labels = ["while expanding this expression"],
)]
pub struct DepthExceeded {
    /// The limit that was exceeded.
    pub limit: usize,
}

/// Any error produced by a kernel operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Pole(PoleError),
    FreeSymbols(FreeSymbols),
    NotReal(NotReal),
    ExpectedSymbol(ExpectedSymbol),
    NotPolynomial(NotPolynomial),
    DepthExceeded(DepthExceeded),
}

impl Error {
    /// Returns true if this error is the recoverable pole signal.
    pub fn is_pole(&self) -> bool {
        matches!(self, Self::Pole(_))
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &dyn ErrorKind {
        match self {
            Self::Pole(kind) => kind,
            Self::FreeSymbols(kind) => kind,
            Self::NotReal(kind) => kind,
            Self::ExpectedSymbol(kind) => kind,
            Self::NotPolynomial(kind) => kind,
            Self::DepthExceeded(kind) => kind,
        }
    }

    /// Attaches this error to the given span of user input, so that it can be reported.
    pub fn into_report(self, span: Range<usize>) -> symcas_error::Error {
        let spans = vec![span];
        match self {
            Self::Pole(kind) => symcas_error::Error::new(spans, kind),
            Self::FreeSymbols(kind) => symcas_error::Error::new(spans, kind),
            Self::NotReal(kind) => symcas_error::Error::new(spans, kind),
            Self::ExpectedSymbol(kind) => symcas_error::Error::new(spans, kind),
            Self::NotPolynomial(kind) => symcas_error::Error::new(spans, kind),
            Self::DepthExceeded(kind) => symcas_error::Error::new(spans, kind),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind().message())
    }
}

impl std::error::Error for Error {}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Error {
                fn from(kind: $kind) -> Self {
                    Self::$kind(kind)
                }
            }
        )*
    };
}

impl_from_kind!(FreeSymbols, NotReal, ExpectedSymbol, NotPolynomial, DepthExceeded);

impl From<PoleError> for Error {
    fn from(kind: PoleError) -> Self {
        Self::Pole(kind)
    }
}
