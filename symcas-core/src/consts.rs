//! Limits that bound the work the kernel is willing to do. Every operation that can recurse
//! through representation changes checks one of these instead of relying on the call stack.

/// Maximum nesting of [`series`](crate::Expr::series) calls. Each fallback strategy (geometric
/// series, Laurent shift, `exp(e*log(b))` rewrite) re-enters the series expansion once; this
/// limit turns a runaway chain of rewrites into a [`DepthExceeded`](crate::error::DepthExceeded)
/// error.
pub const MAX_SERIES_DEPTH: usize = 32;

/// Largest positive integer power of a sum that [`expand`](crate::Expr::expand) multiplies out.
/// Larger powers are left as powers of the expanded base.
pub const MAX_EXPAND_POWER: u32 = 64;

/// How many orders past the requested one a series expansion looks for the leading term of a
/// base whose low-order expansion vanishes, such as `sin(x) - x`. A base that is still `0` after
/// this many extra orders has no leading term as far as the series is concerned.
pub const MAX_LEADING_ORDERS: u32 = 16;

/// Largest magnitude of an integer exponent that is evaluated exactly on a rational base. Larger
/// powers, such as `3**100000`, are left as `Pow` nodes.
pub const MAX_EXACT_EXPONENT: u32 = 1 << 12;
