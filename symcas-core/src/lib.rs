#![doc = include_str!("../README.md")]

pub mod combine;
pub mod consts;
mod derivative;
pub mod error;
pub mod eval;
pub mod evalf;
pub mod expand;
pub mod expr;
pub mod number;
pub mod parser;
pub mod pattern;
pub mod poly;
pub mod primitive;
pub mod print;
pub mod series;
pub mod subs;

pub use eval::{cos, exp, log, sin, sqrt};
pub use expr::{Expr, ExprKind, Func, Primary};
pub use number::Number;
pub use pattern::Bindings;
