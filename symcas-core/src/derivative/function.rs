//! Symbolic derivatives of the supported functions.

use super::derivative;
use crate::{
    error::Error,
    eval::{cos, exp, sin},
    expr::{Expr, Func},
};

/// Computes the derivative of `func(arg)`, applying the chain rule.
pub(super) fn function_derivative(func: Func, arg: &Expr, with: &str) -> Result<Expr, Error> {
    let inner = derivative(arg, with)?;
    let outer = match func {
        Func::Exp => exp(arg),
        Func::Log => arg.pow(&Expr::minus_one())?,
        Func::Sin => cos(arg),
        Func::Cos => -sin(arg),
    };

    Ok(inner * outer)
}
