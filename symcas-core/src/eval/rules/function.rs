//! Canonicalization rules for `exp`, `log`, `sin`, and `cos`.

use super::fired;
use crate::{
    error::{Error, PoleError},
    expr::{Expr, ExprKind, Func, Primary},
    number::Number,
    primitive::float,
};

/// Builds the unevaluated call `func(arg)`.
pub fn raw_call(func: Func, arg: &Expr) -> Expr {
    Expr::raw(ExprKind::Primary(Primary::Call(func, arg.clone())))
}

/// `exp(0) = 1`
pub fn exp_zero(arg: &Expr) -> Option<Expr> {
    if arg.is_zero() {
        fired!("exp_zero", "exp(0)");
        Some(Expr::one())
    } else {
        None
    }
}

/// `exp(log(u)) = u`
pub fn exp_log(arg: &Expr) -> Option<Expr> {
    let inner = arg.as_call(Func::Log)?;
    fired!("exp_log", "exp({})", arg);
    Some(inner.clone())
}

/// `log(0)` is a pole.
pub fn log_zero(arg: &Expr) -> Result<(), Error> {
    if arg.is_zero() {
        Err(PoleError { expr: "log(0)".to_string() }.into())
    } else {
        Ok(())
    }
}

/// `log(1) = 0`
pub fn log_one(arg: &Expr) -> Option<Expr> {
    if arg.is_one() {
        fired!("log_one", "log(1)");
        Some(Expr::zero())
    } else {
        None
    }
}

/// `log(exp(u)) = u`
pub fn log_exp(arg: &Expr) -> Option<Expr> {
    let inner = arg.as_call(Func::Exp)?;
    fired!("log_exp", "log({})", arg);
    Some(inner.clone())
}

/// `sin(0) = 0`
pub fn sin_zero(arg: &Expr) -> Option<Expr> {
    if arg.is_zero() {
        fired!("sin_zero", "sin(0)");
        Some(Expr::zero())
    } else {
        None
    }
}

/// `cos(0) = 1`
pub fn cos_zero(arg: &Expr) -> Option<Expr> {
    if arg.is_zero() {
        fired!("cos_zero", "cos(0)");
        Some(Expr::one())
    } else {
        None
    }
}

/// Evaluates a function of a float argument, if the result is a finite real number.
pub fn float_arg(func: Func, arg: &Expr) -> Option<Expr> {
    let Some(Number::Float(value)) = arg.as_number() else {
        return None;
    };

    let result = match func {
        Func::Exp => float(value.exp_ref()),
        Func::Log => float(value.ln_ref()),
        Func::Sin => float(value.sin_ref()),
        Func::Cos => float(value.cos_ref()),
    };
    let result = Number::from_float(result)?;
    fired!("float_arg", "{}({})", func.name(), arg);
    Some(Expr::number(result))
}

/// Canonicalizes `exp(arg)`.
pub(crate) fn eval_exp(arg: &Expr) -> Expr {
    exp_zero(arg)
        .or_else(|| exp_log(arg))
        .or_else(|| float_arg(Func::Exp, arg))
        .unwrap_or_else(|| raw_call(Func::Exp, arg))
}

/// Canonicalizes `log(arg)`.
pub(crate) fn eval_log(arg: &Expr) -> Result<Expr, Error> {
    log_zero(arg)?;
    Ok(log_one(arg)
        .or_else(|| log_exp(arg))
        .or_else(|| float_arg(Func::Log, arg))
        .unwrap_or_else(|| raw_call(Func::Log, arg)))
}

/// Canonicalizes `sin(arg)`.
pub(crate) fn eval_sin(arg: &Expr) -> Expr {
    sin_zero(arg)
        .or_else(|| float_arg(Func::Sin, arg))
        .unwrap_or_else(|| raw_call(Func::Sin, arg))
}

/// Canonicalizes `cos(arg)`.
pub(crate) fn eval_cos(arg: &Expr) -> Expr {
    cos_zero(arg)
        .or_else(|| float_arg(Func::Cos, arg))
        .unwrap_or_else(|| raw_call(Func::Cos, arg))
}

/// Canonicalizes `func(arg)`.
pub(crate) fn eval_call(func: Func, arg: &Expr) -> Result<Expr, Error> {
    match func {
        Func::Exp => Ok(eval_exp(arg)),
        Func::Log => eval_log(arg),
        Func::Sin => Ok(eval_sin(arg)),
        Func::Cos => Ok(eval_cos(arg)),
    }
}

#[cfg(test)]
mod tests {
    use crate::{cos, error::Error, exp, log, sin, Expr};
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn special_values() {
        assert_eq!(exp(&Expr::zero()), Expr::one());
        assert_eq!(log(&Expr::one()), Ok(Expr::zero()));
        assert_eq!(sin(&Expr::zero()), Expr::zero());
        assert_eq!(cos(&Expr::zero()), Expr::one());
    }

    #[test]
    fn log_of_zero_is_a_pole() {
        assert!(matches!(log(&Expr::zero()), Err(Error::Pole(_))));
    }

    #[test]
    fn inverses() {
        let x = Expr::symbol("x");
        assert_eq!(exp(&log(&x).unwrap_or_else(|err| panic!("{err}"))), x);
        assert_eq!(log(&exp(&x)), Ok(x));
    }

    #[test]
    fn float_arguments() {
        let value = exp(&Expr::from(1.0));
        let n = value.as_number().map(|n| n.to_float().to_f64());
        assert_float_relative_eq!(n.unwrap_or(f64::NAN), std::f64::consts::E);

        // log of a negative float is not real
        let node = log(&Expr::from(-1.0)).unwrap_or_else(|err| panic!("{err}"));
        assert!(!node.is_number());
    }

    #[test]
    fn exact_arguments_stay_symbolic() {
        let e = exp(&Expr::one());
        assert!(!e.is_number());
        assert_eq!(e.to_string(), "exp(1)");
    }
}
