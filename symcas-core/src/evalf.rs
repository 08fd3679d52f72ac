//! Numeric evaluation of expressions.

use crate::{
    error::{Error, FreeSymbols, NotReal},
    expr::{Expr, ExprKind, Func, Primary},
    primitive::float,
};
use rug::{ops::Pow, Float};

/// Returns the value if it is a finite real number, or a [`NotReal`] error naming `expr`.
fn finite(value: Float, expr: &Expr) -> Result<Float, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NotReal { expr: expr.to_string() }.into())
    }
}

/// Evaluates an expression that is known to contain no symbols.
fn eval(expr: &Expr) -> Result<Float, Error> {
    match expr.kind() {
        ExprKind::Primary(Primary::Number(n)) => Ok(n.to_float()),
        ExprKind::Primary(Primary::ImaginaryUnit) => Err(NotReal { expr: expr.to_string() }.into()),
        ExprKind::Primary(Primary::Symbol(name)) => Err(FreeSymbols { symbols: vec![name.clone()] }.into()),
        ExprKind::Primary(Primary::Call(func, arg)) => {
            let arg = eval(arg)?;
            let value = match func {
                Func::Exp => float(arg.exp_ref()),
                Func::Log if arg.cmp0().is_some_and(|ord| ord.is_gt()) => float(arg.ln_ref()),
                Func::Log => return Err(NotReal { expr: expr.to_string() }.into()),
                Func::Sin => float(arg.sin_ref()),
                Func::Cos => float(arg.cos_ref()),
            };
            finite(value, expr)
        },
        ExprKind::Add(terms) => {
            let mut sum = float(0);
            for term in terms {
                sum += eval(term)?;
            }
            finite(sum, expr)
        },
        ExprKind::Mul(factors) => {
            let mut product = float(1);
            for factor in factors {
                product *= eval(factor)?;
            }
            finite(product, expr)
        },
        ExprKind::Exp(base, exponent) => {
            let base = eval(base)?;
            let exponent = eval(exponent)?;
            finite(float((&base).pow(&exponent)), expr)
        },
    }
}

impl Expr {
    /// Numerically evaluates this expression to a [`Float`] with
    /// [`PRECISION`](crate::primitive::PRECISION) bits of precision.
    ///
    /// Returns a [`FreeSymbols`] error if the expression contains symbols, and a [`NotReal`]
    /// error if any part of it does not evaluate to a finite real number.
    pub fn evalf(&self) -> Result<Float, Error> {
        let symbols = self.free_symbols();
        if !symbols.is_empty() {
            return Err(FreeSymbols { symbols: symbols.into_iter().collect() }.into());
        }
        eval(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Error, exp, log, primitive::rat, sqrt, Expr};
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };

    fn evalf(expr: &Expr) -> f64 {
        expr.evalf().unwrap_or_else(|err| panic!("{err}")).to_f64()
    }

    #[test]
    fn exact_values() {
        assert_float_relative_eq!(evalf(&Expr::from(rat((1, 4)))), 0.25);
        assert_float_relative_eq!(evalf(&sqrt(&Expr::from(2))), std::f64::consts::SQRT_2);
        assert_float_relative_eq!(evalf(&exp(&Expr::one())), std::f64::consts::E);
    }

    #[test]
    fn compound() {
        // 2**(1/2) * 3 + log(2)
        let log_2 = log(&Expr::from(2)).unwrap_or_else(|err| panic!("{err}"));
        let expr = sqrt(&Expr::from(2)) * Expr::from(3) + log_2;
        assert_float_relative_eq!(
            evalf(&expr),
            3.0 * std::f64::consts::SQRT_2 + std::f64::consts::LN_2
        );
    }

    #[test]
    fn free_symbols() {
        let expr = Expr::symbol("y") + Expr::symbol("x");
        match expr.evalf() {
            Err(Error::FreeSymbols(err)) => assert_eq!(err.symbols, vec!["x", "y"]),
            other => panic!("expected free symbols, got {other:?}"),
        }
    }

    #[test]
    fn not_real() {
        assert!(matches!(Expr::imaginary_unit().evalf(), Err(Error::NotReal(_))));
        let fourth_root = Expr::from(-2).pow(&Expr::from(rat((1, 4)))).unwrap_or_else(|err| panic!("{err}"));
        assert!(matches!(fourth_root.evalf(), Err(Error::NotReal(_))));
        let log_neg = log(&Expr::from(-1)).unwrap_or_else(|err| panic!("{err}"));
        assert!(matches!(log_neg.evalf(), Err(Error::NotReal(_))));
    }
}
