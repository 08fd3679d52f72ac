use super::split_sign;
use crate::{
    expr::{Expr, ExprKind, Func, Primary},
    number::Number,
};
use std::fmt::{self, Write};

impl Func {
    /// The LaTeX command for this function.
    fn latex_command(self) -> &'static str {
        match self {
            Self::Exp => r"\exp",
            Self::Log => r"\log",
            Self::Sin => r"\sin",
            Self::Cos => r"\cos",
        }
    }
}

fn write_number(out: &mut String, n: &Number) -> fmt::Result {
    match n {
        Number::Rational(r) if *r.denom() == 1 => write!(out, "{}", r.numer()),
        Number::Rational(r) if r.cmp0().is_lt() => {
            write!(out, r"-\frac{{{}}}{{{}}}", rug::Integer::from(r.numer().abs_ref()), r.denom())
        },
        Number::Rational(r) => write!(out, r"\frac{{{}}}{{{}}}", r.numer(), r.denom()),
        Number::Float(_) => write!(out, "{}", n),
    }
}

fn write_wrapped(out: &mut String, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        out.push_str(r"\left(");
        write_latex(out, expr)?;
        out.push_str(r"\right)");
        Ok(())
    } else {
        write_latex(out, expr)
    }
}

fn write_latex(out: &mut String, expr: &Expr) -> fmt::Result {
    match expr.kind() {
        ExprKind::Primary(Primary::Number(n)) => write_number(out, n),
        ExprKind::Primary(Primary::ImaginaryUnit) => write!(out, "i"),
        ExprKind::Primary(Primary::Symbol(name)) => write!(out, "{}", name),
        ExprKind::Primary(Primary::Call(func, arg)) => {
            out.push_str(func.latex_command());
            write_wrapped(out, arg, true)
        },
        ExprKind::Add(terms) => {
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    out.push_str(" + ");
                }
                write_latex(out, term)?;
            }
            Ok(())
        },
        ExprKind::Mul(factors) => {
            let (negative, factors) = split_sign(factors);
            if negative {
                out.push('-');
            }
            for (i, factor) in factors.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let parens = !(i == 0 && factor.is_number()) && factor.needs_parens_in_product();
                write_wrapped(out, factor, parens)?;
            }
            Ok(())
        },
        ExprKind::Exp(base, exponent) if exponent.is_minus_one() => {
            out.push_str(r"\frac{1}{");
            write_latex(out, base)?;
            out.push('}');
            Ok(())
        },
        ExprKind::Exp(base, exponent) => {
            out.push('{');
            write_wrapped(out, base, base.needs_parens_in_power())?;
            out.push_str("}^{");
            // the exponent is already grouped by the braces
            write_latex(out, exponent)?;
            out.push('}');
            Ok(())
        },
    }
}

impl Expr {
    /// Formats this expression as LaTeX source.
    ///
    /// ```
    /// use symcas_core::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let expr = x.pow(&Expr::from(2)).unwrap() + Expr::one();
    /// assert_eq!(expr.to_latex(), "1 + {x}^{2}");
    /// ```
    pub fn to_latex(&self) -> String {
        let mut out = String::new();
        // writing to a `String` cannot fail
        let _ = write_latex(&mut out, self);
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{primitive::rat, sin, Expr};
    use pretty_assertions::assert_eq;

    fn pow(base: &Expr, exponent: impl Into<Expr>) -> Expr {
        base.pow(&exponent.into()).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn powers() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(pow(&x, 2).to_latex(), "{x}^{2}");
        assert_eq!(pow(&x, -1).to_latex(), r"\frac{1}{x}");
        assert_eq!(pow(&x, rat((1, 2))).to_latex(), r"{x}^{\frac{1}{2}}");
        assert_eq!(pow(&(x.clone() + y), 3).to_latex(), r"{\left(x + y\right)}^{3}");
    }

    #[test]
    fn products_and_functions() {
        let x = Expr::symbol("x");
        let product = Expr::from(rat((-1, 6))) * pow(&x, 2);
        assert_eq!(product.to_latex(), r"-\frac{1}{6} {x}^{2}");
        assert_eq!((-sin(&x)).to_latex(), r"-\sin\left(x\right)");
        assert_eq!((Expr::from(2) * Expr::imaginary_unit()).to_latex(), "2 i");
    }
}
