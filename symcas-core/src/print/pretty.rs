//! A two-dimensional ASCII renderer.
//!
//! Each subexpression is drawn into a [`Pict`], a rectangular block of text with a baseline. Picts
//! are combined side by side (aligned on their baselines), stacked into fractions, or raised into
//! exponents.

use super::split_sign;
use crate::{
    expr::{Expr, ExprKind, Primary},
    number::Number,
};
use rug::Integer;

/// A rectangular block of text. Every line has the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pict {
    lines: Vec<String>,

    /// The index of the line that aligns with the baseline of neighboring picts.
    baseline: usize,
}

impl Pict {
    /// A single line of text.
    fn text(s: impl Into<String>) -> Self {
        Self { lines: vec![s.into()], baseline: 0 }
    }

    fn width(&self) -> usize {
        self.lines.first().map_or(0, |line| line.chars().count())
    }

    fn height(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines below the baseline.
    fn depth(&self) -> usize {
        self.height() - self.baseline - 1
    }

    /// Places picts side by side, aligned on their baselines.
    fn beside(picts: &[Pict]) -> Self {
        let above = picts.iter().map(|p| p.baseline).max().unwrap_or(0);
        let below = picts.iter().map(Pict::depth).max().unwrap_or(0);
        let mut lines = vec![String::new(); above + below + 1];

        for pict in picts {
            let top = above - pict.baseline;
            let blank = " ".repeat(pict.width());
            for (i, line) in lines.iter_mut().enumerate() {
                match i.checked_sub(top).and_then(|row| pict.lines.get(row)) {
                    Some(row) => line.push_str(row),
                    None => line.push_str(&blank),
                }
            }
        }

        Self { lines, baseline: above }
    }

    /// Centers this pict in the given width.
    fn centered(&self, width: usize) -> Vec<String> {
        let left = (width - self.width()) / 2;
        let right = width - self.width() - left;
        self.lines.iter()
            .map(|line| format!("{}{}{}", " ".repeat(left), line, " ".repeat(right)))
            .collect()
    }

    /// Stacks a numerator over a denominator, separated by a bar on the baseline.
    fn fraction(numer: Pict, denom: Pict) -> Self {
        let width = numer.width().max(denom.width());
        let mut lines = numer.centered(width);
        let baseline = lines.len();
        lines.push("-".repeat(width));
        lines.extend(denom.centered(width));
        Self { lines, baseline }
    }

    /// Raises `exponent` to the upper right of `base`.
    fn power(base: Pict, exponent: Pict) -> Self {
        let base_pad = " ".repeat(base.width());
        let exponent_pad = " ".repeat(exponent.width());
        let baseline = exponent.height() + base.baseline;
        let lines = exponent.lines.iter()
            .map(|line| format!("{}{}", base_pad, line))
            .chain(base.lines.iter().map(|line| format!("{}{}", line, exponent_pad)))
            .collect();
        Self { lines, baseline }
    }

    /// Draws a radical sign over the pict.
    fn sqrt(arg: Pict) -> Self {
        let last = arg.height() - 1;
        let mut lines = vec![format!("  {}", "_".repeat(arg.width()))];
        lines.extend(arg.lines.iter().enumerate().map(|(i, line)| {
            let prefix = if i == last { "\\/" } else { " |" };
            format!("{}{}", prefix, line)
        }));
        Self { lines, baseline: arg.baseline + 1 }
    }

    /// Surrounds the pict with parentheses as tall as it is.
    fn parens(self) -> Self {
        let height = self.height();
        let lines = self.lines.iter().enumerate().map(|(i, line)| {
            let (open, close) = match i {
                _ if height == 1 => ('(', ')'),
                0 => ('/', '\\'),
                i if i == height - 1 => ('\\', '/'),
                _ => ('|', '|'),
            };
            format!("{}{}{}", open, line, close)
        }).collect();
        Self { lines, baseline: self.baseline }
    }

    fn wrapped(self, parens: bool) -> Self {
        if parens {
            self.parens()
        } else {
            self
        }
    }

    /// Joins picts side by side, with a separator between each pair.
    fn join(picts: impl IntoIterator<Item = Pict>, separator: &str) -> Self {
        let mut parts = Vec::new();
        for (i, pict) in picts.into_iter().enumerate() {
            if i > 0 {
                parts.push(Self::text(separator));
            }
            parts.push(pict);
        }
        Self::beside(&parts)
    }
}

fn render_number(n: &Number) -> Pict {
    match n {
        Number::Rational(r) if *r.denom() != 1 => {
            let magnitude = Integer::from(r.numer().abs_ref());
            let fraction = Pict::fraction(Pict::text(magnitude.to_string()), Pict::text(r.denom().to_string()));
            if r.cmp0().is_lt() {
                Pict::beside(&[Pict::text("-"), fraction])
            } else {
                fraction
            }
        },
        _ => Pict::text(n.to_string()),
    }
}

fn render(expr: &Expr) -> Pict {
    match expr.kind() {
        ExprKind::Primary(Primary::Number(n)) => render_number(n),
        ExprKind::Primary(Primary::Call(func, arg)) => {
            Pict::beside(&[Pict::text(func.name()), render(arg).parens()])
        },
        ExprKind::Primary(primary) => Pict::text(primary.to_string()),
        ExprKind::Add(terms) => Pict::join(terms.iter().map(render), " + "),
        ExprKind::Mul(factors) => {
            let (negative, factors) = split_sign(factors);
            let product = Pict::join(factors.iter().enumerate().map(|(i, factor)| {
                let parens = !(i == 0 && factor.is_number()) && factor.needs_parens_in_product();
                render(factor).wrapped(parens)
            }), "*");
            if negative {
                Pict::beside(&[Pict::text("-"), product])
            } else {
                product
            }
        },
        ExprKind::Exp(base, exponent) if exponent.is_minus_one() => {
            Pict::fraction(Pict::text("1"), render(base))
        },
        ExprKind::Exp(base, exponent) if exponent.as_rational().is_some_and(|r| *r.numer() == 1 && *r.denom() == 2) => {
            Pict::sqrt(render(base))
        },
        ExprKind::Exp(base, exponent) => {
            Pict::power(render(base).wrapped(base.needs_parens_in_power()), render(exponent))
        },
    }
}

impl Expr {
    /// Draws this expression as multi-line ASCII art, with exponents raised above the line and
    /// fractions stacked. Trailing whitespace is removed from each line.
    pub fn to_pretty(&self) -> String {
        render(self).lines.iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
