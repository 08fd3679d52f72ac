//! Parsing and running a single line of input.

use symcas_core::{
    parser::{
        error::WrongArgumentCount,
        tokenizer::{Token, TokenKind},
        Parser,
    },
    Bindings,
    Expr,
};
use symcas_error::Error;

/// The kind of value a command argument must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arg {
    Expr,
    Integer,
}

/// The name and arguments of a command.
#[derive(Debug)]
struct Signature {
    name: &'static str,

    /// Every argument the command accepts, in order.
    args: &'static [Arg],

    /// How many of the leading `args` are required.
    required: usize,
}

const SIGNATURES: &[Signature] = &[
    Signature { name: "diff", args: &[Arg::Expr, Arg::Expr, Arg::Integer], required: 2 },
    Signature { name: "series", args: &[Arg::Expr, Arg::Expr, Arg::Integer], required: 3 },
    Signature { name: "subs", args: &[Arg::Expr, Arg::Expr, Arg::Expr], required: 3 },
    Signature { name: "match", args: &[Arg::Expr, Arg::Expr], required: 2 },
    Signature { name: "expand", args: &[Arg::Expr], required: 1 },
    Signature { name: "combine", args: &[Arg::Expr], required: 1 },
    Signature { name: "latex", args: &[Arg::Expr], required: 1 },
    Signature { name: "pretty", args: &[Arg::Expr], required: 1 },
    Signature { name: "evalf", args: &[Arg::Expr], required: 1 },
];

/// A parsed line of input.
#[derive(Debug)]
enum Line {
    /// A bare expression, printed in canonical form.
    Expr(Expr),

    /// A command, with its expression arguments and optional integer argument.
    Command {
        name: &'static str,
        exprs: Vec<Expr>,
        order: Option<u32>,
    },
}

/// Returns the signature of the command starting at the parser's cursor, if any.
fn command_at(parser: &Parser) -> Option<&'static Signature> {
    let name = parser.peek().filter(|token| token.kind == TokenKind::Name)?;
    parser.peek_second().filter(|token| token.kind == TokenKind::OpenParen)?;
    SIGNATURES.iter().find(|sig| sig.name == name.lexeme)
}

/// Parses the arguments of a command, after its name.
fn parse_command(parser: &mut Parser, name: Token, sig: &'static Signature) -> Result<Line, Error> {
    parser.expect(&[TokenKind::OpenParen])?;

    let mut exprs = Vec::new();
    let mut order = None;
    let mut given = 0;
    loop {
        match sig.args.get(given) {
            Some(Arg::Integer) => order = Some(parser.parse_integer()?),
            // extra arguments are parsed so that the count in the error is accurate
            Some(Arg::Expr) | None => exprs.push(parser.parse_expr()?),
        }
        given += 1;

        let separator = parser.expect(&[TokenKind::Comma, TokenKind::CloseParen])?;
        if separator.kind == TokenKind::CloseParen {
            break;
        }
    }

    if given < sig.required || given > sig.args.len() {
        let expected = if sig.required == sig.args.len() {
            sig.required.to_string()
        } else {
            format!("{} or {}", sig.required, sig.args.len())
        };
        let end = parser.span().start.max(name.span.end);
        return Err(Error::new(vec![name.span.start..end], WrongArgumentCount {
            name: sig.name.to_string(),
            expected,
            given,
        }));
    }

    parser.expect_eof()?;
    Ok(Line::Command { name: sig.name, exprs, order })
}

fn parse_line(input: &str) -> Result<Line, Error> {
    let mut parser = Parser::new(input)?;
    match command_at(&parser) {
        Some(sig) => {
            let name = parser.next_token()?;
            parse_command(&mut parser, name, sig)
        },
        None => parser.parse_complete().map(Line::Expr),
    }
}

fn format_bindings(bindings: &Bindings) -> String {
    let pairs = bindings.iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>();
    format!("{{{}}}", pairs.join(", "))
}

/// Parses and runs one line of input, returning the text to print.
pub fn run_line(input: &str) -> Result<String, Error> {
    let line = parse_line(input)?;
    let whole = 0..input.len();
    let report = |err: symcas_core::error::Error| err.into_report(whole.clone());

    let (name, exprs, order) = match line {
        Line::Expr(expr) => return Ok(expr.to_string()),
        Line::Command { name, exprs, order } => (name, exprs, order),
    };
    log::debug!("running `{}` with {} argument(s)", name, exprs.len());

    let output = match (name, exprs.as_slice()) {
        ("diff", [e, x]) => e.diffn(x, order.unwrap_or(1)).map_err(report)?.to_string(),
        ("series", [e, x]) => e.series(x, order.unwrap_or(0)).map_err(report)?.to_string(),
        ("subs", [e, old, new]) => e.subs(old, new).map_err(report)?.to_string(),
        ("match", [e, pattern]) => match e.matches(pattern, None).map_err(report)? {
            Some(bindings) => format_bindings(&bindings),
            None => "no match".to_string(),
        },
        ("expand", [e]) => e.expand().map_err(report)?.to_string(),
        ("combine", [e]) => e.combine().map_err(report)?.to_string(),
        ("latex", [e]) => e.to_latex(),
        ("pretty", [e]) => e.to_pretty(),
        ("evalf", [e]) => e.evalf().map_err(report)?.to_f64().to_string(),
        _ => unreachable!("argument count of `{}` is checked while parsing", name),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(input: &str) -> String {
        run_line(input).unwrap_or_else(|err| panic!("{input}: {err}"))
    }

    fn run_err(input: &str) -> Error {
        match run_line(input) {
            Ok(output) => panic!("{input} printed {output}"),
            Err(err) => err,
        }
    }

    #[test]
    fn bare_expression() {
        assert_eq!(run("x + x"), "2*x");
        assert_eq!(run("x*y*x"), "x**2*y");
        assert_eq!(run("(x*y)**-1"), "(1/x)*(1/y)");
    }

    #[test]
    fn derivatives() {
        assert_eq!(run("diff(x**3, x)"), "3*x**2");
        assert_eq!(run("diff(x**3, x, 2)"), "6*x");
        assert_eq!(run("diff(x**3, x, 0)"), "x**3");
    }

    #[test]
    fn series_and_substitution() {
        assert_eq!(run("series(sin(x)/x, x, 3)"), "1 + -1/6*x**2");
        assert_eq!(run("subs(x**2 + 1, x, 3)"), "10");
        assert_eq!(run("match((x + y)**3, b**e)"), "{b: x + y, e: 3}");
        assert_eq!(run("match(x, b**e)"), "no match");
    }

    #[test]
    fn printers_and_evalf() {
        assert_eq!(run("expand((x + 1)**2)"), "1 + 2*x + x**2");
        assert_eq!(run("exp(x)**2"), "exp(x)**2");
        assert_eq!(run("combine(exp(x)**2)"), "exp(2*x)");
        assert_eq!(run("latex(x**2)"), "{x}^{2}");
        assert_eq!(run("pretty(x**2)"), " 2\nx");
        assert_eq!(run("evalf(1/4)"), "0.25");
    }

    #[test]
    fn kernel_errors_cover_the_line() {
        let input = "subs(1/x, x, 0)";
        let err = run_err(input);
        assert_eq!(err.spans, vec![0..input.len()]);
        assert!(err.to_string().starts_with("pole encountered"));
    }

    #[test]
    fn argument_errors() {
        assert_eq!(
            run_err("series(x, x)").to_string(),
            "`series` takes 3 argument(s), but 2 were given",
        );
        assert_eq!(
            run_err("diff(x, x, 1, 2)").to_string(),
            "`diff` takes 2 or 3 argument(s), but 4 were given",
        );
        assert_eq!(run_err("series(x, x, y)").to_string(), "expected a non-negative integer");
    }
}
