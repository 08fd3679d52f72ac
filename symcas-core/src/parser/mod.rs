//! A recursive-descent parser from text to [`Expr`].
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := '-' unary | power
//! power := atom (('**' | '^') unary)?
//! atom  := number | name | name '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! Powers are right associative, and bind tighter than unary minus: `-x**2` is `-(x**2)`. Every
//! value is canonicalized as soon as it is built, so kernel errors (such as division by zero)
//! are reported with the span of the subexpression that caused them.

pub mod error;
pub mod tokenizer;

use crate::{
    error::Error as KernelError,
    eval::{cos, exp, log, sin, sqrt},
    expr::Expr,
    number::Number,
    primitive::float,
};
use error::*;
use levenshtein::levenshtein;
use rug::{Float, Integer};
use std::{ops::Range, str::FromStr};
use symcas_error::{Error, ErrorKind};
use tokenizer::{tokenize, Token, TokenKind};

/// The functions that can be called in an expression.
pub const FUNCTIONS: &[&str] = &["exp", "log", "ln", "sin", "cos", "sqrt"];

/// A parser over a single line of input.
///
/// Besides [`Parser::parse_complete`], the token-level methods are public so that a front end
/// can parse its own command syntax around expressions.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Tokenizes the given source and creates a parser for it.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        Ok(Self { tokens: tokenize(source)?, cursor: 0 })
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the end of the previous token, or 0 at the start of the stream.
    fn prev_end(&self) -> usize {
        self.cursor.checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |token| token.span.end)
    }

    /// Returns the current token without moving the cursor.
    pub fn peek(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the token after the current one without moving the cursor.
    pub fn peek_second(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor + 1)
    }

    /// Returns true if every token has been consumed.
    pub fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Returns the current token, then advances the cursor.
    ///
    /// Returns an [`UnexpectedEof`] error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        let token = self.peek().cloned().ok_or_else(|| self.error(UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Consumes the current token if it is one of the expected kinds.
    pub fn expect(&mut self, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if expected.contains(&token.kind) {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span], UnexpectedToken { expected, found: token.kind }))
        }
    }

    /// Consumes the current token if it has the given kind, returning true if it did.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Returns an [`ExpectedEof`] error if any tokens remain.
    pub fn expect_eof(&self) -> Result<(), Error> {
        if self.is_eof() {
            Ok(())
        } else {
            let start = self.span().start;
            Err(Error::new(vec![start..self.eof_span().end], ExpectedEof))
        }
    }

    /// Attaches a kernel error to the source from `start` up to the last consumed token.
    fn kernel<T>(&self, start: usize, result: Result<T, KernelError>) -> Result<T, Error> {
        result.map_err(|err| err.into_report(start..self.prev_end()))
    }

    /// Parses an expression, then requires the end of the input.
    pub fn parse_complete(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr()?;
        self.expect_eof()?;
        Ok(expr)
    }

    /// Parses a sum or difference of terms.
    pub fn parse_expr(&mut self) -> Result<Expr, Error> {
        let mut terms = vec![self.parse_term()?];
        loop {
            if self.eat(TokenKind::Add) {
                terms.push(self.parse_term()?);
            } else if self.eat(TokenKind::Sub) {
                terms.push(-self.parse_term()?);
            } else {
                break;
            }
        }

        if terms.len() == 1 {
            Ok(terms.remove(0))
        } else {
            Ok(Expr::add(terms))
        }
    }

    /// Parses a product or quotient of factors.
    fn parse_term(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary()?;
        loop {
            if self.eat(TokenKind::Mul) {
                let rhs = self.parse_unary()?;
                lhs = lhs * rhs;
            } else if self.eat(TokenKind::Div) {
                let start = self.span().start;
                let rhs = self.parse_unary()?;
                lhs = self.kernel(start, lhs.try_div(&rhs))?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, Error> {
        if self.eat(TokenKind::Sub) {
            Ok(-self.parse_unary()?)
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> Result<Expr, Error> {
        let start = self.span().start;
        let base = self.parse_atom()?;
        if self.eat(TokenKind::Exp) {
            let exponent = self.parse_unary()?;
            self.kernel(start, base.pow(&exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Int => {
                let n = token.lexeme.parse::<Integer>()
                    .map_err(|_| Error::new(vec![token.span.clone()], ExpectedInteger))?;
                Ok(Expr::integer(n))
            },
            TokenKind::Float => {
                let value = Float::parse(token.lexeme)
                    .ok()
                    .and_then(|parsed| Number::from_float(float(parsed)))
                    .ok_or_else(|| Error::new(vec![token.span.clone()], InvalidToken {
                        lexeme: token.lexeme.to_string(),
                    }))?;
                Ok(Expr::number(value))
            },
            TokenKind::Name if self.peek().is_some_and(|t| t.kind == TokenKind::OpenParen) => {
                self.parse_call(token)
            },
            TokenKind::Name => Ok(match token.lexeme {
                "I" => Expr::imaginary_unit(),
                "E" => exp(&Expr::one()),
                name => Expr::symbol(name),
            }),
            TokenKind::OpenParen => {
                let expr = self.parse_expr()?;
                self.expect(&[TokenKind::CloseParen])?;
                Ok(expr)
            },
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::OpenParen, TokenKind::Sub],
                found,
            })),
        }
    }

    /// Parses a parenthesized, comma-separated argument list. The cursor must be at the opening
    /// parenthesis.
    pub fn parse_args(&mut self) -> Result<Vec<Expr>, Error> {
        self.expect(&[TokenKind::OpenParen])?;
        let mut args = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(&[TokenKind::CloseParen])?;
        Ok(args)
    }

    /// Parses a non-negative integer literal that fits in a [`u32`].
    pub fn parse_integer(&mut self) -> Result<u32, Error> {
        let span = self.span();
        self.expect(&[TokenKind::Int])
            .ok()
            .and_then(|token| token.lexeme.parse::<u32>().ok())
            .ok_or_else(|| Error::new(vec![span], ExpectedInteger))
    }

    fn parse_call(&mut self, name: Token<'source>) -> Result<Expr, Error> {
        if !FUNCTIONS.contains(&name.lexeme) {
            let suggestions = FUNCTIONS.iter()
                .filter(|f| levenshtein(f, name.lexeme) < 2)
                .map(|f| f.to_string())
                .collect();
            return Err(Error::new(vec![name.span], UnknownFunction {
                name: name.lexeme.to_string(),
                suggestions,
            }));
        }

        let start = name.span.start;
        let mut args = self.parse_args()?;
        if args.len() != 1 {
            return Err(Error::new(vec![start..self.prev_end()], WrongArgumentCount {
                name: name.lexeme.to_string(),
                expected: "1".to_string(),
                given: args.len(),
            }));
        }

        let arg = args.remove(0);
        match name.lexeme {
            "exp" => Ok(exp(&arg)),
            "log" | "ln" => self.kernel(start, log(&arg)),
            "sin" => Ok(sin(&arg)),
            "cos" => Ok(cos(&arg)),
            _ => Ok(sqrt(&arg)),
        }
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new(s)?.parse_complete()
    }
}
