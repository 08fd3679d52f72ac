//! Errors that can occur while parsing an expression.

use ariadne::Fmt;
use crate::parser::tokenizer::TokenKind;
use symcas_attrs::ErrorKind;
use symcas_error::{ErrorKind, EXPR};

/// A character that does not start any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid token `{}`", self.lexeme),
    labels = ["I don't recognize this character"],
)]
pub struct InvalidToken {
    /// The unrecognized text.
    pub lexeme: String,
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// A function was called that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        format!("the available functions are: {}", crate::parser::FUNCTIONS.join(", "))
    } else {
        format!(
            "did you mean {}?",
            self.suggestions.iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(" or "),
        )
    },
)]
pub struct UnknownFunction {
    /// The name that was called.
    pub name: String,

    /// Known functions with a similar name.
    pub suggestions: Vec<String>,
}

/// A function or command was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", self.name, self.expected, self.given),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The function or command that was called.
    pub name: String,

    /// A description of the accepted argument counts, such as `"2 or 3"`.
    pub expected: String,

    /// The number of arguments given.
    pub given: usize,
}

/// A non-negative integer literal was required.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a non-negative integer",
    labels = ["this must be a whole number, such as 3"],
)]
pub struct ExpectedInteger;
