use crate::parser::error::InvalidToken;
use logos::Logos;
use std::ops::Range;
use symcas_error::Error;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("**")]
    #[token("^")]
    Exp,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Float,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

/// Tokenizes the entire source. Whitespace is skipped.
///
/// Returns an [`InvalidToken`] error at the first character that does not start any token.
pub fn tokenize(source: &str) -> Result<Box<[Token<'_>]>, Error> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token { span: lexer.span(), kind, lexeme: lexer.slice() }),
            Err(()) => return Err(Error::new(
                vec![lexer.span()],
                InvalidToken { lexeme: lexer.slice().to_string() },
            )),
        }
    }

    Ok(tokens.into_boxed_slice())
}
