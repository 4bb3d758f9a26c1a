use thiserror::Error;

use crate::lexer::token::TokenKind;

/// Errors the parser records while scanning past a malformed construct.
///
/// The parser accumulates these instead of unwinding, so one pass can
/// report several of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidIntegerLiteral { literal: String },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },
}
