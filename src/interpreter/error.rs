use thiserror::Error;

use crate::ast::{InfixOperator, PrefixOperator};

/// Typed payload of `Object::Error` values.
///
/// These surface inside the language (an error value terminates the
/// enclosing program), so the `Display` forms are part of the language's
/// observable behavior, not just diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("identifier not found: {name}")]
    IdentifierNotFound { name: String },
    #[error("not a function: {type_name}")]
    NotAFunction { type_name: &'static str },
    #[error("wrong number of arguments: want={want}, got={got}")]
    WrongArgumentCount { want: usize, got: usize },
    #[error("index operator not supported: {type_name}")]
    IndexNotSupported { type_name: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("argument to `{name}` not supported, got {got}")]
    UnsupportedArgument {
        name: &'static str,
        got: &'static str,
    },
}
