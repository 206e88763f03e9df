use crate::ast::ASTKind;
use std::{error::Error, fmt::Display};

/// Failure while reading SDL, either in its grammar or in what the definitions refer to.
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    SyntaxError(String),
    ValidationError(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::SyntaxError(s) => write!(f, "{}", s),
            SchemaError::ValidationError(s) => write!(f, "Validation error: {}", s),
        }
    }
}

impl Error for SchemaError {}

impl From<ASTKind> for SchemaError {
    fn from(kind: ASTKind) -> Self {
        SchemaError::SyntaxError(format!("Invalid {}", kind))
    }
}

macro_rules! syntax_err {
    ($msg:literal, $($arg:tt)*) => {
        Err(syntax!($msg, $($arg)*))
    };

    ($msg:literal) => {
        Err(syntax!($msg))
    };
}

macro_rules! syntax {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::SyntaxError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::SyntaxError(format!($msg))
    };
}

macro_rules! validation {
    ($msg:literal, $($arg:tt)*) => {
        SchemaError::ValidationError(format!($msg, $($arg)*))
    };

    ($msg:literal) => {
        SchemaError::ValidationError(format!($msg))
    };
}

// Required for macro visibility.
pub(crate) use syntax;
pub(crate) use syntax_err;
pub(crate) use validation;
