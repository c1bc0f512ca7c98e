// Error taxonomy shared by the parser, the evaluator and the driver

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("missing closing parenthesis")]
    MissingClosingParenthesis,

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("invalid definition '{0}', expected NAME=VALUE")]
    InvalidDefinition(String),

    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
