use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthormapError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AuthormapResult<T> = Result<T, AuthormapError>;
