//! Error types for statement-core.

use thiserror::Error;

/// Errors raised by the numeric helpers, the account book and the stores.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatementError {
    #[error("the credit limit is zero")]
    ZeroCreditLimit,

    #[error("{0} is not a finite amount")]
    NonFiniteAmount(&'static str),

    #[error("Please enter both a username and password.")]
    MissingCredentials,

    #[error("Username already exists. Please log in or choose another.")]
    UserExists(String),

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("No saved statement with id {0}")]
    HistoryNotFound(i64),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<serde_json::Error> for StatementError {
    fn from(e: serde_json::Error) -> Self {
        StatementError::Store(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatementError>;
