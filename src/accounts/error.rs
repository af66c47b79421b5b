use sea_orm::DbErr;
use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("storage failure: {0}")]
    Storage(#[from] DbErr),
}

impl AccountError {
    /// Message safe to hand to callers.
    pub fn public_message(&self) -> String {
        match self {
            AccountError::Hashing(_) | AccountError::Token(_) | AccountError::Storage(_) => {
                "internal error, please retry later".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<LedgerError> for AccountError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(what) => AccountError::NotFound(what),
            LedgerError::Storage(db) => AccountError::Storage(db),
            other => AccountError::InvalidInput(other.to_string()),
        }
    }
}
