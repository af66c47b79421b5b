//! Error taxonomy for ledger operations.

use entity::transaction::TransactionStatus;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Every way a ledger operation can fail.
///
/// All variants except [`LedgerError::Storage`] are business rejections:
/// the unit of work is rolled back and the caller gets a readable reason.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("transaction {id} is already {status}")]
    InvalidState { id: i32, status: TransactionStatus },

    #[error("insufficient funds for {email}: available {available}, requested {requested}")]
    InsufficientFunds {
        email: String,
        available: Decimal,
        requested: Decimal,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    InsufficientFunds,
    InvalidInput,
    StorageFailure,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::InvalidState { .. } => ErrorKind::InvalidState,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::InvalidInput(_) => ErrorKind::InvalidInput,
            LedgerError::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    /// Message safe to hand to callers. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            LedgerError::Storage(_) => "storage unavailable, no changes were applied".to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn not_found_transaction(id: i32) -> Self {
        LedgerError::NotFound(format!("transaction {}", id))
    }

    pub(crate) fn not_found_account(email: &str) -> Self {
        LedgerError::NotFound(format!("account for {}", email))
    }
}

/// Success/failure flag plus message, as reported to callers of
/// mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl From<&LedgerError> for OperationResult {
    fn from(err: &LedgerError) -> Self {
        Self {
            success: false,
            message: err.public_message(),
            error: Some(err.kind()),
        }
    }
}
