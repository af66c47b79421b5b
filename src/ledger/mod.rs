//! Money ledger: card balances plus the transactions table, kept
//! consistent under concurrent access.
//!
//! Every mutating operation runs as one unit of work over the pooled
//! connection handed to [`Ledger::new`]. Business rejections and storage
//! failures both roll the unit of work back before the error is returned.

pub mod amount;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod queries;
pub mod store;

pub use amount::Amount;
pub use engine::Transfer;
pub use error::{ErrorKind, LedgerError, OperationResult};
pub use lifecycle::MoneyOrder;

use sea_orm::{DatabaseConnection, DatabaseTransaction};

#[derive(Debug, Clone)]
pub struct Ledger {
    db: DatabaseConnection,
}

impl Ledger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Commit on success, roll back on error.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, LedgerError>,
) -> Result<T, LedgerError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                log::error!("Rollback failed after {}: {}", err, rollback_err);
            }
            Err(err)
        }
    }
}
