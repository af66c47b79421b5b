//! Transaction lifecycle.
//!
//! ```text
//!         request_money         accept -> settle
//!  (none) ------------> pending -----------------> completed
//!                          | decline                    |
//!                          +-------------> declined     | revoke
//!                          | revoke                     v
//!                          +---------------------->  revoked
//! ```
//!
//! `pending` is the only state with more than one way out.

use entity::transaction::{self, TransactionKind, TransactionStatus};
use rust_decimal::Decimal;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use serde::Deserialize;

use super::engine::{self, Transfer};
use super::store::{self, NewTransaction};
use super::{finish, Amount, Ledger, LedgerError};
use crate::utils::user::normalize_email;

const MAX_MESSAGE_LEN: usize = 255;

/// Input shared by money requests and direct sends.
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyOrder {
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub recipient_email: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

struct ValidOrder {
    sender: String,
    recipient: String,
    amount: Amount,
    message: Option<String>,
}

impl MoneyOrder {
    pub fn new(
        sender_email: impl Into<String>,
        recipient_email: impl Into<String>,
        amount: Decimal,
        message: Option<&str>,
    ) -> Self {
        Self {
            sender_email: sender_email.into(),
            recipient_email: recipient_email.into(),
            amount: Some(amount),
            message: message.map(str::to_string),
        }
    }

    fn validate(&self) -> Result<ValidOrder, LedgerError> {
        let sender = normalize_email(&self.sender_email);
        let recipient = normalize_email(&self.recipient_email);
        if sender.is_empty() {
            return Err(LedgerError::InvalidInput("sender_email is required".into()));
        }
        if recipient.is_empty() {
            return Err(LedgerError::InvalidInput("recipient_email is required".into()));
        }
        if sender == recipient {
            return Err(LedgerError::InvalidInput(
                "sender and recipient must be different users".into(),
            ));
        }

        let amount = self
            .amount
            .ok_or_else(|| LedgerError::InvalidInput("amount is required".into()))
            .and_then(Amount::new)?;

        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if message
            .as_ref()
            .is_some_and(|m| m.chars().count() > MAX_MESSAGE_LEN)
        {
            return Err(LedgerError::InvalidInput(format!(
                "message is longer than {} characters",
                MAX_MESSAGE_LEN
            )));
        }

        Ok(ValidOrder {
            sender,
            recipient,
            amount,
            message,
        })
    }
}

impl Ledger {
    /// Record that `sender_email` asks `recipient_email` for money.
    /// No balance moves until the recipient accepts.
    pub async fn request_money(
        &self,
        order: &MoneyOrder,
    ) -> Result<transaction::Model, LedgerError> {
        let order = order.validate()?;
        let txn = self.db.begin().await?;
        let result = create_request(&txn, &order).await;
        let result = finish(txn, result).await;
        log_outcome("request_money", None, &result);
        result
    }

    /// Accept a pending money request: the recipient pays the sender.
    pub async fn accept_request(
        &self,
        transaction_id: i32,
    ) -> Result<transaction::Model, LedgerError> {
        let txn = self.db.begin().await?;
        let result = engine::settle(&txn, transaction_id).await;
        let result = finish(txn, result).await;
        log_outcome("accept_request", Some(transaction_id), &result);
        result
    }

    pub async fn decline_request(
        &self,
        transaction_id: i32,
    ) -> Result<transaction::Model, LedgerError> {
        let txn = self.db.begin().await?;
        let result = decline(&txn, transaction_id).await;
        let result = finish(txn, result).await;
        log_outcome("decline_request", Some(transaction_id), &result);
        result
    }

    /// Revoke a pending or completed transaction, reversing balances if
    /// money already moved.
    pub async fn revoke_transaction(
        &self,
        transaction_id: i32,
    ) -> Result<transaction::Model, LedgerError> {
        let txn = self.db.begin().await?;
        let result = engine::revoke(&txn, transaction_id).await;
        let result = finish(txn, result).await;
        log_outcome("revoke_transaction", Some(transaction_id), &result);
        result
    }

    /// Pay `recipient_email` from `sender_email` immediately.
    pub async fn send_money(&self, order: &MoneyOrder) -> Result<transaction::Model, LedgerError> {
        let order = order.validate()?;
        let transfer = Transfer {
            payer: &order.sender,
            payee: &order.recipient,
            amount: order.amount,
        };

        let txn = self.db.begin().await?;
        let result = engine::send_immediate(&txn, &transfer, order.message.as_deref()).await;
        let result = finish(txn, result).await;
        log_outcome("send_money", None, &result);
        result
    }
}

async fn create_request(
    txn: &DatabaseTransaction,
    order: &ValidOrder,
) -> Result<transaction::Model, LedgerError> {
    for email in [&order.sender, &order.recipient] {
        if store::primary_card(txn, email).await?.is_none() {
            return Err(LedgerError::not_found_account(email));
        }
    }

    store::insert_transaction(
        txn,
        NewTransaction {
            sender_email: &order.sender,
            recipient_email: &order.recipient,
            amount: order.amount,
            message: order.message.as_deref(),
            kind: TransactionKind::Request,
            status: TransactionStatus::Pending,
        },
    )
    .await
}

async fn decline(
    txn: &DatabaseTransaction,
    transaction_id: i32,
) -> Result<transaction::Model, LedgerError> {
    let record = store::lock_transaction(txn, transaction_id).await?;
    if record.status != TransactionStatus::Pending {
        return Err(LedgerError::InvalidState {
            id: record.id,
            status: record.status,
        });
    }
    store::set_status(txn, record.id, TransactionStatus::Declined).await
}

fn log_outcome(
    operation: &str,
    transaction_id: Option<i32>,
    result: &Result<transaction::Model, LedgerError>,
) {
    match result {
        Ok(record) => log::info!(
            "{} ok: transaction {} {} -> {} amount {} now {}",
            operation,
            record.id,
            record.sender_email,
            record.recipient_email,
            record.amount,
            record.status
        ),
        Err(LedgerError::Storage(err)) => {
            log::error!("{} failed on {:?}: {}", operation, transaction_id, err)
        }
        Err(err) => log::warn!("{} rejected on {:?}: {}", operation, transaction_id, err),
    }
}
