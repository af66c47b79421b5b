//! Balance transfer engine.
//!
//! Moves a fixed amount between two primary cards and records the outcome
//! in the same unit of work. Callers own the database transaction; any
//! error returned from here means the caller must roll it back.

use entity::transaction::{self, TransactionKind, TransactionStatus};
use sea_orm::DatabaseTransaction;

use super::store::{self, NewTransaction};
use super::{Amount, LedgerError};

/// A debit/credit pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer<'a> {
    pub payer: &'a str,
    pub payee: &'a str,
    pub amount: Amount,
}

impl<'a> Transfer<'a> {
    /// Who pays whom for an existing transaction row.
    ///
    /// A money request is paid by its recipient; a direct transfer is paid
    /// by its sender.
    pub fn for_record(record: &'a transaction::Model) -> Result<Self, LedgerError> {
        let amount = Amount::new(record.amount)?;
        let (payer, payee) = match record.kind {
            TransactionKind::Request => (&record.recipient_email, &record.sender_email),
            TransactionKind::Transfer => (&record.sender_email, &record.recipient_email),
        };
        Ok(Self {
            payer,
            payee,
            amount,
        })
    }

    fn reversed(&self) -> Self {
        Self {
            payer: self.payee,
            payee: self.payer,
            amount: self.amount,
        }
    }
}

/// Settle a pending transaction: lock it, re-check that it is still
/// pending, move the funds and mark it completed.
pub async fn settle(
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

    let transfer = Transfer::for_record(&record)?;
    apply(txn, &transfer, FundsCheck::Required).await?;
    store::set_status(txn, record.id, TransactionStatus::Completed).await
}

/// Pay `payee` right away and record a completed transfer row.
pub async fn send_immediate(
    txn: &DatabaseTransaction,
    transfer: &Transfer<'_>,
    message: Option<&str>,
) -> Result<transaction::Model, LedgerError> {
    apply(txn, transfer, FundsCheck::Required).await?;
    store::insert_transaction(
        txn,
        NewTransaction {
            sender_email: transfer.payer,
            recipient_email: transfer.payee,
            amount: transfer.amount,
            message,
            kind: TransactionKind::Transfer,
            status: TransactionStatus::Completed,
        },
    )
    .await
}

/// Revoke a transaction. A completed one has its balance effect reversed;
/// a pending one only changes status.
pub async fn revoke(
    txn: &DatabaseTransaction,
    transaction_id: i32,
) -> Result<transaction::Model, LedgerError> {
    let record = store::lock_transaction(txn, transaction_id).await?;
    match record.status {
        TransactionStatus::Pending => {}
        TransactionStatus::Completed => {
            let transfer = Transfer::for_record(&record)?;
            // The payee may have spent the funds already; the reversal
            // still goes through and can leave them negative.
            apply(txn, &transfer.reversed(), FundsCheck::Skip).await?;
        }
        TransactionStatus::Declined | TransactionStatus::Revoked => {
            return Err(LedgerError::InvalidState {
                id: record.id,
                status: record.status,
            });
        }
    }
    store::set_status(txn, record.id, TransactionStatus::Revoked).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FundsCheck {
    Required,
    Skip,
}

async fn apply(
    txn: &DatabaseTransaction,
    transfer: &Transfer<'_>,
    check: FundsCheck,
) -> Result<(), LedgerError> {
    let cards = store::lock_accounts(txn, &[transfer.payer, transfer.payee]).await?;
    let payer_card = cards
        .get(transfer.payer)
        .ok_or_else(|| LedgerError::not_found_account(transfer.payer))?;
    let payee_card = cards
        .get(transfer.payee)
        .ok_or_else(|| LedgerError::not_found_account(transfer.payee))?;

    let amount = transfer.amount.value();
    if payer_card.balance < amount {
        match check {
            FundsCheck::Required => {
                return Err(LedgerError::InsufficientFunds {
                    email: transfer.payer.to_string(),
                    available: payer_card.balance,
                    requested: amount,
                });
            }
            FundsCheck::Skip => log::warn!(
                "Reversal leaves {} negative: balance {}, reversing {}",
                transfer.payer,
                payer_card.balance,
                amount
            ),
        }
    }

    store::adjust_balance(txn, payer_card.id, -amount).await?;
    store::adjust_balance(txn, payee_card.id, amount).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn record(kind: TransactionKind) -> transaction::Model {
        let now = Utc::now().naive_utc();
        transaction::Model {
            id: 1,
            sender_email: "sender@example.com".into(),
            recipient_email: "recipient@example.com".into(),
            amount: Decimal::new(4000, 2),
            message: None,
            kind,
            status: TransactionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn request_is_paid_by_recipient() {
        let rec = record(TransactionKind::Request);
        let transfer = Transfer::for_record(&rec).unwrap();
        assert_eq!(transfer.payer, "recipient@example.com");
        assert_eq!(transfer.payee, "sender@example.com");
    }

    #[test]
    fn direct_transfer_is_paid_by_sender() {
        let rec = record(TransactionKind::Transfer);
        let transfer = Transfer::for_record(&rec).unwrap();
        assert_eq!(transfer.payer, "sender@example.com");
        assert_eq!(transfer.payee, "recipient@example.com");
    }

    #[test]
    fn reversal_swaps_parties_and_keeps_amount() {
        let rec = record(TransactionKind::Transfer);
        let transfer = Transfer::for_record(&rec).unwrap();
        let back = transfer.reversed();
        assert_eq!(back.payer, transfer.payee);
        assert_eq!(back.payee, transfer.payer);
        assert_eq!(back.amount, transfer.amount);
    }
}
