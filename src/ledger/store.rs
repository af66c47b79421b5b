//! Storage primitives for the ledger tables.
//!
//! Everything here runs inside a caller-owned unit of work. Functions named
//! `lock_*` take a row lock (`SELECT ... FOR UPDATE`) that is held until the
//! surrounding transaction commits or rolls back.

use std::collections::BTreeMap;

use chrono::Utc;
use entity::{credit_cards, transaction};
use entity::transaction::{TransactionKind, TransactionStatus};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{Amount, LedgerError};

/// Lock a transaction row and return its current state.
pub async fn lock_transaction(
    txn: &DatabaseTransaction,
    transaction_id: i32,
) -> Result<transaction::Model, LedgerError> {
    transaction::Entity::find_by_id(transaction_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| LedgerError::not_found_transaction(transaction_id))
}

/// The card that balance movements for `email` apply to.
pub async fn primary_card<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<credit_cards::Model>, LedgerError> {
    let card = credit_cards::Entity::find()
        .filter(credit_cards::Column::UserEmail.eq(email))
        .order_by_asc(credit_cards::Column::Id)
        .one(conn)
        .await?;
    Ok(card)
}

async fn lock_primary_card(
    txn: &DatabaseTransaction,
    email: &str,
) -> Result<credit_cards::Model, LedgerError> {
    credit_cards::Entity::find()
        .filter(credit_cards::Column::UserEmail.eq(email))
        .order_by_asc(credit_cards::Column::Id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| LedgerError::not_found_account(email))
}

/// Lock the primary cards of every given email.
///
/// Locks are taken in ascending email order no matter the argument order,
/// so two units of work touching the same pair of accounts always queue
/// on the same row first.
pub async fn lock_accounts(
    txn: &DatabaseTransaction,
    emails: &[&str],
) -> Result<BTreeMap<String, credit_cards::Model>, LedgerError> {
    let mut ordered: Vec<&str> = emails.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let mut cards = BTreeMap::new();
    for email in ordered {
        let card = lock_primary_card(txn, email).await?;
        cards.insert(email.to_string(), card);
    }
    Ok(cards)
}

/// Add `delta` (possibly negative) to a card balance in place.
pub async fn adjust_balance(
    txn: &DatabaseTransaction,
    card_id: i32,
    delta: Decimal,
) -> Result<(), LedgerError> {
    let result = credit_cards::Entity::update_many()
        .col_expr(
            credit_cards::Column::Balance,
            Expr::col(credit_cards::Column::Balance).add(delta),
        )
        .filter(credit_cards::Column::Id.eq(card_id))
        .exec(txn)
        .await?;

    if result.rows_affected != 1 {
        return Err(LedgerError::NotFound(format!("card {}", card_id)));
    }
    Ok(())
}

pub async fn set_status(
    txn: &DatabaseTransaction,
    transaction_id: i32,
    status: TransactionStatus,
) -> Result<transaction::Model, LedgerError> {
    let active = transaction::ActiveModel {
        id: Set(transaction_id),
        status: Set(status),
        updated_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    Ok(active.update(txn).await?)
}

pub struct NewTransaction<'a> {
    pub sender_email: &'a str,
    pub recipient_email: &'a str,
    pub amount: Amount,
    pub message: Option<&'a str>,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
}

pub async fn insert_transaction(
    txn: &DatabaseTransaction,
    new: NewTransaction<'_>,
) -> Result<transaction::Model, LedgerError> {
    let now = Utc::now().naive_utc();
    let record = transaction::ActiveModel {
        sender_email: Set(new.sender_email.to_string()),
        recipient_email: Set(new.recipient_email.to_string()),
        amount: Set(new.amount.value()),
        message: Set(new.message.map(str::to_string)),
        kind: Set(new.kind),
        status: Set(new.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(record.insert(txn).await?)
}
