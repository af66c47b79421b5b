//! Read-only projections over the ledger tables.

use entity::transaction::{self, TransactionStatus};
use entity::credit_cards;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};

use super::{store, Ledger, LedgerError};
use crate::utils::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
use crate::utils::user::normalize_email;

impl Ledger {
    pub async fn get_transaction(
        &self,
        transaction_id: i32,
    ) -> Result<transaction::Model, LedgerError> {
        transaction::Entity::find_by_id(transaction_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::not_found_transaction(transaction_id))
    }

    /// Every transaction, newest first.
    pub async fn all_transactions(
        &self,
        page: &PaginationQuery,
    ) -> Result<PaginatedResponse<transaction::Model>, LedgerError> {
        self.paginate(transaction::Entity::find(), page).await
    }

    /// Transactions where `email` is either party, newest first.
    pub async fn transactions_by_email(
        &self,
        email: &str,
        page: &PaginationQuery,
    ) -> Result<PaginatedResponse<transaction::Model>, LedgerError> {
        let email = normalize_email(email);
        let query = transaction::Entity::find().filter(
            Condition::any()
                .add(transaction::Column::SenderEmail.eq(email.as_str()))
                .add(transaction::Column::RecipientEmail.eq(email.as_str())),
        );
        self.paginate(query, page).await
    }

    /// Requests waiting for `email` to pay. Same rows as
    /// [`Ledger::received_requests`].
    pub async fn pending_requests(
        &self,
        email: &str,
    ) -> Result<Vec<transaction::Model>, LedgerError> {
        self.received_requests(email).await
    }

    /// Pending rows created by `email`.
    pub async fn sent_requests(&self, email: &str) -> Result<Vec<transaction::Model>, LedgerError> {
        self.pending_where(transaction::Column::SenderEmail, email)
            .await
    }

    /// Pending rows addressed to `email`.
    pub async fn received_requests(
        &self,
        email: &str,
    ) -> Result<Vec<transaction::Model>, LedgerError> {
        self.pending_where(transaction::Column::RecipientEmail, email)
            .await
    }

    /// Balance of the primary card.
    pub async fn get_balance(&self, email: &str) -> Result<Decimal, LedgerError> {
        let email = normalize_email(email);
        store::primary_card(&self.db, &email)
            .await?
            .map(|card| card.balance)
            .ok_or_else(|| LedgerError::not_found_account(&email))
    }

    pub async fn get_cards(&self, email: &str) -> Result<Vec<credit_cards::Model>, LedgerError> {
        let cards = credit_cards::Entity::find()
            .filter(credit_cards::Column::UserEmail.eq(normalize_email(email)))
            .order_by_asc(credit_cards::Column::Id)
            .all(&self.db)
            .await?;
        Ok(cards)
    }

    async fn pending_where(
        &self,
        column: transaction::Column,
        email: &str,
    ) -> Result<Vec<transaction::Model>, LedgerError> {
        let rows = transaction::Entity::find()
            .filter(column.eq(normalize_email(email)))
            .filter(transaction::Column::Status.eq(TransactionStatus::Pending))
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn paginate(
        &self,
        query: Select<transaction::Entity>,
        page: &PaginationQuery,
    ) -> Result<PaginatedResponse<transaction::Model>, LedgerError> {
        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .offset(page.get_offset())
            .limit(page.get_limit())
            .all(&self.db)
            .await?;

        let info = PaginationInfo::new(page.get_page(), total, page.get_limit());
        Ok(PaginatedResponse::new(rows, info))
    }
}
