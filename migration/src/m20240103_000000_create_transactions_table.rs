use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Rows are never deleted, so the emails are kept as plain values
        // rather than foreign keys.
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk_auto(Transactions::Id))
                    .col(string_len(Transactions::SenderEmail, 255).not_null())
                    .col(string_len(Transactions::RecipientEmail, 255).not_null())
                    .col(decimal_len(Transactions::Amount, 12, 2).not_null())
                    .col(string_len_null(Transactions::Message, 255))
                    .col(string_len(Transactions::Kind, 20).not_null().default("request"))
                    .col(string_len(Transactions::Status, 20).not_null().default("pending"))
                    .col(timestamp(Transactions::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Transactions::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_sender_email")
                    .table(Transactions::Table)
                    .col(Transactions::SenderEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_recipient_email")
                    .table(Transactions::Table)
                    .col(Transactions::RecipientEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_status")
                    .table(Transactions::Table)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    SenderEmail,
    RecipientEmail,
    Amount,
    Message,
    Kind,
    Status,
    CreatedAt,
    UpdatedAt,
}
