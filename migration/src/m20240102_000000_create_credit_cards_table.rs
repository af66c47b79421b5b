use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CreditCards::Table)
                    .if_not_exists()
                    .col(pk_auto(CreditCards::Id))
                    .col(string_len(CreditCards::UserEmail, 255).not_null())
                    .col(string_len(CreditCards::CardLast4, 4).not_null())
                    .col(string_len(CreditCards::CardholderName, 100).not_null())
                    .col(string_len(CreditCards::ExpiryDate, 7).not_null())
                    .col(decimal_len(CreditCards::Balance, 12, 2).not_null().default(0.00))
                    .col(timestamp(CreditCards::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_cards_user_email")
                            .from(CreditCards::Table, CreditCards::UserEmail)
                            .to(Users::Table, Users::Email)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_credit_cards_user_email")
                    .table(CreditCards::Table)
                    .col(CreditCards::UserEmail)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CreditCards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CreditCards {
    Table,
    Id,
    UserEmail,
    #[sea_orm(iden = "card_last4")]
    CardLast4,
    CardholderName,
    ExpiryDate,
    Balance,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Email,
}
