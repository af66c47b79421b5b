pub use sea_orm_migration::prelude::*;

mod m20240101_000000_create_users_table;
mod m20240102_000000_create_credit_cards_table;
mod m20240103_000000_create_transactions_table;
mod m20240104_000000_create_friendships_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000000_create_users_table::Migration),
            Box::new(m20240102_000000_create_credit_cards_table::Migration),
            Box::new(m20240103_000000_create_transactions_table::Migration),
            Box::new(m20240104_000000_create_friendships_table::Migration),
        ]
    }
}
