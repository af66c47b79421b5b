#![allow(dead_code)]

use chrono::Utc;
use entity::{credit_cards, users};
use migration::{Migrator, MigratorTrait};
use pagatron::ledger::Ledger;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

/// A migrated in-memory database. A single pooled connection keeps every
/// query on the same SQLite memory instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub async fn setup_ledger() -> (Ledger, DatabaseConnection) {
    let db = setup_db().await;
    (Ledger::new(db.clone()), db)
}

pub async fn seed_user(db: &DatabaseConnection, name: &str, email: &str, role: &str) -> users::Model {
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn seed_card(db: &DatabaseConnection, email: &str, balance: i64) -> credit_cards::Model {
    credit_cards::ActiveModel {
        user_email: Set(email.to_string()),
        card_last4: Set("4242".to_string()),
        cardholder_name: Set(email.to_string()),
        expiry_date: Set("12/30".to_string()),
        balance: Set(Decimal::from(balance)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert card")
}

/// A user holding one card with `balance`.
pub async fn seed_account(db: &DatabaseConnection, email: &str, balance: i64) -> users::Model {
    let name = email.split('@').next().unwrap_or(email);
    let user = seed_user(db, name, email, "user").await;
    seed_card(db, email, balance).await;
    user
}

pub fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}
