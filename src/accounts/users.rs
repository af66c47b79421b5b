use bcrypt::{hash, verify};
use chrono::Utc;
use entity::{credit_cards, transaction, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::AccountError;
use crate::types::auth::{LoginRequest, RegisterRequest};
use crate::types::user::UpdateUserRequest;
use crate::utils::auth::ADMIN_ROLE;
use crate::utils::jwt::create_jwt_token;
use crate::utils::user::{is_valid_email, normalize_email};

const HASH_COST: u32 = 10;
const MIN_PASSWORD_LEN: usize = 8;
const USER_ROLE: &str = "user";

pub async fn register(
    db: &DatabaseConnection,
    req: &RegisterRequest,
) -> Result<users::Model, AccountError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AccountError::InvalidInput("name is required".into()));
    }
    let email = checked_email(&req.email)?;
    check_password(&req.password)?;

    if find_by_email(db, &email).await?.is_some() {
        return Err(AccountError::Conflict("User already exists".into()));
    }

    let password_hash = hash(&req.password, HASH_COST)?;
    let user = users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(USER_ROLE.to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Verify credentials and issue a token.
pub async fn login(
    db: &DatabaseConnection,
    req: &LoginRequest,
) -> Result<(String, users::Model), AccountError> {
    let email = checked_email(&req.email)?;
    let user = find_by_email(db, &email)
        .await?
        .ok_or(AccountError::Unauthorized)?;

    if !verify(&req.password, &user.password_hash)? {
        log::warn!("Failed login for {}", email);
        return Err(AccountError::Unauthorized);
    }

    let token = create_jwt_token(&user)?;
    Ok((token, user))
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<users::Model>, AccountError> {
    Ok(users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(db)
        .await?)
}

pub async fn get_user_by_id(db: &DatabaseConnection, id: i32) -> Result<users::Model, AccountError> {
    users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AccountError::NotFound(format!("user {}", id)))
}

pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<users::Model, AccountError> {
    let email = normalize_email(email);
    find_by_email(db, &email)
        .await?
        .ok_or_else(|| AccountError::NotFound(format!("user {}", email)))
}

pub async fn update_user(
    db: &DatabaseConnection,
    id: i32,
    req: &UpdateUserRequest,
) -> Result<users::Model, AccountError> {
    let user = get_user_by_id(db, id).await?;
    let mut active: users::ActiveModel = user.clone().into();
    let mut changed = false;

    if let Some(name) = &req.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::InvalidInput("name cannot be empty".into()));
        }
        active.name = Set(name.to_string());
        changed = true;
    }

    if let Some(email) = &req.email {
        let email = checked_email(email)?;
        if email != user.email {
            if find_by_email(db, &email).await?.is_some() {
                return Err(AccountError::Conflict("Email is already in use".into()));
            }
            // Transactions are keyed by email; the old address must never
            // be freed for someone else while any of them refer to it.
            if transaction_count(db, &user.email).await? > 0 {
                return Err(AccountError::Conflict(
                    "email cannot change once the user has transactions".into(),
                ));
            }
            active.email = Set(email);
        }
        changed = true;
    }

    if let Some(role) = &req.role {
        if role != USER_ROLE && role != ADMIN_ROLE {
            return Err(AccountError::InvalidInput(format!("unknown role {}", role)));
        }
        active.role = Set(role.clone());
        changed = true;
    }

    if let Some(password) = &req.password {
        check_password(password)?;
        active.password_hash = Set(hash(password, HASH_COST)?);
        changed = true;
    }

    if !changed {
        return Err(AccountError::InvalidInput("no fields to update".into()));
    }

    Ok(active.update(db).await?)
}

/// Delete a user. Users still holding cards or named in transactions are
/// refused, so no balance disappears and no address is freed for reuse.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), AccountError> {
    let user = get_user_by_id(db, id).await?;

    let cards = credit_cards::Entity::find()
        .filter(credit_cards::Column::UserEmail.eq(user.email.as_str()))
        .count(db)
        .await?;
    if cards > 0 {
        return Err(AccountError::Conflict(format!(
            "user {} still holds {} card(s)",
            id, cards
        )));
    }

    if transaction_count(db, &user.email).await? > 0 {
        return Err(AccountError::Conflict(format!(
            "user {} still appears in transactions",
            id
        )));
    }

    users::Entity::delete_by_id(id).exec(db).await?;
    log::info!("Deleted user {} ({})", id, user.email);
    Ok(())
}

async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, AccountError> {
    Ok(users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?)
}

async fn transaction_count(db: &DatabaseConnection, email: &str) -> Result<u64, AccountError> {
    Ok(transaction::Entity::find()
        .filter(
            Condition::any()
                .add(transaction::Column::SenderEmail.eq(email))
                .add(transaction::Column::RecipientEmail.eq(email)),
        )
        .count(db)
        .await?)
}

fn checked_email(raw: &str) -> Result<String, AccountError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(AccountError::InvalidInput("Invalid email format".into()));
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
