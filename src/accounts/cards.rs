//! Card registration.

use chrono::Utc;
use entity::credit_cards;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use super::{users, AccountError};
use crate::ledger::amount::opening_balance;
use crate::types::card::NewCardRequest;

pub async fn add_card(
    db: &DatabaseConnection,
    req: &NewCardRequest,
) -> Result<credit_cards::Model, AccountError> {
    let user = users::get_user_by_email(db, &req.user_email).await?;

    let digits: String = req.card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) || !luhn_valid(&digits) {
        return Err(AccountError::InvalidInput("Invalid card number".into()));
    }

    let holder = req.cardholder_name.trim();
    if holder.is_empty() {
        return Err(AccountError::InvalidInput("cardholder_name is required".into()));
    }

    let expiry = req.expiry_date.trim();
    if !valid_expiry(expiry) {
        return Err(AccountError::InvalidInput("expiry_date must be MM/YY or MM/YYYY".into()));
    }

    let balance = opening_balance(req.opening_balance)?;

    let card = credit_cards::ActiveModel {
        user_email: Set(user.email),
        card_last4: Set(digits[digits.len() - 4..].to_string()),
        cardholder_name: Set(holder.to_string()),
        expiry_date: Set(expiry.to_string()),
        balance: Set(balance),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::info!("Added card {} for {}", card.id, card.user_email);
    Ok(card)
}

/// Luhn checksum over a string of ASCII digits.
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2 && matches!(month.parse::<u32>(), Ok(1..=12));
    let year_ok = (year.len() == 2 || year.len() == 4) && year.chars().all(|c| c.is_ascii_digit());
    month_ok && year_ok
}
