use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NewCardRequest {
    pub user_email: String,
    pub card_number: String,
    pub cardholder_name: String,
    /// `MM/YY` or `MM/YYYY`.
    pub expiry_date: String,
    #[serde(default)]
    pub opening_balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub user_email: String,
    pub balance: Decimal,
}
