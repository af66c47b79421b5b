pub mod auth_handler;
pub mod card_handler;
pub mod friendship_handler;
pub mod health;
pub mod helpers;
pub mod transaction_handler;
pub mod user_handler;
