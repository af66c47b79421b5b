pub mod api;
pub mod card;
pub mod friendship;
pub mod transaction;
pub mod user;
