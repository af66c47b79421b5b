pub mod auth;
pub mod card;
pub mod friendship;
pub mod response;
pub mod transaction;
pub mod user;
