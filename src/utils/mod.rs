pub mod auth;
pub mod jwt;
pub mod pagination;
pub mod user;
