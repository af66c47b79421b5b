pub mod credit_cards;
pub mod friendships;
pub mod prelude;
pub mod transaction;
pub mod users;
