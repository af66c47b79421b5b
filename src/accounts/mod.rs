//! Users, their cards and the friendship graph.
//!
//! None of this moves money; balances only change through
//! [`crate::ledger::Ledger`].

pub mod cards;
pub mod error;
pub mod friendships;
pub mod users;

pub use error::AccountError;
