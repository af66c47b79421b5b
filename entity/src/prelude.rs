pub use super::credit_cards::Entity as CreditCards;
pub use super::friendships::Entity as Friendships;
pub use super::transaction::Entity as Transaction;
pub use super::users::Entity as Users;
