pub mod accounts;
pub mod constants;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod routes;
pub mod types;
pub mod utils;
