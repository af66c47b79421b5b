use actix_web::web;
use crate::handlers::card_handler::{add_card, get_balance, get_cards};
use crate::middleware::auth::AuthMiddleware;

pub fn configure_card_routes() -> actix_web::Scope {
    web::scope("/cards").service(
        web::scope("")
            .route("", web::post().to(add_card).wrap(AuthMiddleware))
            .route("", web::get().to(get_cards).wrap(AuthMiddleware))
            .route("/balance", web::get().to(get_balance).wrap(AuthMiddleware))
    )
}
