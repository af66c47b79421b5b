use actix_web::web;
use crate::handlers::transaction_handler::{
    accept_request, decline_request, get_all_transactions, get_pending_requests,
    get_received_requests, get_sent_requests, get_transaction, get_transactions_by_email,
    request_money, revoke_transaction, send_money,
};
use crate::middleware::auth::AuthMiddleware;

/// Static paths are registered ahead of `/{id}`.
pub fn configure_transaction_routes() -> actix_web::Scope {
    web::scope("/transactions").service(
        web::scope("")
            .route("", web::get().to(get_all_transactions).wrap(AuthMiddleware))
            .route("/request", web::post().to(request_money).wrap(AuthMiddleware))
            .route("/send", web::post().to(send_money).wrap(AuthMiddleware))
            .route("/by-email", web::get().to(get_transactions_by_email).wrap(AuthMiddleware))
            .route("/pending", web::get().to(get_pending_requests).wrap(AuthMiddleware))
            .route("/sent", web::get().to(get_sent_requests).wrap(AuthMiddleware))
            .route("/received", web::get().to(get_received_requests).wrap(AuthMiddleware))
            .route("/{id}", web::get().to(get_transaction).wrap(AuthMiddleware))
            .route("/{id}/accept", web::post().to(accept_request).wrap(AuthMiddleware))
            .route("/{id}/decline", web::post().to(decline_request).wrap(AuthMiddleware))
            .route("/{id}/revoke", web::post().to(revoke_transaction).wrap(AuthMiddleware))
    )
}
