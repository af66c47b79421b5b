use actix_web::web;
use crate::handlers::friendship_handler::{
    accept_friend_request, decline_friend_request, get_friends, get_received_friend_requests,
    remove_friend, send_friend_request,
};
use crate::middleware::auth::AuthMiddleware;

pub fn configure_friendship_routes() -> actix_web::Scope {
    web::scope("/friends").service(
        web::scope("")
            .route("/request", web::post().to(send_friend_request).wrap(AuthMiddleware))
            .route("/{id}/accept", web::post().to(accept_friend_request).wrap(AuthMiddleware))
            .route("/{id}/decline", web::post().to(decline_friend_request).wrap(AuthMiddleware))
            .route("/{email}", web::get().to(get_friends))
            .route("/{email}/requests", web::get().to(get_received_friend_requests).wrap(AuthMiddleware))
            .route("/{user_id}/{friend_id}", web::delete().to(remove_friend).wrap(AuthMiddleware))
    )
}
