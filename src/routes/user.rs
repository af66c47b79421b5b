use crate::handlers::auth_handler::{login, logout, register, validate_user_key};
use crate::handlers::user_handler::{
    delete_user, get_all_users, get_user_by_email, get_user_by_id, update_user,
};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_user_routes() -> actix_web::Scope {
    web::scope("/users").service(
        web::scope("")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/validateUserKey", web::post().to(validate_user_key).wrap(AuthMiddleware))
            .route("/getAll", web::get().to(get_all_users).wrap(AuthMiddleware))
            .route("/getUserById/{user_id}", web::get().to(get_user_by_id))
            .route("/getUserByEmail/{email}", web::get().to(get_user_by_email))
            .route("/update/{user_id}", web::put().to(update_user).wrap(AuthMiddleware))
            .route("/delete/{user_id}", web::delete().to(delete_user).wrap(AuthMiddleware))
    )
}
