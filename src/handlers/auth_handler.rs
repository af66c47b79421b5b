use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::accounts::users;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::types::response::DataResponse;
use crate::types::user::UserResponse;
use crate::utils::auth::ADMIN_ROLE;

pub async fn register(
    db: web::Data<DatabaseConnection>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, Error> {
    let user = users::register(db.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(DataResponse::new(
        "User registered successfully",
        UserResponse::from(user),
    )))
}

pub async fn login(
    db: web::Data<DatabaseConnection>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Error> {
    let (token, user) = users::login(db.get_ref(), &req).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: UserResponse::from(user),
    }))
}

/// Tokens are stateless; the client just drops it.
pub async fn logout() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Logout successful",
    })))
}

/// Report the role carried by the caller's token.
pub async fn validate_user_key(auth_user: web::ReqData<AuthenticatedUser>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "id": auth_user.id,
        "email": auth_user.email,
        "role": auth_user.role,
        "is_admin": auth_user.role == ADMIN_ROLE,
    })))
}
