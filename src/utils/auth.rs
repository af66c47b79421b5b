use actix_web::{HttpResponse, Result};
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;
use crate::utils::user::normalize_email;

pub const ADMIN_ROLE: &str = "admin";

/// Check if the authenticated user has admin role
pub fn check_admin_role(auth_user: &AuthenticatedUser) -> Result<(), HttpResponse> {
    if auth_user.role != ADMIN_ROLE {
        return Err(forbidden("Only admin users can perform this action"));
    }
    Ok(())
}

/// Allow the owner of `email`, or an admin, to act on it.
pub fn check_self_or_admin(auth_user: &AuthenticatedUser, email: &str) -> Result<(), HttpResponse> {
    if auth_user.role == ADMIN_ROLE || auth_user.email == normalize_email(email) {
        return Ok(());
    }
    Err(forbidden("You can only act on your own account"))
}

fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "success": false,
        "message": message,
    }))
}
