use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::accounts::users;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::response::DataResponse;
use crate::types::user::{UpdateUserRequest, UserResponse};
use crate::utils::auth::{check_admin_role, ADMIN_ROLE};

pub async fn get_all_users(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_admin_role(&auth_user) {
        return Ok(response);
    }

    let users: Vec<UserResponse> = users::list_users(db.get_ref())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user_by_id(
    db: web::Data<DatabaseConnection>,
    user_id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let user = users::get_user_by_id(db.get_ref(), *user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn get_user_by_email(
    db: web::Data<DatabaseConnection>,
    email: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user = users::get_user_by_email(db.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn update_user(
    db: web::Data<DatabaseConnection>,
    user_id: web::Path<i32>,
    req: web::Json<UpdateUserRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let is_admin = auth_user.role == ADMIN_ROLE;
    if auth_user.id != *user_id && !is_admin {
        return Ok(forbidden());
    }
    if req.role.is_some() && !is_admin {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only admin users can change roles",
        })));
    }

    let user = users::update_user(db.get_ref(), *user_id, &req).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

pub async fn delete_user(
    db: web::Data<DatabaseConnection>,
    user_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if auth_user.id != *user_id && auth_user.role != ADMIN_ROLE {
        return Ok(forbidden());
    }

    users::delete_user(db.get_ref(), *user_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User deleted successfully",
    })))
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "success": false,
        "message": "You can only manage your own account",
    }))
}
