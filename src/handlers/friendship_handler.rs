use actix_web::{web, Error, HttpResponse, Result};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::accounts::friendships;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::friendship::FriendRequest;
use crate::types::response::DataResponse;
use crate::types::user::UserResponse;
use crate::utils::auth::{check_self_or_admin, ADMIN_ROLE};

pub async fn send_friend_request(
    db: web::Data<DatabaseConnection>,
    req: web::Json<FriendRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_self_or_admin(&auth_user, &req.user_email) {
        return Ok(response);
    }

    let link = friendships::send_friend_request(db.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(DataResponse::new("Friend request sent", link)))
}

pub async fn accept_friend_request(
    db: web::Data<DatabaseConnection>,
    request_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_addressee(db.get_ref(), *request_id, &auth_user).await? {
        return Ok(response);
    }

    let link = friendships::accept_friend_request(db.get_ref(), *request_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new("Friend request accepted", link)))
}

pub async fn decline_friend_request(
    db: web::Data<DatabaseConnection>,
    request_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_addressee(db.get_ref(), *request_id, &auth_user).await? {
        return Ok(response);
    }

    let link = friendships::decline_friend_request(db.get_ref(), *request_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new("Friend request declined", link)))
}

pub async fn get_friends(
    db: web::Data<DatabaseConnection>,
    email: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let friends: Vec<UserResponse> = friendships::get_friends(db.get_ref(), &email)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(friends))
}

pub async fn get_received_friend_requests(
    db: web::Data<DatabaseConnection>,
    email: web::Path<String>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_self_or_admin(&auth_user, &email) {
        return Ok(response);
    }

    let requests = friendships::get_received_friend_requests(db.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(requests))
}

pub async fn remove_friend(
    db: web::Data<DatabaseConnection>,
    path: web::Path<(i32, i32)>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let (user_id, friend_id) = path.into_inner();
    if auth_user.id != user_id && auth_user.id != friend_id && auth_user.role != ADMIN_ROLE {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "You can only remove your own friendships",
        })));
    }

    friendships::remove_friend(db.get_ref(), user_id, friend_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Friendship removed",
    })))
}

/// Only the user a request was sent to may answer it.
async fn check_addressee(
    db: &DatabaseConnection,
    request_id: i32,
    auth_user: &AuthenticatedUser,
) -> Result<Result<(), HttpResponse>, Error> {
    let link = friendships::get_friend_request(db, request_id).await?;
    if link.friend_id != auth_user.id && auth_user.role != ADMIN_ROLE {
        return Ok(Err(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only the recipient can answer this friend request",
        }))));
    }
    Ok(Ok(()))
}
