use actix_web::{web, Error, HttpResponse, Result};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::accounts::cards;
use crate::handlers::helpers::missing_email;
use crate::ledger::Ledger;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::card::{BalanceResponse, NewCardRequest};
use crate::types::response::DataResponse;
use crate::types::transaction::EmailQuery;
use crate::utils::auth::{check_self_or_admin, ADMIN_ROLE};
use crate::utils::user::normalize_email;

pub async fn add_card(
    db: web::Data<DatabaseConnection>,
    req: web::Json<NewCardRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_self_or_admin(&auth_user, &req.user_email) {
        return Ok(response);
    }
    // Cards start empty; funding one is an admin action.
    if req.opening_balance != Decimal::ZERO && auth_user.role != ADMIN_ROLE {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only admin users can set an opening balance",
        })));
    }

    let card = cards::add_card(db.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(DataResponse::new("Card added", card)))
}

pub async fn get_balance(
    ledger: web::Data<Ledger>,
    query: web::Query<EmailQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let Some(email) = query.email() else {
        return Ok(missing_email());
    };
    if let Err(response) = check_self_or_admin(&auth_user, email) {
        return Ok(response);
    }

    let balance = ledger.get_balance(email).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse {
        success: true,
        user_email: normalize_email(email),
        balance,
    }))
}

pub async fn get_cards(
    ledger: web::Data<Ledger>,
    query: web::Query<EmailQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let Some(email) = query.email() else {
        return Ok(missing_email());
    };
    if let Err(response) = check_self_or_admin(&auth_user, email) {
        return Ok(response);
    }

    Ok(HttpResponse::Ok().json(ledger.get_cards(email).await?))
}
