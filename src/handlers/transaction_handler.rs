use actix_web::{web, Error, HttpResponse, Result};

use crate::handlers::helpers::missing_email;
use crate::ledger::{Ledger, MoneyOrder};
use crate::middleware::auth::AuthenticatedUser;
use crate::types::response::DataResponse;
use crate::types::transaction::EmailQuery;
use crate::utils::auth::{check_admin_role, check_self_or_admin, ADMIN_ROLE};
use crate::utils::pagination::PaginationQuery;

pub async fn request_money(
    ledger: web::Data<Ledger>,
    req: web::Json<MoneyOrder>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_self_or_admin(&auth_user, &req.sender_email) {
        return Ok(response);
    }

    let record = ledger.request_money(&req).await?;
    Ok(HttpResponse::Created().json(DataResponse::new("Money request sent", record)))
}

pub async fn send_money(
    ledger: web::Data<Ledger>,
    req: web::Json<MoneyOrder>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_self_or_admin(&auth_user, &req.sender_email) {
        return Ok(response);
    }

    let record = ledger.send_money(&req).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new("Transfer completed", record)))
}

/// Only the payer of a request (its recipient) may accept it.
pub async fn accept_request(
    ledger: web::Data<Ledger>,
    transaction_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let record = ledger.get_transaction(*transaction_id).await?;
    if let Err(response) = check_self_or_admin(&auth_user, &record.recipient_email) {
        return Ok(response);
    }

    let record = ledger.accept_request(*transaction_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(
        "Request accepted and money transferred",
        record,
    )))
}

pub async fn decline_request(
    ledger: web::Data<Ledger>,
    transaction_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let record = ledger.get_transaction(*transaction_id).await?;
    if let Err(response) = check_self_or_admin(&auth_user, &record.recipient_email) {
        return Ok(response);
    }

    let record = ledger.decline_request(*transaction_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new("Request declined", record)))
}

pub async fn revoke_transaction(
    ledger: web::Data<Ledger>,
    transaction_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_admin_role(&auth_user) {
        return Ok(response);
    }

    log::info!(
        "Admin {} revoking transaction {}",
        auth_user.id,
        transaction_id
    );
    let record = ledger.revoke_transaction(*transaction_id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new("Transaction revoked", record)))
}

pub async fn get_all_transactions(
    ledger: web::Data<Ledger>,
    query: web::Query<PaginationQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(response) = check_admin_role(&auth_user) {
        return Ok(response);
    }

    let page = ledger.all_transactions(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_transaction(
    ledger: web::Data<Ledger>,
    transaction_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let record = ledger.get_transaction(*transaction_id).await?;

    let is_party = auth_user.email == record.sender_email || auth_user.email == record.recipient_email;
    if !is_party && auth_user.role != ADMIN_ROLE {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "message": format!("transaction {} not found", record.id),
        })));
    }

    Ok(HttpResponse::Ok().json(record))
}

pub async fn get_transactions_by_email(
    ledger: web::Data<Ledger>,
    email: web::Query<EmailQuery>,
    page: web::Query<PaginationQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let Some(email) = email.email() else {
        return Ok(missing_email());
    };
    if let Err(response) = check_self_or_admin(&auth_user, email) {
        return Ok(response);
    }

    let page = ledger.transactions_by_email(email, &page).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get_pending_requests(
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

    Ok(HttpResponse::Ok().json(ledger.pending_requests(email).await?))
}

pub async fn get_sent_requests(
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

    Ok(HttpResponse::Ok().json(ledger.sent_requests(email).await?))
}

pub async fn get_received_requests(
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

    Ok(HttpResponse::Ok().json(ledger.received_requests(email).await?))
}
