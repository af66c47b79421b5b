//! Mapping of domain errors onto HTTP responses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::accounts::AccountError;
use crate::ledger::{ErrorKind, LedgerError, OperationResult};

impl ResponseError for LedgerError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidState => StatusCode::CONFLICT,
            ErrorKind::InsufficientFunds | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(OperationResult::from(self))
    }
}

impl ResponseError for AccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::Conflict(_) => StatusCode::CONFLICT,
            AccountError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AccountError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccountError::Hashing(_) | AccountError::Token(_) | AccountError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Account operation failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.public_message(),
        }))
    }
}

pub fn missing_email() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": "user_email is required",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::transaction::TransactionStatus;
    use rust_decimal::Decimal;

    #[test]
    fn ledger_errors_map_to_status_codes() {
        let cases = [
            (LedgerError::NotFound("transaction 1".into()), 404),
            (
                LedgerError::InvalidState {
                    id: 1,
                    status: TransactionStatus::Declined,
                },
                409,
            ),
            (
                LedgerError::InsufficientFunds {
                    email: "a@b.co".into(),
                    available: Decimal::ZERO,
                    requested: Decimal::ONE,
                },
                400,
            ),
            (LedgerError::InvalidInput("amount".into()), 400),
            (LedgerError::Storage(sea_orm::DbErr::Custom("down".into())), 500),
        ];
        for (err, code) in cases {
            assert_eq!(err.status_code().as_u16(), code, "{}", err);
        }
    }

    #[test]
    fn account_errors_map_to_status_codes() {
        assert_eq!(AccountError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AccountError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
