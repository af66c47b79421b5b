use crate::types::response::ApiResponse;
use actix_web::{web, HttpResponse, Result};
use sea_orm::DatabaseConnection;

pub async fn health_check(db: web::Data<DatabaseConnection>) -> Result<HttpResponse> {
    if let Err(e) = db.ping().await {
        log::error!("Health check failed to reach database: {}", e);
        return Ok(HttpResponse::ServiceUnavailable().json(ApiResponse {
            message: "Database unavailable".to_string(),
            status: "unhealthy".to_string(),
        }));
    }

    let response = ApiResponse {
        message: "Pagatron API is running".to_string(),
        status: "healthy".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub async fn index() -> Result<HttpResponse> {
    let response = ApiResponse {
        message: "Welcome to Pagatron API".to_string(),
        status: "success".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
