use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::header,
    web, Error, HttpMessage,
};
use entity::users;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::rc::Rc;

use crate::utils::jwt::verify_jwt_token;

/// The caller behind a verified bearer token, as currently stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl From<users::Model> for AuthenticatedUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            let token = auth_header.ok_or_else(|| ErrorUnauthorized("Missing authorization header"))?;
            let user_id: i32 = verify_jwt_token(token)
                .ok()
                .and_then(|claims| claims.sub.parse().ok())
                .ok_or_else(|| ErrorUnauthorized("Invalid token"))?;

            // Email and role come from the users table, not the token; both
            // may have changed since it was issued.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("Database not configured"))?;
            let user = users::Entity::find_by_id(user_id)
                .one(db.get_ref())
                .await
                .map_err(|e| {
                    log::error!("Failed to load user {} for auth: {}", user_id, e);
                    ErrorInternalServerError("Failed to verify user")
                })?
                .ok_or_else(|| ErrorUnauthorized("Unknown user"))?;

            req.extensions_mut().insert(AuthenticatedUser::from(user));
            svc.call(req).await
        })
    }
}
