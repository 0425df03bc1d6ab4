//! Shared-secret guard for the cron and report endpoints.
//!
//! When a secret is configured the request must carry
//! `Authorization: Bearer <secret>`. Without a secret every request passes,
//! which is the local development setup.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error,
};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::unauthorized;

/// Cron secret middleware factory
#[derive(Clone)]
pub struct CronAuth {
    secret: Option<Arc<str>>,
}

impl CronAuth {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CronAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CronAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CronAuthMiddleware {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct CronAuthMiddleware<S> {
    service: Rc<S>,
    secret: Option<Arc<str>>,
}

impl<S, B> Service<ServiceRequest> for CronAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authorized = match &self.secret {
            None => true,
            Some(secret) => extract_bearer_token(&req)
                .map(|token| constant_time_eq(token.as_bytes(), secret.as_bytes()))
                .unwrap_or(false),
        };

        Box::pin(async move {
            if !authorized {
                tracing::warn!(path = %req.path(), "Rejected cron request without valid secret");
                let (request, _payload) = req.into_parts();
                return Ok(ServiceResponse::new(request, unauthorized().map_into_right_body()));
            }

            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}
