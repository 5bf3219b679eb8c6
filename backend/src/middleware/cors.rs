//! CORS middleware for the single configured frontend origin.
//!
//! The deployment serves exactly one browser client, so the policy is a
//! one-entry allow-list: echo the configured origin with credentials
//! enabled when the request's `Origin` matches, answer preflights
//! directly, and add nothing for other origins (the browser then blocks
//! the response). Requests without an `Origin` header — curl, server-to-
//! server, probes — pass through untouched.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue, ORIGIN, VARY};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::inbound::http::origin::AllowedOrigin;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const PREFLIGHT_MAX_AGE: &str = "3600";

/// Middleware factory applying the one-origin CORS policy.
#[derive(Clone)]
pub struct Cors {
    allowed: AllowedOrigin,
}

impl Cors {
    /// Build the middleware for the configured frontend origin.
    pub fn new(allowed: AllowedOrigin) -> Self {
        Self { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service,
            allowed: self.allowed.clone(),
        }))
    }
}

/// Service wrapper produced by [`Cors`].
pub struct CorsMiddleware<S> {
    service: S,
    allowed: AllowedOrigin,
}

fn preflight_response(allowed: &AllowedOrigin) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            allowed.as_header_value(),
        ))
        .insert_header((header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE))
        .insert_header((VARY, "Origin"))
        .finish()
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
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
        let allowed = self.allowed.clone();
        let permitted = req
            .headers()
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|origin| allowed.matches(origin));

        if permitted && req.method() == Method::OPTIONS {
            let (request, _) = req.into_parts();
            let response = preflight_response(&allowed);
            return Box::pin(async move {
                Ok(ServiceResponse::new(request, response).map_into_right_body())
            });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut response = fut.await?;
            let headers = response.headers_mut();
            if permitted {
                if let Ok(value) = HeaderValue::from_str(&allowed.as_header_value()) {
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
                    headers.insert(
                        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                        HeaderValue::from_static("true"),
                    );
                }
            }
            headers.append(VARY, HeaderValue::from_static("Origin"));
            Ok(response.map_into_left_body())
        })
    }
}
