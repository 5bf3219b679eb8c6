//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::memory::{InMemoryServiceRecordRepository, InMemoryUserRepository};
use crate::domain::{PasswordAuthService, ServiceRecordService};
use crate::inbound::http::auth::{get_session, sign_in, sign_out, sign_up};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::origin::AllowedOrigin;
use crate::inbound::http::service_records::{
    create_record, delete_record, get_record, list_records, update_record,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::{Cors, Trace};
use crate::outbound::persistence::{DieselServiceRecordRepository, DieselUserRepository};

/// Build the HTTP state from configuration.
///
/// Uses the Diesel adapters when a pool is configured and in-memory
/// repositories otherwise, so the binary stays runnable for local
/// development and the test suite without a database.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::new(
            Arc::new(PasswordAuthService::new(Arc::new(
                DieselUserRepository::new(pool.clone()),
            ))),
            Arc::new(ServiceRecordService::new(Arc::new(
                DieselServiceRecordRepository::new(pool.clone()),
            ))),
        ),
        None => {
            warn!("no database configured; state lives in memory and dies with the process");
            HttpState::new(
                Arc::new(PasswordAuthService::new(Arc::new(
                    InMemoryUserRepository::new(),
                ))),
                Arc::new(ServiceRecordService::new(Arc::new(
                    InMemoryServiceRecordRepository::new(),
                ))),
            )
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origin: AllowedOrigin,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origin,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(sign_up)
        .service(sign_in)
        .service(sign_out)
        .service(get_session)
        .service(list_records)
        .service(get_record)
        .service(create_record)
        .service(update_record)
        .service(delete_record);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::Data::new(allowed_origin.clone()))
        .wrap(Cors::new(allowed_origin))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state flipped once the server is wired.
/// - `config`: pre-built [`ServerConfig`] with session, origin, and binding
///   settings plus the optional database pool.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        allowed_origin,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allowed_origin: allowed_origin.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
