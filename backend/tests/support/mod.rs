//! Shared helpers for HTTP integration tests.
//!
//! Assembles the full API surface over in-memory repositories, mirroring
//! the server wiring minus the socket: same routes, same session
//! middleware shape, same origin allow-list.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use maintlog::domain::memory::{InMemoryServiceRecordRepository, InMemoryUserRepository};
use maintlog::domain::{PasswordAuthService, ServiceRecordService};
use maintlog::inbound::http::origin::AllowedOrigin;
use maintlog::inbound::http::state::HttpState;
use maintlog::inbound::http::{auth, service_records};

/// Origin accepted by the test app's auth routes.
pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

/// Compose the API over fresh in-memory repositories.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(PasswordAuthService::new(Arc::new(
            InMemoryUserRepository::new(),
        ))),
        Arc::new(ServiceRecordService::new(Arc::new(
            InMemoryServiceRecordRepository::new(),
        ))),
    );
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    let allowed = AllowedOrigin::parse(FRONTEND_ORIGIN).expect("test origin is valid");
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(allowed))
        .service(
            web::scope("/api")
                .wrap(session)
                .service(auth::sign_up)
                .service(auth::sign_in)
                .service(auth::sign_out)
                .service(auth::get_session)
                .service(service_records::list_records)
                .service(service_records::get_record)
                .service(service_records::create_record)
                .service(service_records::update_record)
                .service(service_records::delete_record),
        )
}

/// Convenience alias for the initialised test service.
pub trait ApiService:
    actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
>
{
}

impl<S> ApiService for S where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >
{
}

/// Sign up a fresh user and return its session cookie.
pub async fn sign_up(app: &impl ApiService, email: &str) -> Cookie<'static> {
    let request = test::TestRequest::post()
        .uri("/api/auth/sign-up/email")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .set_json(json!({
            "email": email,
            "password": "password123",
            "name": "Test User",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "sign-up should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// A complete, valid create payload.
pub fn oil_change_payload() -> Value {
    json!({
        "date": "2024-12-07T10:00:00Z",
        "serviceType": "Oil Change",
        "serviceTime": 2.5,
        "equipmentId": "TEST-001",
        "equipmentType": "Forklift",
        "technician": "Test Tech",
        "partsUsed": "Test parts",
        "serviceNotes": "Test notes",
    })
}

/// Create a record and return its id.
pub async fn create_record(app: &impl ApiService, cookie: &Cookie<'static>, payload: Value) -> String {
    let request = test::TestRequest::post()
        .uri("/api/service-records")
        .cookie(cookie.clone())
        .set_json(payload)
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    body["data"]["id"]
        .as_str()
        .expect("created record id")
        .to_owned()
}
