//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use crate::domain::memory::{InMemoryServiceRecordRepository, InMemoryUserRepository};
use crate::domain::{PasswordAuthService, ServiceRecordService};
use crate::inbound::http::origin::AllowedOrigin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, service_records};

/// Origin accepted by the test app's auth routes.
pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Compose the full API over in-memory repositories.
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
    let allowed = AllowedOrigin::parse(TEST_ORIGIN).expect("test origin is valid");
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(allowed))
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
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

/// A sign-up request carrying the test origin and a fixed password/name.
pub fn signup_request(email: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/sign-up/email")
        .insert_header(("Origin", TEST_ORIGIN))
        .set_json(json!({
            "email": email,
            "password": "password123",
            "name": "Test Tech",
        }))
}

/// Sign up a fresh user and return its session cookie.
pub async fn signup_and_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> Cookie<'static> {
    let response = test::call_service(app, signup_request(email).to_request()).await;
    assert!(response.status().is_success(), "sign-up should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// The canonical complete create payload used across handler tests.
pub fn valid_record_json() -> Value {
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
