//! End-to-end coverage of the authentication endpoints.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use support::{sign_up, test_app, FRONTEND_ORIGIN};

#[actix_web::test]
async fn sign_up_establishes_a_usable_session() {
    let app = test::init_service(test_app()).await;

    let request = test::TestRequest::post()
        .uri("/api/auth/sign-up/email")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .set_json(json!({
            "email": "new-user@example.com",
            "password": "password123",
            "name": "New User",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: Value = test::read_body_json(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "new-user@example.com");
    assert_eq!(body["user"]["name"], "New User");

    // The cookie authenticates API calls immediately.
    let list = test::TestRequest::get()
        .uri("/api/service-records")
        .cookie(cookie)
        .to_request();
    let listed = test::call_service(&app, list).await;
    assert_eq!(listed.status(), StatusCode::OK);
}

#[actix_web::test]
async fn auth_mutations_require_the_frontend_origin() {
    let app = test::init_service(test_app()).await;

    let request = test::TestRequest::post()
        .uri("/api/auth/sign-up/email")
        .insert_header(("Origin", "http://elsewhere.example"))
        .set_json(json!({
            "email": "user@example.com",
            "password": "password123",
            "name": "User",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Origin not allowed");
}

#[actix_web::test]
async fn sign_in_with_wrong_password_is_unauthorized() {
    let app = test::init_service(test_app()).await;
    sign_up(&app, "existing@example.com").await;

    let request = test::TestRequest::post()
        .uri("/api/auth/sign-in/email")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .set_json(json!({
            "email": "existing@example.com",
            "password": "not-the-password",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[actix_web::test]
async fn session_survives_sign_in_and_ends_at_sign_out() {
    let app = test::init_service(test_app()).await;
    sign_up(&app, "cycle@example.com").await;

    let sign_in = test::TestRequest::post()
        .uri("/api/auth/sign-in/email")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .set_json(json!({
            "email": "cycle@example.com",
            "password": "password123",
        }))
        .to_request();
    let signed_in = test::call_service(&app, sign_in).await;
    assert_eq!(signed_in.status(), StatusCode::OK);
    let cookie = signed_in
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();

    let session = test::TestRequest::get()
        .uri("/api/auth/get-session")
        .cookie(cookie.clone())
        .to_request();
    let response = test::call_service(&app, session).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["user"]["email"], "cycle@example.com");

    let sign_out = test::TestRequest::post()
        .uri("/api/auth/sign-out")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, sign_out).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let session_after = test::TestRequest::get()
        .uri("/api/auth/get-session")
        .cookie(cleared.clone())
        .to_request();
    let response = test::call_service(&app, session_after).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert!(body.is_null());

    let list = test::TestRequest::get()
        .uri("/api/service-records")
        .cookie(cleared)
        .to_request();
    let response = test::call_service(&app, list).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn get_session_without_cookie_is_null() {
    let app = test::init_service(test_app()).await;

    let request = test::TestRequest::get()
        .uri("/api/auth/get-session")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert!(body.is_null());
}
