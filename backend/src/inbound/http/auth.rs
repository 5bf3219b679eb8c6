//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/auth/sign-up/email   {"email","password","name"}
//! POST /api/auth/sign-in/email   {"email","password"}
//! POST /api/auth/sign-out
//! GET  /api/auth/get-session
//! ```
//!
//! Successful sign-up and sign-in establish a cookie session; the returned
//! `token` is an opaque compatibility field — the cookie is the credential.
//! State-changing auth routes additionally require an `Origin` header
//! matching the configured frontend origin.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CredentialValidationError, Error, LoginCredentials, SignupCredentials, User,
};
use crate::inbound::http::origin::{require_matching_origin, AllowedOrigin};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Sign-up request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Sign-in request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninBody {
    pub email: String,
    pub password: String,
}

/// Public user representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name,
            email_verified: user.email_verified,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Response body for successful sign-up and sign-in.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseBody {
    /// Opaque token kept for client compatibility; sessions ride the cookie.
    pub token: String,
    pub user: UserBody,
}

/// Session description returned by `get-session`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Response body for `get-session` when a session exists.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetSessionBody {
    pub user: UserBody,
    pub session: SessionBody,
}

fn map_credential_error(err: CredentialValidationError) -> Error {
    let (field, code) = match err {
        CredentialValidationError::InvalidEmail => ("email", "invalid_email"),
        CredentialValidationError::PasswordTooShort => ("password", "password_too_short"),
        CredentialValidationError::EmptyName => ("name", "empty_name"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn auth_response(session: &SessionContext, user: User) -> ApiResult<HttpResponse> {
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponseBody {
        token: Uuid::new_v4().to_string(),
        user: UserBody::from(user),
    }))
}

/// Register a new account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/sign-up/email",
    request_body = SignupBody,
    responses(
        (status = 200, description = "Account created and signed in", body = AuthResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid credentials or email taken", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 403, description = "Origin not allowed", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["auth"],
    operation_id = "signUpEmail",
    security([])
)]
#[post("/auth/sign-up/email")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    origin: web::Data<AllowedOrigin>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    require_matching_origin(&req, &origin)?;
    let body = payload.into_inner();
    let credentials = SignupCredentials::try_from_parts(&body.email, &body.password, &body.name)
        .map_err(map_credential_error)?;
    let user = state.auth.sign_up(credentials).await?;
    auth_response(&session, user)
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in/email",
    request_body = SigninBody,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed credentials", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 401, description = "Unknown email or wrong password", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 403, description = "Origin not allowed", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["auth"],
    operation_id = "signInEmail",
    security([])
)]
#[post("/auth/sign-in/email")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    origin: web::Data<AllowedOrigin>,
    session: SessionContext,
    req: HttpRequest,
    payload: web::Json<SigninBody>,
) -> ApiResult<HttpResponse> {
    require_matching_origin(&req, &origin)?;
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.email, &body.password)
        .map_err(map_credential_error)?;
    let user = state.auth.sign_in(credentials).await?;
    auth_response(&session, user)
}

/// End the authenticated session.
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Session cleared"),
        (status = 403, description = "Origin not allowed", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["auth"],
    operation_id = "signOut",
    security(("SessionCookie" = []))
)]
#[post("/auth/sign-out")]
pub async fn sign_out(
    origin: web::Data<AllowedOrigin>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    require_matching_origin(&req, &origin)?;
    session.clear();
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Resolve the current session to its user, or `null` when signed out.
///
/// Always answers 200: clients treat any non-session state as signed-out,
/// so a missing cookie, a stale id, and a deleted account all read the same.
#[utoipa::path(
    get,
    path = "/api/auth/get-session",
    responses(
        (status = 200, description = "Session and user, or null", body = GetSessionBody)
    ),
    tags = ["auth"],
    operation_id = "getSession",
    security(("SessionCookie" = []))
)]
#[get("/auth/get-session")]
pub async fn get_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(HttpResponse::Ok().json(serde_json::Value::Null));
    };
    match state.auth.fetch_user(&user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(GetSessionBody {
            session: SessionBody {
                user_id: user.id.to_string(),
            },
            user: UserBody::from(user),
        })),
        None => {
            // The account is gone; drop the orphaned session.
            session.clear();
            Ok(HttpResponse::Ok().json(serde_json::Value::Null))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{signup_request, test_app, TEST_ORIGIN};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[actix_web::test]
    async fn sign_up_returns_user_and_sets_cookie() {
        let app = actix_test::init_service(test_app()).await;
        let response =
            actix_test::call_service(&app, signup_request("tech@example.com").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session"));
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body["token"].as_str().is_some());
        assert_eq!(body["user"]["email"], "tech@example.com");
        assert_eq!(body["user"]["emailVerified"], false);
    }

    #[actix_web::test]
    async fn sign_up_requires_a_matching_origin() {
        let app = actix_test::init_service(test_app()).await;

        let missing = actix_test::TestRequest::post()
            .uri("/api/auth/sign-up/email")
            .set_json(json!({
                "email": "tech@example.com",
                "password": "password123",
                "name": "Test Tech",
            }))
            .to_request();
        let response = actix_test::call_service(&app, missing).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let foreign = signup_request("tech@example.com")
            .insert_header(("Origin", "http://evil.example"))
            .to_request();
        let response = actix_test::call_service(&app, foreign).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], "Origin not allowed");
    }

    #[rstest]
    #[case(json!({"email": "bad", "password": "password123", "name": "T"}), "invalid_email")]
    #[case(json!({"email": "t@example.com", "password": "short", "name": "T"}), "password_too_short")]
    #[case(json!({"email": "t@example.com", "password": "password123", "name": " "}), "empty_name")]
    #[actix_web::test]
    async fn sign_up_rejects_invalid_credentials(#[case] payload: Value, #[case] code: &str) {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/sign-up/email")
            .insert_header(("Origin", TEST_ORIGIN))
            .set_json(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], code);
    }

    #[actix_web::test]
    async fn duplicate_sign_up_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let first =
            actix_test::call_service(&app, signup_request("tech@example.com").to_request()).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second =
            actix_test::call_service(&app, signup_request("tech@example.com").to_request()).await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["code"], "email_taken");
    }

    #[actix_web::test]
    async fn sign_in_round_trips_and_rejects_bad_passwords() {
        let app = actix_test::init_service(test_app()).await;
        actix_test::call_service(&app, signup_request("tech@example.com").to_request()).await;

        let good = actix_test::TestRequest::post()
            .uri("/api/auth/sign-in/email")
            .insert_header(("Origin", TEST_ORIGIN))
            .set_json(json!({ "email": "tech@example.com", "password": "password123" }))
            .to_request();
        let response = actix_test::call_service(&app, good).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bad = actix_test::TestRequest::post()
            .uri("/api/auth/sign-in/email")
            .insert_header(("Origin", TEST_ORIGIN))
            .set_json(json!({ "email": "tech@example.com", "password": "wrong-password" }))
            .to_request();
        let response = actix_test::call_service(&app, bad).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[actix_web::test]
    async fn get_session_reflects_sign_in_and_sign_out() {
        let app = actix_test::init_service(test_app()).await;

        // No cookie: signed out.
        let anonymous = actix_test::TestRequest::get()
            .uri("/api/auth/get-session")
            .to_request();
        let response = actix_test::call_service(&app, anonymous).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body.is_null());

        let signed_up =
            actix_test::call_service(&app, signup_request("tech@example.com").to_request()).await;
        let cookie = signed_up
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let with_session = actix_test::TestRequest::get()
            .uri("/api/auth/get-session")
            .cookie(cookie.clone())
            .to_request();
        let response = actix_test::call_service(&app, with_session).await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["user"]["email"], "tech@example.com");
        assert_eq!(body["session"]["userId"], body["user"]["id"]);

        let sign_out_req = actix_test::TestRequest::post()
            .uri("/api/auth/sign-out")
            .insert_header(("Origin", TEST_ORIGIN))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, sign_out_req).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie")
            .into_owned();

        let after = actix_test::TestRequest::get()
            .uri("/api/auth/get-session")
            .cookie(cleared)
            .to_request();
        let response = actix_test::call_service(&app, after).await;
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body.is_null());
    }
}
