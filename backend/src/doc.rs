//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: auth endpoints, service record CRUD, and health probes.
//! Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{
    AuthResponseBody, GetSessionBody, SessionBody, SigninBody, SignupBody, UserBody,
};
use crate::inbound::http::schemas::ErrorBodySchema;
use crate::inbound::http::service_records::{
    CreateServiceRecordBody, CreatedBody, ServiceRecordBody, UpdateServiceRecordBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the sign-up and sign-in endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Maintlog backend API",
        description = "Session-authenticated CRUD over equipment service records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::get_session,
        crate::inbound::http::service_records::list_records,
        crate::inbound::http::service_records::get_record,
        crate::inbound::http::service_records::create_record,
        crate::inbound::http::service_records::update_record,
        crate::inbound::http::service_records::delete_record,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupBody,
        SigninBody,
        UserBody,
        AuthResponseBody,
        SessionBody,
        GetSessionBody,
        ServiceRecordBody,
        CreateServiceRecordBody,
        UpdateServiceRecordBody,
        CreatedBody,
        ErrorBodySchema,
    )),
    tags(
        (name = "auth", description = "Account registration and session management"),
        (name = "service-records", description = "Equipment service history CRUD"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
