//! HTTP mapping for domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here. The wire
//! envelope is the one the dashboard client consumes:
//!
//! ```text
//! { "error": "<message>", ...details }
//! ```
//!
//! Structured details (e.g. the `required` field list) are flattened into
//! the envelope. Internal errors are redacted to a generic message; their
//! detail only ever reaches the server logs.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{json, Map, Value};

use crate::domain::{Error, ErrorCode};

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the wire envelope for an error.
pub(crate) fn error_envelope(error: &Error) -> Value {
    let mut body = Map::new();
    if matches!(error.code(), ErrorCode::InternalError) {
        body.insert("error".to_owned(), json!("Internal server error"));
        return Value::Object(body);
    }
    body.insert("error".to_owned(), json!(error.message()));
    if let Some(Value::Object(details)) = error.details() {
        for (key, value) in details {
            body.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    Value::Object(body)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(error_envelope(self))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("Missing required fields"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Unauthorized"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("Forbidden"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("Record not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("driver exploded"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn details_are_flattened_into_the_envelope() {
        let error = Error::invalid_request("Missing required fields")
            .with_details(json!({ "required": ["date", "serviceType"] }));
        let envelope = error_envelope(&error);
        assert_eq!(envelope["error"], "Missing required fields");
        assert_eq!(envelope["required"][1], "serviceType");
    }

    #[rstest]
    fn internal_detail_is_redacted() {
        let error =
            Error::internal("connection refused to db:5432").with_details(json!({ "dsn": "x" }));
        let envelope = error_envelope(&error);
        assert_eq!(envelope["error"], "Internal server error");
        assert!(envelope.get("dsn").is_none());
    }

    #[rstest]
    fn details_never_override_the_error_key() {
        let error = Error::forbidden("Forbidden").with_details(json!({ "error": "spoofed" }));
        let envelope = error_envelope(&error);
        assert_eq!(envelope["error"], "Forbidden");
    }
}
