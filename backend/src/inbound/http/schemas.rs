//! OpenAPI schema definitions for wire-level payloads without serde types.
//!
//! The error envelope is assembled dynamically (`{"error": ..., ...}`), so
//! its schema is declared here for documentation purposes rather than
//! derived from a struct the handlers use.

use serde_json::json;
use utoipa::ToSchema;

/// OpenAPI schema for the error envelope returned by every failing route.
#[derive(ToSchema)]
#[schema(as = ErrorBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorBodySchema {
    /// Human-readable failure message.
    #[schema(example = "Record not found")]
    error: String,
    /// Names of the required create fields; present on validation failures.
    #[schema(example = json!(["date", "serviceType"]))]
    required: Option<Vec<String>>,
}
