//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: hold the transport-agnostic core of the system — the service
//! record lifecycle and its authorization model — plus the identity types
//! the authentication subsystem needs. Inbound adapters translate HTTP to
//! these types; outbound adapters persist them.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — failure taxonomy shared by every operation.
//! - `ServiceRecord` and its create/update inputs.
//! - `User`, `UserId`, `Email` — identity types.
//! - `ports` — repository and use-case traits.
//! - `ServiceRecordService` / `PasswordAuthService` — port implementations.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod memory;
pub mod ports;
pub mod records_service;
pub mod service_record;
pub mod user;

pub use self::auth::{CredentialValidationError, LoginCredentials, SignupCredentials, PASSWORD_MIN};
pub use self::auth_service::PasswordAuthService;
pub use self::error::{Error, ErrorCode};
pub use self::records_service::ServiceRecordService;
pub use self::service_record::{
    PartsUsedPatch, ServiceRecord, ServiceRecordDraft, ServiceRecordInput, ServiceRecordPatch,
    ServiceTime, ServiceTimeError, ServiceTimeInput, REQUIRED_FIELDS,
};
pub use self::user::{Email, User, UserAccount, UserId, UserValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use maintlog::domain::{ApiResult, Error};
///
/// fn denied() -> ApiResult<()> {
///     Err(Error::forbidden("Forbidden"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
