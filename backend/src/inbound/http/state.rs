//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, ServiceRecords};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub records: Arc<dyn ServiceRecords>,
}

impl HttpState {
    /// Construct state from the two port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use maintlog::domain::memory::{InMemoryServiceRecordRepository, InMemoryUserRepository};
    /// use maintlog::domain::{PasswordAuthService, ServiceRecordService};
    /// use maintlog::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(PasswordAuthService::new(Arc::new(InMemoryUserRepository::new()))),
    ///     Arc::new(ServiceRecordService::new(Arc::new(
    ///         InMemoryServiceRecordRepository::new(),
    ///     ))),
    /// );
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(auth: Arc<dyn AuthService>, records: Arc<dyn ServiceRecords>) -> Self {
        Self { auth, records }
    }
}
