//! Server configuration: environment-driven settings and the assembled
//! runtime configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::origin::AllowedOrigin;
use crate::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";

/// Settings loaded from the environment via OrthoConfig.
///
/// The frontend origin and the database URL are the deployment's required
/// knobs; everything else has a development-friendly default.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAINTLOG")]
pub struct AppSettings {
    /// Socket address to bind, e.g. `0.0.0.0:3000`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the server runs on
    /// in-memory repositories (development and tests only).
    pub database_url: Option<String>,
    /// Frontend origin allowed by CORS and the auth origin check.
    pub frontend_origin: Option<String>,
    /// File containing the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow generating an ephemeral session key when the key file is
    /// unavailable. Sessions then die with the process.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Set the `Secure` flag on the session cookie.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl AppSettings {
    /// Configured bind address, falling back to the default port.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured frontend origin, falling back to the Vite dev server.
    pub fn frontend_origin(&self) -> &str {
        self.frontend_origin
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGIN)
    }

    /// Configured session key file path.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("/var/run/secrets/session_key"))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origin: AllowedOrigin,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: SocketAddr,
        allowed_origin: AllowedOrigin,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            allowed_origin,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without one the server falls back to in-memory repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings fallbacks.
    use super::*;
    use rstest::rstest;

    fn empty_settings() -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            frontend_origin: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
        }
    }

    #[rstest]
    fn defaults_cover_local_development() {
        let settings = empty_settings();
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
        assert_eq!(settings.frontend_origin(), "http://localhost:5173");
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/var/run/secrets/session_key")
        );
    }

    #[rstest]
    fn explicit_values_win() {
        let settings = AppSettings {
            bind_addr: Some("127.0.0.1:8088".into()),
            frontend_origin: Some("https://app.example.com".into()),
            ..empty_settings()
        };
        assert_eq!(settings.bind_addr(), "127.0.0.1:8088");
        assert_eq!(settings.frontend_origin(), "https://app.example.com");
    }
}
