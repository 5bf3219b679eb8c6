//! Backend entry-point: wires configuration, persistence, and the HTTP
//! server.

use actix_web::cookie::Key;
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use maintlog::inbound::http::health::HealthState;
use maintlog::inbound::http::origin::AllowedOrigin;
use maintlog::outbound::persistence::{run_pending_migrations, DbPool, PoolConfig};
use maintlog::server::{create_server, AppSettings, ServerConfig};

/// Resolve the session signing key from the configured file, or generate an
/// ephemeral one when permitted (debug builds and explicit opt-in).
fn session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let key = session_key(&settings)?;

    let allowed_origin = AllowedOrigin::parse(settings.frontend_origin())
        .map_err(|e| std::io::Error::other(format!("invalid frontend origin: {e}")))?;

    let bind_addr = settings
        .bind_addr()
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, bind_addr, allowed_origin);
    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %bind_addr, "server listening");
    server.await
}
