//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::barcode::BarcodeClient;
use crate::services::metron::MetronClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    metron: MetronClient,
    barcode: BarcodeClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let metron = MetronClient::new(&config.metron);
        let barcode = BarcodeClient::new(config.barcode_service_url.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                metron,
                barcode,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Metron catalog client.
    #[must_use]
    pub fn metron(&self) -> &MetronClient {
        &self.inner.metron
    }

    /// Get a reference to the barcode recognition client.
    #[must_use]
    pub fn barcode(&self) -> &BarcodeClient {
        &self.inner.barcode
    }
}
