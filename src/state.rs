use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::migration;
use crate::services::{ExportFetcher, SugangClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    /// Source of course export payloads for the import pipeline
    pub fetcher: Arc<dyn ExportFetcher>,
}

impl AppState {
    /// Connect to the database, bootstrap the schema and build the upstream client
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let fetcher: Arc<dyn ExportFetcher> = Arc::new(
            SugangClient::new(&config).map_err(|e| AppStateError::HttpClient(e.to_string()))?,
        );

        Self::with_fetcher(config, fetcher).await
    }

    /// Create AppState with a custom export fetcher (for testing)
    pub async fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn ExportFetcher>,
    ) -> Result<Self, AppStateError> {
        let db = connect(&config).await?;

        migration::run(&db)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        Ok(Self {
            db,
            config,
            fetcher,
        })
    }
}

async fn connect(config: &Config) -> Result<DatabaseConnection, AppStateError> {
    let mut opt = ConnectOptions::new(&config.database_url);
    if config.is_sqlite() {
        // Every connection to `sqlite::memory:` is its own database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(100).min_connections(5);
    }
    opt.sqlx_logging(true);

    Database::connect(opt)
        .await
        .map_err(|e| AppStateError::Database(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Database connection error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
