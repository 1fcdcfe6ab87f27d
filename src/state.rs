use crate::config::Config;
use crate::db::SessionManager;
use crate::error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Unit-of-work manager over the shared PostgreSQL pool
    pub sessions: SessionManager,
    pub config: Config,
}

impl AppState {
    /// Connect to PostgreSQL and bring the schema up to date
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let sessions = SessionManager::connect(&config.database)
            .await
            .map_err(|e| match e {
                AppError::Configuration(msg) => AppStateError::Configuration(msg),
                other => AppStateError::Postgres(other.to_string()),
            })?;

        // Migrations share the SeaORM pool
        sqlx::migrate!("./migrations")
            .run(sessions.connection().get_postgres_connection_pool())
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        Ok(Self { sessions, config })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
