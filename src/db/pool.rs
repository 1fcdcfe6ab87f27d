use sea_orm::ConnectOptions;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Pool settings for the process-wide connection pool.
///
/// The pool has a fixed size, tests each connection before handing it out
/// and closes connections once they reach `recycle_after`.
pub fn connect_options(config: &DatabaseConfig) -> AppResult<ConnectOptions> {
    if config.url.trim().is_empty() {
        return Err(AppError::Configuration(
            "No database connection string set".to_string(),
        ));
    }

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.pool_size)
        .min_connections(config.pool_size)
        .max_lifetime(config.recycle_after)
        .acquire_timeout(config.acquire_timeout)
        .test_before_acquire(true)
        .sqlx_logging(config.echo);

    Ok(opt)
}
