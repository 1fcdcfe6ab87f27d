use futures::future::BoxFuture;
use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::DatabaseConfig;
use crate::db::pool::connect_options;
use crate::error::AppResult;

/// Hands out units of work over the shared connection pool.
///
/// Cloning is cheap; every clone shares the same pool.
#[derive(Clone, Debug)]
pub struct SessionManager {
    db: DatabaseConnection,
}

impl SessionManager {
    /// Connect the pool, failing fast on an empty connection string
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let opt = connect_options(config)?;
        let db = Database::connect(opt).await?;

        tracing::info!(
            pool_size = config.pool_size,
            echo = config.echo,
            "Database pool ready"
        );

        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Open a transaction the caller commits or rolls back itself.
    ///
    /// Dropping the returned handle without committing rolls it back.
    pub async fn begin(&self) -> AppResult<DatabaseTransaction> {
        Ok(self.db.begin().await?)
    }

    /// Run `f` inside one unit of work.
    ///
    /// Commits when `f` returns `Ok`; rolls back and returns the error unchanged
    /// when it returns `Err`. If the returned future is dropped before
    /// completion the transaction is dropped with it, and its rollback runs
    /// before the connection is handed out again.
    ///
    /// ```ignore
    /// let note = sessions
    ///     .with_session(|txn| Box::pin(async move { NoteService::new(txn).create(input).await }))
    ///     .await?;
    /// ```
    pub async fn with_session<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, AppResult<T>> + Send,
        T: Send,
    {
        let txn = self.db.begin().await?;

        match f(&txn).await {
            Ok(value) => {
                txn.commit().await?;
                tracing::debug!("Session committed");
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Rolling back session");
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }
}
