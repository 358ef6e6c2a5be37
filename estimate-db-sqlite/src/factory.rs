use async_trait::async_trait;
use estimate_core::db::repository::{LeadRepository, RepositoryError};
use estimate_core::db::{DbConfig, RepositoryFactory};
use tracing::info;

use crate::repository::SqliteRepository;

const MEMORY: &str = ":memory:";

/// Maps a bare path to a sqlx URL that creates the file when missing.
/// Values already written as `sqlite:` URLs pass through.
pub fn connection_url(connection: &str) -> String {
    let connection = connection.trim();
    if connection == MEMORY {
        "sqlite::memory:".to_string()
    } else if connection.starts_with("sqlite:") {
        connection.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", connection)
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use estimate_core::db::RepositoryRegistry;
/// use estimate_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens `config.connection`, either a file path (created if missing)
    /// or `:memory:`, and applies pending migrations.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn LeadRepository>, RepositoryError> {
        let repo = if config.connection.trim() == MEMORY {
            SqliteRepository::in_memory().await
        } else {
            SqliteRepository::new(&connection_url(&config.connection)).await
        }
        .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;

        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;

        info!(connection = %config.connection, "opened sqlite lead store");
        Ok(Box::new(repo))
    }
}
