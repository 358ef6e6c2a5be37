use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estimate_core::{Lead, LeadRepository, NewLead, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{debug, info};

use crate::decimal::{decimal_to_text, get_optional_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    /// An in-memory database. The pool holds a single connection because
    /// every SQLite connection to `:memory:` opens its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn row_to_lead(row: &SqliteRow) -> Result<Lead, RepositoryError> {
    Ok(Lead {
        id: row.try_get("id").map_err(database_error)?,
        name: row.try_get("name").map_err(database_error)?,
        email: row.try_get("email").map_err(database_error)?,
        phone: row.try_get("phone").map_err(database_error)?,
        quoted_total: get_optional_decimal(row, "quoted_total")?,
        submitted_at: row
            .try_get::<DateTime<Utc>, _>("submitted_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get submitted_at: {}", e)))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl LeadRepository for SqliteRepository {
    async fn record_lead(
        &self,
        lead: NewLead,
    ) -> Result<Lead, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO leads (name, email, phone, quoted_total, submitted_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(lead.quoted_total.map(decimal_to_text))
        .bind(lead.submitted_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        let id = result.last_insert_rowid();
        info!(id, phone = %lead.phone, "recorded lead");
        self.get_lead(id).await
    }

    async fn get_lead(
        &self,
        id: i64,
    ) -> Result<Lead, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, quoted_total, submitted_at, created_at
             FROM leads WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_lead(&row)
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, quoted_total, submitted_at, created_at
             FROM leads ORDER BY submitted_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        debug!(count = rows.len(), "listed leads");
        rows.iter().map(row_to_lead).collect()
    }

    async fn delete_lead(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
