use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Lead, NewLead};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for contact details captured when a quote is unlocked.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn record_lead(
        &self,
        lead: NewLead,
    ) -> Result<Lead, RepositoryError>;

    async fn get_lead(
        &self,
        id: i64,
    ) -> Result<Lead, RepositoryError>;

    /// All leads, most recently submitted first.
    async fn list_leads(&self) -> Result<Vec<Lead>, RepositoryError>;

    async fn delete_lead(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;
}
