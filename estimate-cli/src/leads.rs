//! Fire-and-forget lead submission.
//!
//! Recording a lead runs on its own task. The quote flow never waits on it
//! except for a short grace period before the process exits, and a failure
//! is only logged.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use estimate_core::db::DbConfig;
use estimate_core::{LeadRepository, NewLead};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::app::build_registry;
use crate::logging::log_task_error;

/// How long to wait for a pending submission before exiting.
pub const SUBMIT_GRACE: Duration = Duration::from_secs(3);

#[must_use = "call settle() so the submission can finish before exit"]
pub struct LeadSubmission(JoinHandle<()>);

impl LeadSubmission {
    /// Records `lead` in an already open repository.
    pub fn spawn(
        repo: Arc<dyn LeadRepository>,
        lead: NewLead,
    ) -> Self {
        Self(tokio::spawn(async move {
            let result = record(repo.as_ref(), lead).await;
            log_task_error("submit_lead", result);
        }))
    }

    /// Opens the configured lead store on the task itself, so a store that
    /// cannot be reached fails in the background too.
    pub fn spawn_with_config(
        config: DbConfig,
        lead: NewLead,
    ) -> Self {
        Self(tokio::spawn(async move {
            let result = async {
                let repo = build_registry()
                    .create(&config)
                    .await
                    .with_context(|| format!("Failed to open lead store '{}'", config.connection))?;
                record(repo.as_ref(), lead).await
            }
            .await;
            log_task_error("submit_lead", result);
        }))
    }

    /// Waits up to `grace` for the task. Returns whether it finished.
    pub async fn settle(
        self,
        grace: Duration,
    ) -> bool {
        match tokio::time::timeout(grace, self.0).await {
            Ok(Ok(())) => true,
            Ok(Err(join_error)) => {
                warn!(error = %join_error, "lead submission task aborted");
                true
            }
            Err(_) => {
                warn!(?grace, "lead submission still pending at exit");
                false
            }
        }
    }
}

async fn record(
    repo: &dyn LeadRepository,
    lead: NewLead,
) -> Result<()> {
    let saved = repo
        .record_lead(lead)
        .await
        .context("Failed to record lead")?;
    info!(id = saved.id, "lead submitted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use estimate_core::{Lead, RepositoryError};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[derive(Default)]
    struct MemoryRepository {
        leads: Mutex<Vec<Lead>>,
    }

    #[async_trait]
    impl LeadRepository for MemoryRepository {
        async fn record_lead(
            &self,
            lead: NewLead,
        ) -> Result<Lead, RepositoryError> {
            let mut leads = self.leads.lock().unwrap();
            let saved = Lead {
                id: leads.len() as i64 + 1,
                name: lead.name,
                email: lead.email,
                phone: lead.phone,
                quoted_total: lead.quoted_total,
                submitted_at: lead.submitted_at,
                created_at: lead.submitted_at,
            };
            leads.push(saved.clone());
            Ok(saved)
        }

        async fn get_lead(
            &self,
            id: i64,
        ) -> Result<Lead, RepositoryError> {
            self.leads
                .lock()
                .unwrap()
                .iter()
                .find(|lead| lead.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn list_leads(&self) -> Result<Vec<Lead>, RepositoryError> {
            Ok(self.leads.lock().unwrap().clone())
        }

        async fn delete_lead(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    struct OfflineRepository;

    #[async_trait]
    impl LeadRepository for OfflineRepository {
        async fn record_lead(
            &self,
            _lead: NewLead,
        ) -> Result<Lead, RepositoryError> {
            Err(RepositoryError::Connection("offline".to_string()))
        }

        async fn get_lead(
            &self,
            _id: i64,
        ) -> Result<Lead, RepositoryError> {
            Err(RepositoryError::Connection("offline".to_string()))
        }

        async fn list_leads(&self) -> Result<Vec<Lead>, RepositoryError> {
            Err(RepositoryError::Connection("offline".to_string()))
        }

        async fn delete_lead(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::Connection("offline".to_string()))
        }
    }

    struct StalledRepository;

    #[async_trait]
    impl LeadRepository for StalledRepository {
        async fn record_lead(
            &self,
            _lead: NewLead,
        ) -> Result<Lead, RepositoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(RepositoryError::Connection("timed out".to_string()))
        }

        async fn get_lead(
            &self,
            _id: i64,
        ) -> Result<Lead, RepositoryError> {
            Err(RepositoryError::NotFound)
        }

        async fn list_leads(&self) -> Result<Vec<Lead>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn delete_lead(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    fn lead() -> NewLead {
        NewLead {
            name: "Pham Thi D".to_string(),
            email: String::new(),
            phone: "0701234567".to_string(),
            quoted_total: Some(dec!(833280000)),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn submission_records_lead() {
        let repo = Arc::new(MemoryRepository::default());

        let finished = LeadSubmission::spawn(repo.clone(), lead())
            .settle(SUBMIT_GRACE)
            .await;

        assert!(finished);
        let stored = repo.list_leads().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].phone, "0701234567");
    }

    #[tokio::test]
    async fn failed_submission_is_not_propagated() {
        let finished = LeadSubmission::spawn(Arc::new(OfflineRepository), lead())
            .settle(SUBMIT_GRACE)
            .await;

        assert!(finished);
    }

    #[tokio::test]
    async fn stalled_submission_is_abandoned_after_grace() {
        let finished = LeadSubmission::spawn(Arc::new(StalledRepository), lead())
            .settle(Duration::from_millis(20))
            .await;

        assert!(!finished);
    }

    #[tokio::test]
    async fn unknown_backend_fails_in_background() {
        let config = DbConfig {
            backend: "postgres".to_string(),
            connection: "x".to_string(),
        };

        let finished = LeadSubmission::spawn_with_config(config, lead())
            .settle(SUBMIT_GRACE)
            .await;

        assert!(finished);
    }

    #[tokio::test]
    async fn configured_in_memory_store_accepts_lead() {
        let finished = LeadSubmission::spawn_with_config(DbConfig::in_memory(), lead())
            .settle(SUBMIT_GRACE)
            .await;

        assert!(finished);
    }
}
