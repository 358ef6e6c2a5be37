//! The lock-until-unlocked quote flow.
//!
//! A [`QuoteSession`] owns the current result slot. Calculating always
//! replaces whatever was there (last write wins) and leaves the new result
//! locked; unlocking reveals it and hands back the lead to record. Any input
//! change discards the result so a stale quote is never shown.
//!
//! ```text
//!              calculate (valid)            unlock
//! AwaitingInput ───────────────► ResultLocked ──────► Revealed
//!      ▲                              │                  │  ▲
//!      └──── input_changed / ─────────┴──────────────────┘  │ unlock (retry)
//!            calculate (invalid)                         └──┘
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::calculations::compute;
use crate::models::{CustomerInfo, EstimateResult, NewLead};
use crate::validation::{EstimateRequest, ValidationError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Unlock was requested before any result was calculated.
    #[error("there is no calculated quote to unlock")]
    NothingToUnlock,
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState<'a> {
    AwaitingInput,
    /// A result exists but its details are hidden.
    ResultLocked(&'a EstimateResult),
    /// The customer unlocked the result.
    Revealed(&'a EstimateResult),
}

impl QuoteState<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingInput => "awaiting_input",
            Self::ResultLocked(_) => "result_locked",
            Self::Revealed(_) => "revealed",
        }
    }
}

/// Explicit application state for one customer's quote.
#[derive(Debug, Clone, Default)]
pub struct QuoteSession {
    result: Option<EstimateResult>,
    revealed: bool,
    customer: CustomerInfo,
}

impl QuoteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuoteState<'_> {
        match (&self.result, self.revealed) {
            (None, _) => QuoteState::AwaitingInput,
            (Some(result), false) => QuoteState::ResultLocked(result),
            (Some(result), true) => QuoteState::Revealed(result),
        }
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state(), QuoteState::ResultLocked(_))
    }

    /// Validates the request and, when it passes, computes a fresh locked
    /// result. A rejected request clears any earlier result.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`EstimateRequest::validate`].
    pub fn calculate(
        &mut self,
        request: &EstimateRequest,
    ) -> Result<&EstimateResult, ValidationError> {
        self.customer = request.customer.clone();
        let input = match request.validate() {
            Ok(input) => input,
            Err(error) => {
                self.clear();
                return Err(error);
            }
        };

        let result = compute(&input);
        self.log_transition("result_locked");
        self.revealed = false;
        Ok(self.result.insert(result))
    }

    /// Discards the current result after the user edits any input.
    pub fn input_changed(&mut self) {
        if self.result.is_some() {
            self.clear();
        }
    }

    /// Reveals the current result and returns the lead to record.
    ///
    /// Unlocking an already revealed result is allowed so that a failed
    /// export can be retried; each call yields a fresh lead.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NothingToUnlock`] when no result has been calculated.
    pub fn unlock(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<NewLead, WorkflowError> {
        let from = self.state().name();
        let Some(result) = &self.result else {
            return Err(WorkflowError::NothingToUnlock);
        };

        let lead = NewLead::from_customer(&self.customer, Some(result.total_cost), now);
        info!(from, to = "revealed", phone = %lead.phone, "quote unlocked");
        self.revealed = true;
        Ok(lead)
    }

    /// The result, only once it has been unlocked.
    pub fn visible_result(&self) -> Option<&EstimateResult> {
        match self.state() {
            QuoteState::Revealed(result) => Some(result),
            _ => None,
        }
    }

    /// The result whether locked or revealed.
    pub fn pending_result(&self) -> Option<&EstimateResult> {
        self.result.as_ref()
    }

    fn clear(&mut self) {
        self.log_transition("awaiting_input");
        self.result = None;
        self.revealed = false;
    }

    fn log_transition(
        &self,
        to: &'static str,
    ) {
        info!(from = self.state().name(), to, "quote state changed");
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::EstimateInput;

    fn valid_request() -> EstimateRequest {
        EstimateRequest {
            input: EstimateInput::default(),
            customer: CustomerInfo {
                name: "Tran Thi B".to_string(),
                email: "b@example.com".to_string(),
                phone: "0901234567".to_string(),
            },
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn new_session_awaits_input() {
        let session = QuoteSession::new();

        assert_eq!(session.state(), QuoteState::AwaitingInput);
        assert_eq!(session.pending_result(), None);
        assert_eq!(session.visible_result(), None);
    }

    #[test]
    fn calculate_locks_the_result() {
        let mut session = QuoteSession::new();

        let total = session.calculate(&valid_request()).unwrap().total_cost;

        assert_eq!(total, dec!(833280000));
        assert!(session.is_locked());
        assert_eq!(session.visible_result(), None);
        assert!(session.pending_result().is_some());
    }

    #[test]
    fn calculate_returns_the_stored_locked_result() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();
        session.unlock(at()).unwrap();

        let returned = session.calculate(&valid_request()).unwrap().clone();

        assert_eq!(session.state(), QuoteState::ResultLocked(&returned));
        assert_eq!(session.pending_result(), Some(&returned));
    }

    #[test]
    fn unlock_reveals_and_returns_lead() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();

        let lead = session.unlock(at()).unwrap();

        assert_eq!(lead.name, "Tran Thi B");
        assert_eq!(lead.phone, "0901234567");
        assert_eq!(lead.quoted_total, Some(dec!(833280000)));
        assert_eq!(lead.submitted_at, at());
        assert_eq!(session.state().name(), "revealed");
        assert_eq!(
            session.visible_result().map(|r| r.total_cost),
            Some(dec!(833280000))
        );
    }

    #[test]
    fn unlock_without_result_fails() {
        let mut session = QuoteSession::new();

        assert_eq!(session.unlock(at()), Err(WorkflowError::NothingToUnlock));
        assert_eq!(session.state(), QuoteState::AwaitingInput);
    }

    #[test]
    fn unlock_can_be_retried_after_reveal() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();
        session.unlock(at()).unwrap();

        let again = session.unlock(at()).unwrap();

        assert_eq!(again.quoted_total, Some(dec!(833280000)));
        assert!(session.visible_result().is_some());
    }

    #[test]
    fn input_change_discards_result() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();
        session.unlock(at()).unwrap();

        session.input_changed();

        assert_eq!(session.state(), QuoteState::AwaitingInput);
        assert_eq!(session.pending_result(), None);
    }

    #[test]
    fn invalid_request_clears_previous_result() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();
        let mut request = valid_request();
        request.customer.phone = "12345".to_string();

        let result = session.calculate(&request).map(|r| r.total_cost);

        assert_eq!(result, Err(ValidationError::InvalidPhone));
        assert_eq!(session.state(), QuoteState::AwaitingInput);
    }

    #[test]
    fn recalculating_relocks_with_new_result() {
        let mut session = QuoteSession::new();
        session.calculate(&valid_request()).unwrap();
        session.unlock(at()).unwrap();
        let mut request = valid_request();
        request.input.has_attic = true;

        session.calculate(&request).unwrap();

        assert!(session.is_locked());
        assert_eq!(
            session.pending_result().map(|r| r.total_cost),
            Some(dec!(967680000))
        );
    }

    #[test]
    fn blank_customer_name_is_recorded_as_placeholder() {
        let mut session = QuoteSession::new();
        let mut request = valid_request();
        request.customer.name = String::new();
        session.calculate(&request).unwrap();

        let lead = session.unlock(at()).unwrap();

        assert_eq!(lead.name, "Customer");
    }
}
