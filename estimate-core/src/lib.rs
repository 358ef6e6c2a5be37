pub mod calculations;
pub mod db;
pub mod models;
pub mod validation;
pub mod workflow;

pub use db::repository::{LeadRepository, RepositoryError};
pub use models::*;
pub use validation::{EstimateRequest, ValidationError};
pub use workflow::{QuoteSession, QuoteState, WorkflowError};
