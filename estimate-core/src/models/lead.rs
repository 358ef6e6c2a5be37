use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name recorded when the customer leaves the name field blank.
pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";

/// Contact fields typed into the quote form, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInfo {
    /// The name to print or record, falling back to a generic placeholder.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            DEFAULT_CUSTOMER_NAME
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Grand total of the quote that was unlocked, when known.
    pub quoted_total: Option<Decimal>,
    /// When the customer unlocked the quote.
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// For recording new leads (no id or storage timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub quoted_total: Option<Decimal>,
    pub submitted_at: DateTime<Utc>,
}

impl NewLead {
    pub fn from_customer(
        customer: &CustomerInfo,
        quoted_total: Option<Decimal>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: customer.display_name().to_string(),
            email: customer.email.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            quoted_total,
            submitted_at,
        }
    }
}
