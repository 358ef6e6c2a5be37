mod building_options;
mod catalog;
mod estimate_input;
mod estimate_result;
mod lead;
mod service_tier;

pub use building_options::{BasementType, FoundationType, RoofType};
pub use catalog::CatalogOption;
pub use estimate_input::EstimateInput;
pub use estimate_result::{ChartSlice, CostBreakdown, CostLineItem, EstimateResult, LineItemKind};
pub use lead::{CustomerInfo, DEFAULT_CUSTOMER_NAME, Lead, NewLead};
pub use service_tier::ServiceTier;
