use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BasementType, FoundationType, RoofType, ServiceTier};

/// Validated building parameters for a single calculation.
///
/// Construct one through [`crate::EstimateRequest::validate`] when the
/// values come from user input; the calculator assumes a positive floor area
/// and at least one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub service: ServiceTier,
    /// Footprint of one floor, in square metres.
    pub floor_area: Decimal,
    pub floors: u32,
    pub foundation: FoundationType,
    pub roof: RoofType,
    pub basement: BasementType,
    pub has_contingency: bool,
    pub has_attic: bool,
}

impl EstimateInput {
    pub fn unit_price(&self) -> Decimal {
        self.service.unit_price()
    }
}

impl Default for EstimateInput {
    /// The values the quote form opens with.
    fn default() -> Self {
        Self {
            service: ServiceTier::RawAndFinish,
            floor_area: Decimal::from(80),
            floors: 2,
            foundation: FoundationType::Strip,
            roof: RoofType::Concrete,
            basement: BasementType::None,
            has_contingency: true,
            has_attic: false,
        }
    }
}
