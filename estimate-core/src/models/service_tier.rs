use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::CatalogOption;

/// Construction service package; determines the price per square metre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTier {
    /// Raw structure materials plus labour through finishing.
    #[default]
    RawAndFinish,
    /// Everything included, ready to move in.
    Turnkey,
}

impl ServiceTier {
    /// Price per square metre, in dong.
    pub fn unit_price(&self) -> Decimal {
        match self {
            Self::RawAndFinish => Decimal::from(3_200_000),
            Self::Turnkey => Decimal::from(5_500_000),
        }
    }
}

impl CatalogOption for ServiceTier {
    fn all() -> &'static [Self] {
        &[Self::RawAndFinish, Self::Turnkey]
    }

    fn code(&self) -> &'static str {
        match self {
            Self::RawAndFinish => "raw_and_finish",
            Self::Turnkey => "turnkey",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::RawAndFinish => "Raw structure + finishing labour (3.2M/m²)",
            Self::Turnkey => "Turnkey package (est. 5.5M/m²)",
        }
    }

    fn tooltip(&self) -> Option<&'static str> {
        Some(match self {
            Self::RawAndFinish => {
                "Includes raw materials (sand, stone, cement, steel...) and labour through finishing."
            }
            Self::Turnkey => "Everything from A to Z, just move in.",
        })
    }

    fn value(&self) -> Decimal {
        self.unit_price()
    }
}
