//! Structural option catalogs: foundation, roof and basement techniques.
//!
//! Each option carries an area coefficient: the share of the floor area that
//! is priced at the full service rate for that structural element.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::CatalogOption;

/// Foundation technique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundationType {
    #[default]
    Strip,
    Isolated,
    Pile,
    Raft,
}

impl FoundationType {
    pub fn coefficient(&self) -> Decimal {
        match self {
            Self::Strip => Decimal::new(6, 1),
            Self::Isolated => Decimal::new(3, 1),
            Self::Pile => Decimal::new(4, 1),
            Self::Raft => Decimal::ONE,
        }
    }
}

impl CatalogOption for FoundationType {
    fn all() -> &'static [Self] {
        &[Self::Strip, Self::Isolated, Self::Pile, Self::Raft]
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Isolated => "isolated",
            Self::Pile => "pile",
            Self::Raft => "raft",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Strip => "Strip footing (60%)",
            Self::Isolated => "Isolated footing (30%)",
            Self::Pile => "Pile foundation (40%)",
            Self::Raft => "Raft foundation (100%)",
        }
    }

    fn tooltip(&self) -> Option<&'static str> {
        Some(match self {
            Self::Strip => "Common choice for good soil.",
            Self::Isolated => "Economical; for very good soil and small houses.",
            Self::Pile => "For weak soil; pile driving is not included.",
            Self::Raft => "For very weak soil.",
        })
    }

    fn value(&self) -> Decimal {
        self.coefficient()
    }
}

/// Roofing technique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    #[default]
    Concrete,
    MetalSheet,
    TileOnSteel,
    TiledConcrete,
}

impl RoofType {
    pub fn coefficient(&self) -> Decimal {
        match self {
            Self::Concrete => Decimal::new(5, 1),
            Self::MetalSheet => Decimal::new(3, 1),
            Self::TileOnSteel => Decimal::new(7, 1),
            Self::TiledConcrete => Decimal::ONE,
        }
    }
}

impl CatalogOption for RoofType {
    fn all() -> &'static [Self] {
        &[
            Self::Concrete,
            Self::MetalSheet,
            Self::TileOnSteel,
            Self::TiledConcrete,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::MetalSheet => "metal_sheet",
            Self::TileOnSteel => "tile_on_steel",
            Self::TiledConcrete => "tiled_concrete",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Concrete => "Reinforced concrete, tiled deck (50%)",
            Self::MetalSheet => "Metal sheet (30%)",
            Self::TileOnSteel => "Tile on steel trusses (70%)",
            Self::TiledConcrete => "Reinforced concrete with tile cladding (100%)",
        }
    }

    fn tooltip(&self) -> Option<&'static str> {
        Some(match self {
            Self::Concrete => "Most durable, best waterproofing.",
            Self::MetalSheet => "Lowest cost.",
            Self::TileOnSteel => "Attractive and cool.",
            Self::TiledConcrete => "Most solid and most attractive.",
        })
    }

    fn value(&self) -> Decimal {
        self.coefficient()
    }
}

/// Basement depth. `None` contributes nothing to the estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasementType {
    #[default]
    None,
    HalfSunken,
    Full,
}

impl BasementType {
    pub fn coefficient(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::HalfSunken => Decimal::new(15, 1),
            Self::Full => Decimal::TWO,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl CatalogOption for BasementType {
    fn all() -> &'static [Self] {
        &[Self::None, Self::HalfSunken, Self::Full]
    }

    fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HalfSunken => "half_sunken",
            Self::Full => "full",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::None => "No basement",
            Self::HalfSunken => "Half-sunken basement (150%)",
            Self::Full => "Fully sunken basement (200%)",
        }
    }

    fn value(&self) -> Decimal {
        self.coefficient()
    }
}
