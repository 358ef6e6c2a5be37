//! The construction cost estimate.
//!
//! Every structural element is priced as an equivalent floor area multiplied
//! by the service unit price. Foundation, basement, attic and roof are one-off
//! elements sized by a coefficient of a single floor; the body repeats per
//! floor.
//!
//! # Calculation Steps
//!
//! | Step | Element     | Area                          | Cost                   |
//! |------|-------------|-------------------------------|------------------------|
//! | 1    | Foundation  | floor area × foundation coeff | area × unit price      |
//! | 2    | Basement    | floor area × basement coeff   | area × unit price      |
//! | 3    | Body        | floor area × floors           | area × unit price      |
//! | 4    | Attic       | floor area × 50% (if chosen)  | area × unit price      |
//! | 5    | Roof        | floor area × roof coeff       | area × unit price      |
//! | 6    | Subtotal    |                               | sum of steps 1-5       |
//! | 7    | Contingency |                               | subtotal × 5% (if chosen) |
//!
//! # Line Item Order
//!
//! Foundation, basement (only when it costs something), body, attic (only
//! when chosen), roof, contingency (only when chosen, always last).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::calculations::compute;
//! use estimate_core::{BasementType, EstimateInput, FoundationType, RoofType, ServiceTier};
//!
//! let input = EstimateInput {
//!     service: ServiceTier::RawAndFinish,
//!     floor_area: dec!(80),
//!     floors: 2,
//!     foundation: FoundationType::Strip,
//!     roof: RoofType::Concrete,
//!     basement: BasementType::None,
//!     has_contingency: true,
//!     has_attic: false,
//! };
//!
//! let result = compute(&input);
//!
//! assert_eq!(result.breakdown.contingency, dec!(39680000));
//! assert_eq!(result.total_cost, dec!(833280000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::whole_percent;
use crate::models::{CostBreakdown, CostLineItem, EstimateInput, EstimateResult, LineItemKind};

/// Share of the floor area priced for an attic.
pub const ATTIC_COEFFICIENT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Contingency buffer applied to the pre-contingency subtotal.
pub const CONTINGENCY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Area and cost of one priced element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Priced {
    area: Decimal,
    cost: Decimal,
}

impl Priced {
    const NONE: Self = Self {
        area: Decimal::ZERO,
        cost: Decimal::ZERO,
    };

    fn at(
        area: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            area,
            cost: area * unit_price,
        }
    }
}

/// Computes the itemized estimate for a validated input.
///
/// Total and deterministic: the same input always yields the same result,
/// and there are no failure modes. Input constraints (positive area, at
/// least one floor) are the caller's responsibility.
///
/// ```
/// use estimate_core::EstimateInput;
/// use estimate_core::calculations::compute;
/// use rust_decimal::Decimal;
///
/// let result = compute(&EstimateInput::default());
/// assert_eq!(result.total_cost, Decimal::from(833_280_000));
/// ```
pub fn compute(input: &EstimateInput) -> EstimateResult {
    let unit_price = input.unit_price();

    let foundation = price_foundation(input, unit_price);
    let basement = price_basement(input, unit_price);
    let body = price_body(input, unit_price);
    let attic = price_attic(input, unit_price);
    let roof = price_roof(input, unit_price);

    let subtotal = foundation.cost + basement.cost + body.cost + roof.cost + attic.cost;
    let contingency = contingency_for(input, subtotal);
    let total_cost = subtotal + contingency;

    debug!(
        %subtotal,
        %contingency,
        %total_cost,
        floors = input.floors,
        "computed construction estimate"
    );

    let mut items = vec![area_item(
        LineItemKind::Foundation,
        format!(
            "Foundation ({}% of floor area)",
            whole_percent(input.foundation.coefficient())
        ),
        foundation,
        unit_price,
    )];

    if basement.cost > Decimal::ZERO {
        items.push(area_item(
            LineItemKind::Basement,
            format!(
                "Basement ({}% of floor area)",
                whole_percent(input.basement.coefficient())
            ),
            basement,
            unit_price,
        ));
    }

    items.push(area_item(
        LineItemKind::Body,
        body_label(input.floors),
        body,
        unit_price,
    ));

    if input.has_attic {
        items.push(area_item(
            LineItemKind::Attic,
            format!(
                "Attic ({}% of floor area)",
                whole_percent(ATTIC_COEFFICIENT)
            ),
            attic,
            unit_price,
        ));
    }

    items.push(area_item(
        LineItemKind::Roof,
        format!(
            "Roof ({}% of floor area)",
            whole_percent(input.roof.coefficient())
        ),
        roof,
        unit_price,
    ));

    if input.has_contingency {
        let percent = whole_percent(CONTINGENCY_RATE);
        items.push(CostLineItem {
            kind: LineItemKind::Contingency,
            name: format!("Contingency ({percent}%)"),
            area: Decimal::ZERO,
            unit_price: Decimal::ZERO,
            total: contingency,
            note: Some(format!("{percent}% of total")),
            is_highlight: true,
        });
    }

    EstimateResult {
        items,
        total_cost,
        breakdown: CostBreakdown {
            foundation: foundation.cost,
            body: body.cost + attic.cost,
            roof: roof.cost,
            basement: basement.cost,
            contingency,
        },
    }
}

fn price_foundation(
    input: &EstimateInput,
    unit_price: Decimal,
) -> Priced {
    Priced::at(input.floor_area * input.foundation.coefficient(), unit_price)
}

fn price_basement(
    input: &EstimateInput,
    unit_price: Decimal,
) -> Priced {
    Priced::at(input.floor_area * input.basement.coefficient(), unit_price)
}

/// The only element that scales with the number of floors.
fn price_body(
    input: &EstimateInput,
    unit_price: Decimal,
) -> Priced {
    Priced::at(input.floor_area * Decimal::from(input.floors), unit_price)
}

fn price_attic(
    input: &EstimateInput,
    unit_price: Decimal,
) -> Priced {
    if !input.has_attic {
        return Priced::NONE;
    }
    Priced::at(input.floor_area * ATTIC_COEFFICIENT, unit_price)
}

fn price_roof(
    input: &EstimateInput,
    unit_price: Decimal,
) -> Priced {
    Priced::at(input.floor_area * input.roof.coefficient(), unit_price)
}

/// Computed once on the finished subtotal; never compounded.
fn contingency_for(
    input: &EstimateInput,
    subtotal: Decimal,
) -> Decimal {
    if input.has_contingency {
        subtotal * CONTINGENCY_RATE
    } else {
        Decimal::ZERO
    }
}

fn body_label(floors: u32) -> String {
    if floors == 1 {
        "Body (1 floor)".to_string()
    } else {
        format!("Body ({floors} floors)")
    }
}

fn area_item(
    kind: LineItemKind,
    name: String,
    priced: Priced,
    unit_price: Decimal,
) -> CostLineItem {
    CostLineItem {
        kind,
        name,
        area: priced.area,
        unit_price,
        total: priced.cost,
        note: None,
        is_highlight: false,
    }
}
