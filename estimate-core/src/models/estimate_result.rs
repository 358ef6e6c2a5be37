use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Which structural element a line item prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Foundation,
    Basement,
    Body,
    Attic,
    Roof,
    Contingency,
}

/// One row of the itemized quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub kind: LineItemKind,
    /// Display label, including the coefficient percentage or floor count.
    pub name: String,
    /// Priced area in square metres; zero for items that are not area based.
    pub area: Decimal,
    /// Price per square metre; zero when not applicable.
    pub unit_price: Decimal,
    pub total: Decimal,
    pub note: Option<String>,
    /// Rendering hint for a distinguished row such as the contingency buffer.
    pub is_highlight: bool,
}

/// Cost grouped into the five fixed summary buckets.
///
/// The attic is folded into `body`; it only appears on its own as a line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub foundation: Decimal,
    pub body: Decimal,
    pub roof: Decimal,
    pub basement: Decimal,
    pub contingency: Decimal,
}

/// A labelled wedge of the summary chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: Decimal,
    /// Share of the total, in percent, rounded to one decimal place.
    pub share_percent: Decimal,
}

impl CostBreakdown {
    pub fn total(&self) -> Decimal {
        self.foundation + self.body + self.roof + self.basement + self.contingency
    }

    /// Slices for the summary chart. Foundation, body and roof are always
    /// present; basement and contingency only when they carry a cost.
    pub fn chart_slices(&self) -> Vec<ChartSlice> {
        let total = self.total();
        let slice = |label, value: Decimal| ChartSlice {
            label,
            value,
            share_percent: share_of(value, total),
        };

        let mut slices = vec![
            slice("Foundation", self.foundation),
            slice("Body", self.body),
            slice("Roof", self.roof),
        ];
        if self.basement > Decimal::ZERO {
            slices.push(slice("Basement", self.basement));
        }
        if self.contingency > Decimal::ZERO {
            slices.push(slice("Contingency", self.contingency));
        }
        slices
    }
}

fn share_of(
    value: Decimal,
    total: Decimal,
) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (value * Decimal::ONE_HUNDRED / total)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Output of the estimate calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Line items in display order.
    pub items: Vec<CostLineItem>,
    pub total_cost: Decimal,
    pub breakdown: CostBreakdown,
}

impl EstimateResult {
    pub fn item(&self, kind: LineItemKind) -> Option<&CostLineItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn kinds(&self) -> Vec<LineItemKind> {
        self.items.iter().map(|item| item.kind).collect()
    }
}
