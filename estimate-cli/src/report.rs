//! Plain-text rendering of a quote.
//!
//! The locked view lists what was priced without any amount; the full view
//! is the printable quote that is also written to the export file.

use std::fmt::Write;

use chrono::NaiveDate;
use estimate_core::calculations::{format_area, format_vnd};
use estimate_core::{CostLineItem, CustomerInfo, EstimateResult};
use rust_decimal::Decimal;

use crate::config::CompanyInfo;

const RULE_WIDTH: usize = 92;
const MASK: &str = "***.***.*** ₫";

const DISCLAIMER: &str = "Note: unit prices are indicative at the time of quoting. The actual \
cost depends on the site location, timing and the materials agreed in the contract.";

pub struct QuoteReport<'a> {
    pub company: &'a CompanyInfo,
    pub customer: &'a CustomerInfo,
    pub result: &'a EstimateResult,
    pub date: NaiveDate,
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn or_dash(
    value: Decimal,
    format: fn(Decimal) -> String,
) -> String {
    if value.is_zero() {
        "—".to_string()
    } else {
        format(value)
    }
}

fn item_name(item: &CostLineItem) -> String {
    if item.is_highlight {
        format!("* {}", item.name)
    } else {
        format!("  {}", item.name)
    }
}

/// Teaser shown before the customer unlocks the quote.
pub fn render_locked(result: &EstimateResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "YOUR ESTIMATE IS READY");
    let _ = writeln!(out, "The detailed estimate for your house has been calculated.");
    rule(&mut out);
    for item in &result.items {
        let _ = writeln!(out, "{:<44}{:>20}", item_name(item), MASK);
    }
    rule(&mut out);
    let _ = writeln!(out, "{:<44}{:>20}", "  TOTAL", MASK);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Run again with --unlock to reveal the amounts and save the quote."
    );
    out
}

impl QuoteReport<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.header(&mut out);
        self.customer_block(&mut out);
        self.table(&mut out);
        self.chart(&mut out);
        let _ = writeln!(out);
        let _ = writeln!(out, "{DISCLAIMER}");
        out
    }

    fn header(
        &self,
        out: &mut String,
    ) {
        let company = self.company;
        let _ = writeln!(out, "{}", company.name.to_uppercase());
        let _ = writeln!(out, "Hotline: {}", company.hotline);
        let _ = writeln!(out, "Email:   {}", company.email);
        let _ = writeln!(out, "Website: {}", company.website);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<60}{:>32}",
            "CONSTRUCTION ESTIMATE",
            format!("Date: {}", self.date.format("%d/%m/%Y"))
        );
        rule(out);
    }

    fn customer_block(
        &self,
        out: &mut String,
    ) {
        let customer = self.customer;
        let _ = writeln!(out, "Customer: {}", customer.display_name());
        let _ = writeln!(out, "Phone:    {}", customer.phone.trim());
        if !customer.email.trim().is_empty() {
            let _ = writeln!(out, "Email:    {}", customer.email.trim());
        }
        let _ = writeln!(out);
    }

    fn table(
        &self,
        out: &mut String,
    ) {
        let _ = writeln!(
            out,
            "{:<44}{:>12}{:>16}{:>20}",
            "  Item", "Area", "Unit price", "Amount"
        );
        rule(out);
        for item in &self.result.items {
            let _ = writeln!(
                out,
                "{:<44}{:>12}{:>16}{:>20}",
                item_name(item),
                or_dash(item.area, format_area),
                or_dash(item.unit_price, format_vnd),
                format_vnd(item.total)
            );
            if let Some(note) = &item.note {
                let _ = writeln!(out, "      {note}");
            }
        }
        rule(out);
        let _ = writeln!(
            out,
            "{:<72}{:>20}",
            "  TOTAL ESTIMATED COST",
            format_vnd(self.result.total_cost)
        );
    }

    fn chart(
        &self,
        out: &mut String,
    ) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Budget allocation");
        for slice in self.result.breakdown.chart_slices() {
            let _ = writeln!(
                out,
                "  {:<14}{:>20}{:>8.1}%",
                slice.label,
                format_vnd(slice.value),
                slice.share_percent
            );
        }
    }
}
