//! Command handlers behind the `construction-estimator` binary.
//!
//! Each handler writes its user-facing output to the given writer so the
//! binary can pass stdout and tests can pass a buffer.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use estimate_core::calculations::{compute, format_area, format_vnd};
use estimate_core::db::RepositoryRegistry;
use estimate_core::validation::validate_building;
use estimate_core::{
    BasementType, CatalogOption, EstimateRequest, FoundationType, QuoteSession, RoofType,
    ServiceTier,
};
use estimate_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::config::Settings;
use crate::csv_loader;
use crate::export::{default_export_path, export_or_notify};
use crate::leads::{LeadSubmission, SUBMIT_GRACE};
use crate::report::{QuoteReport, render_locked};
use crate::utils::opt_vnd_display;

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

// ─── options ─────────────────────────────────────────────────────────────────

fn write_catalog<T: CatalogOption>(
    out: &mut impl Write,
    title: &str,
) -> Result<()> {
    writeln!(out, "{title}")?;
    for option in T::all() {
        writeln!(
            out,
            "  {:<16}{:>10}  {}",
            option.code(),
            option.value(),
            option.label()
        )?;
        if let Some(tooltip) = option.tooltip() {
            writeln!(out, "  {:<28}{}", "", tooltip)?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Prints every pricing catalog with its codes.
pub fn print_options(out: &mut impl Write) -> Result<()> {
    write_catalog::<ServiceTier>(out, "Service (--service), price per m²")?;
    write_catalog::<FoundationType>(out, "Foundation (--foundation), share of floor area")?;
    write_catalog::<RoofType>(out, "Roof (--roof), share of floor area")?;
    write_catalog::<BasementType>(out, "Basement (--basement), share of floor area")?;
    Ok(())
}

// ─── quote ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct QuoteOptions {
    pub request: EstimateRequest,
    pub unlock: bool,
    /// Export path; `Quote_<phone>.txt` when not given.
    pub export: Option<PathBuf>,
    pub json: bool,
}

/// Validates and prices a request, then prints the locked teaser or, when
/// unlocking, records the lead and prints and exports the full quote.
///
/// # Errors
///
/// A rejected request. Lead recording and export failures are reported
/// without failing the command.
pub async fn run_quote(
    settings: &Settings,
    options: QuoteOptions,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = QuoteSession::new();
    session
        .calculate(&options.request)
        .context("Quote request rejected")?;

    if !options.unlock {
        if let Some(result) = session.pending_result() {
            write!(out, "{}", render_locked(result))?;
        }
        return Ok(());
    }

    let lead = session.unlock(Utc::now())?;
    let submission = LeadSubmission::spawn_with_config(settings.database.clone(), lead);

    let result = session
        .visible_result()
        .context("Unlocked quote has no result")?;
    let report = QuoteReport {
        company: &settings.company,
        customer: session.customer(),
        result,
        date: chrono::Local::now().date_naive(),
    }
    .render();

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        write!(out, "{report}")?;
        writeln!(out)?;
    }

    let path = options
        .export
        .unwrap_or_else(|| default_export_path(&session.customer().phone));
    writeln!(out, "{}", export_or_notify(&path, &report))?;

    if !submission.settle(SUBMIT_GRACE).await {
        debug!("continuing without waiting for the lead submission");
    }
    Ok(())
}

// ─── batch ───────────────────────────────────────────────────────────────────

/// Prices every row of a CSV file, one summary line per row. Rows that fail
/// validation are reported and skipped.
pub fn run_batch(
    file: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let inputs = csv_loader::load_from_file(file)
        .with_context(|| format!("Failed to load estimates from '{}'", file.display()))?;
    info!(rows = inputs.len(), file = %file.display(), "loaded batch");

    let mut priced = 0;
    for (idx, input) in inputs.iter().enumerate() {
        let row = idx + 1;
        if let Err(error) = validate_building(input) {
            writeln!(out, "{row:>4}  skipped: {error}")?;
            continue;
        }

        let result = compute(input);
        priced += 1;
        writeln!(
            out,
            "{row:>4}  {:<16}{:>12} x {:<3}{:<16}{:<16}{:<13}{:>20}",
            input.service.code(),
            format_area(input.floor_area),
            input.floors,
            input.foundation.code(),
            input.roof.code(),
            input.basement.code(),
            format_vnd(result.total_cost)
        )?;
    }
    writeln!(out, "{priced} of {} rows priced", inputs.len())?;
    Ok(())
}

// ─── leads ───────────────────────────────────────────────────────────────────

/// Lists recorded leads, newest first.
pub async fn run_leads(
    settings: &Settings,
    out: &mut impl Write,
) -> Result<()> {
    let repo = build_registry()
        .create(&settings.database)
        .await
        .with_context(|| format!("Failed to open lead store '{}'", settings.database.connection))?;
    let leads = repo.list_leads().await.context("Failed to list leads")?;

    if leads.is_empty() {
        writeln!(out, "No leads recorded yet.")?;
        return Ok(());
    }

    for lead in &leads {
        writeln!(
            out,
            "{:>5}  {}  {:<12}{:<28}{:<28}{:>20}",
            lead.id,
            lead.submitted_at.format("%Y-%m-%d %H:%M"),
            lead.phone,
            lead.name,
            lead.email,
            opt_vnd_display(lead.quoted_total)
        )?;
    }
    writeln!(out, "{} lead(s)", leads.len())?;
    Ok(())
}
