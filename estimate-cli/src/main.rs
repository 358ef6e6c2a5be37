use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use estimate_cli::app::{self, QuoteOptions};
use estimate_cli::config::Settings;
use estimate_cli::logging;
use estimate_cli::utils::{catalog_arg, parse_decimal};
use estimate_core::{
    BasementType, CustomerInfo, EstimateInput, EstimateRequest, FoundationType, RoofType,
    ServiceTier,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Construction cost estimator.
///
/// Prices a house from its floor area, floor count and structural options,
/// and reveals the itemized quote once a contact phone number is given.
#[derive(Debug, Parser)]
#[command(name = "construction-estimator", version, about)]
struct Cli {
    /// Settings file (defaults to `estimator.toml` when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lead storage backend.
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Lead storage connection: a SQLite file path or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Hide log output on the console.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log level or filter directive, e.g. `debug` or `info,estimate_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every service, foundation, roof and basement option.
    Options,
    /// Price a house and, with --unlock, reveal and save the quote.
    Quote(QuoteArgs),
    /// Price every row of a CSV file.
    Batch {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// List recorded leads, newest first.
    Leads,
}

#[derive(Debug, Args)]
struct QuoteArgs {
    #[arg(long, default_value = "raw_and_finish", value_parser = catalog_arg::<ServiceTier>)]
    service: ServiceTier,

    /// Floor area of one floor, in m².
    #[arg(long, default_value = "80", value_parser = parse_decimal)]
    area: Decimal,

    #[arg(long, default_value_t = 2)]
    floors: u32,

    #[arg(long, default_value = "strip", value_parser = catalog_arg::<FoundationType>)]
    foundation: FoundationType,

    #[arg(long, default_value = "concrete", value_parser = catalog_arg::<RoofType>)]
    roof: RoofType,

    #[arg(long, default_value = "none", value_parser = catalog_arg::<BasementType>)]
    basement: BasementType,

    /// Leave out the 5% contingency buffer.
    #[arg(long)]
    no_contingency: bool,

    /// Add an attic (50% of floor area).
    #[arg(long)]
    attic: bool,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    /// Mobile number, required to see the quote.
    #[arg(long, default_value = "")]
    phone: String,

    /// Reveal the amounts, record the lead and save the quote file.
    #[arg(long)]
    unlock: bool,

    /// Where to save the quote (default `Quote_<phone>.txt`).
    #[arg(long, requires = "unlock")]
    export: Option<PathBuf>,

    /// Print the result as JSON instead of the text report.
    #[arg(long, requires = "unlock")]
    json: bool,
}

impl From<QuoteArgs> for QuoteOptions {
    fn from(args: QuoteArgs) -> Self {
        let input = EstimateInput {
            service: args.service,
            floor_area: args.area,
            floors: args.floors,
            foundation: args.foundation,
            roof: args.roof,
            basement: args.basement,
            has_contingency: !args.no_contingency,
            has_attic: args.attic,
        };
        let customer = CustomerInfo {
            name: args.name,
            email: args.email,
            phone: args.phone,
        };

        Self {
            request: EstimateRequest::new(input, customer),
            unlock: args.unlock,
            export: args.export,
            json: args.json,
        }
    }
}

// ─── settings ────────────────────────────────────────────────────────────────

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(backend) = &cli.backend {
        settings.database.backend = backend.clone();
    }
    if let Some(db) = &cli.db {
        settings.database.connection = db.clone();
    }
    Ok(settings)
}

fn init_logging(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    let log = logging::init_logging(&settings.logging).context("Failed to start logging")?;
    if let Some(level) = &cli.log_level {
        log.set_level(level)?;
    }
    if cli.quiet {
        log.set_console_enabled(false)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    init_logging(&cli, &settings)?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %settings.database.backend,
        "starting"
    );

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Options => app::print_options(&mut out),
        Command::Quote(args) => app::run_quote(&settings, args.into(), &mut out).await,
        Command::Batch { file } => app::run_batch(&file, &mut out),
        Command::Leads => app::run_leads(&settings, &mut out).await,
    }
}
