//! Log output for the estimator binary.
//!
//! Events go to stderr, coloured on a terminal, and optionally to an append-only
//! log file. The report itself owns stdout. [`init_logging`] hands back a
//! [`LogControl`] for the switches that change after startup: the filter
//! directive and whether the console shows anything at all.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::{
    EnvFilter,
    Layer, // for .with_filter() on the console layer
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingSettings;

/// `2025-06-15 08:00:00.123  INFO estimate_core::workflow: quote unlocked from="result_locked"`
struct LocalFmt;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}:\x1b[0m ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SetLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type SetConsoleFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

/// Runtime switches for the installed subscriber.
pub struct LogControl {
    set_level: SetLevelFn,
    set_console: SetConsoleFn,
}

impl LogControl {
    /// Replaces the global filter. Accepts a bare level (`debug`) or any
    /// `EnvFilter` directive (`info,estimate_core=trace`).
    pub fn set_level(
        &self,
        directive: &str,
    ) -> Result<()> {
        (self.set_level)(directive)
    }

    /// Shows or hides console output. The log file is unaffected.
    pub fn set_console_enabled(
        &self,
        enabled: bool,
    ) -> Result<()> {
        (self.set_console)(enabled)
    }
}

/// `RUST_LOG` wins over the configured level.
fn base_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level '{default_level}'")),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails when the configured level is not a valid directive, the log file
/// cannot be opened, or a subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<LogControl> {
    let (level_filter, level_handle) = reload::Layer::new(base_filter(&settings.level)?);
    // Starts open; the global filter above is still the ceiling.
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = match &settings.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global logger is already installed")?;

    Ok(LogControl {
        set_level: Box::new(move |directive: &str| {
            let filter = EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log level '{directive}'"))?;
            level_handle
                .reload(filter)
                .context("log filter reload failed")
        }),
        set_console: Box::new(move |enabled: bool| {
            let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
            console_handle
                .reload(gate)
                .context("console filter reload failed")
        }),
    })
}

/// Logs a background task failure with its full error chain.
pub fn log_task_error(
    task_name: &'static str,
    result: Result<()>,
) {
    if let Err(error) = result {
        error!(task = task_name, error = format!("{error:#}"), "background task failed");
    }
}
