use std::io::{self, IsTerminal};

use anyhow::Result;
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Default filter when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

// --- Formatter ---

/// One line per event: local timestamp, level, `file:line`, then fields.
///
/// ANSI colour is applied only when the writer supports it.
pub struct LocalFmt;

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
        let paint = Painter(writer.has_ansi_escapes());

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f%:z");
        paint.write(&mut writer, DIM, format_args!("{timestamp}"))?;
        write!(writer, " ")?;

        let level = meta.level();
        paint.write(&mut writer, level_colour(*level), format_args!("{level:>5}"))?;
        write!(writer, " ")?;

        if let (Some(file), Some(line)) = (meta.file().map(short_path), meta.line()) {
            paint.write(&mut writer, CYAN, format_args!("{file}:{line}"))?;
            write!(writer, " ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Wraps text in an ANSI colour when enabled.
#[derive(Clone, Copy)]
struct Painter(bool);

impl Painter {
    fn write(
        self,
        writer: &mut Writer<'_>,
        colour: &str,
        text: std::fmt::Arguments<'_>,
    ) -> std::fmt::Result {
        if self.0 {
            write!(writer, "{colour}{text}{RESET}")
        } else {
            write!(writer, "{text}")
        }
    }
}

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Drops everything up to and including the crate's `src/` directory.
fn short_path(file: &str) -> &str {
    file.rsplit_once("src/")
        .or_else(|| file.rsplit_once("src\\"))
        .map_or(file, |(_, rest)| rest)
}

fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Output: stderr, so stdout carries only the report.
/// - Colour: only when stderr is a terminal.
/// - Level: `level` when given (a bare level or any EnvFilter directive),
///   else `RUST_LOG`, else `warn`.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}
