//! Logging setup
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber once at startup. Records go to stderr so they never mix with
//! command output, and are optionally appended to `tally.log`.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::{TallyError, TallyResult};

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "TALLY_LOG";

/// Where log records should go and at which level
#[derive(Debug, Clone, Default)]
pub struct LogOptions<'a> {
    /// Filter directive, e.g. `"debug"` or `"tally=trace"`
    pub directive: String,
    /// Append records to this file as well as stderr
    pub file: Option<&'a Path>,
}

/// Pick the filter directive: CLI flag, then `TALLY_LOG`, then settings
pub fn resolve_directive(cli_level: Option<&str>, env_level: Option<&str>, configured: &str) -> String {
    [cli_level, env_level]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|level| !level.is_empty())
        .unwrap_or(configured)
        .to_string()
}

/// Event format: local timestamp, level, source location, fields
struct LocalFmt;

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
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?;
        }
        write!(writer, "{} ", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))?;
        if ansi {
            write!(writer, "\x1b[0m")?;
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        let file = meta
            .file()
            .map(|f| f.strip_prefix("src/").or_else(|| f.strip_prefix("src\\")).unwrap_or(f));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            write!(writer, "{}:{} ", file, line)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. Call once, before any command runs.
///
/// A second call is a no-op.
pub fn init_logging(options: &LogOptions<'_>) -> TallyResult<()> {
    let filter = EnvFilter::try_new(&options.directive).map_err(|e| {
        TallyError::Config(format!("Invalid log level '{}': {}", options.directive, e))
    })?;

    let file_layer = match options.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    TallyError::Io(format!("Cannot open log file {}: {}", path.display(), e))
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
