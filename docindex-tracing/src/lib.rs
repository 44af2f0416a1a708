//! Console output and tracing utilities shared between docindex crates.

use ansiterm::{Colour, Style};
use std::{env, io};
use tracing::{Level, Metadata};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::MakeWriter,
};

/// Width of the right-aligned action column, e.g. `    Checking index.js`.
const ACTION_COLUMN_WIDTH: usize = 12;

pub fn println_green(txt: &str) {
    println_std_out(txt, Colour::Green);
}

pub fn println_yellow_err(txt: &str) {
    println_std_err(txt, Colour::Yellow);
}

pub fn println_red_err(txt: &str) {
    println_std_err(txt, Colour::Red);
}

/// Prints an action message with a green-bold prefix like "   Compiling ".
pub fn println_action_green(action: &str, txt: &str) {
    tracing::info!("{}", format_action(action, txt, Colour::Green));
}

/// Prints an action message with a red-bold prefix.
pub fn println_action_red(action: &str, txt: &str) {
    tracing::info!("{}", format_action(action, txt, Colour::Red));
}

/// Prints a warning message to stderr with a yellow-bold "warning: " prefix.
pub fn println_warning(txt: &str) {
    tracing::warn!("{}: {}", Colour::Yellow.bold().paint("warning"), txt);
}

/// Prints an error message to stderr with a red-bold "error: " prefix.
pub fn println_error(txt: &str) {
    tracing::error!("{}: {}", Colour::Red.bold().paint("error"), txt);
}

fn format_action(action: &str, txt: &str, colour: Colour) -> String {
    let style: Style = colour.bold();
    format!(
        "{} {}",
        style.paint(format!("{action:>ACTION_COLUMN_WIDTH$}")),
        txt
    )
}

fn println_std_out(txt: &str, color: Colour) {
    tracing::info!("{}", color.paint(txt));
}

fn println_std_err(txt: &str, color: Colour) {
    tracing::error!("{}", color.paint(txt));
}

const LOG_FILTER: &str = "RUST_LOG";

// This allows us to write ERROR and WARN level logs to stderr and everything else to stdout.
// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/trait.MakeWriter.html
struct StdioTracingWriter {
    writer_mode: TracingWriterMode,
}

impl<'a> MakeWriter<'a> for StdioTracingWriter {
    type Writer = Box<dyn io::Write>;

    fn make_writer(&'a self) -> Self::Writer {
        if self.writer_mode == TracingWriterMode::Stderr {
            Box::new(io::stderr())
        } else {
            // Without metadata there is nothing to route on, default to stdout.
            Box::new(io::stdout())
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if self.writer_mode == TracingWriterMode::Stderr
            || (self.writer_mode == TracingWriterMode::Stdio && meta.level() <= &Level::WARN)
        {
            return Box::new(io::stderr());
        }
        Box::new(io::stdout())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingWriterMode {
    /// Write ERROR and WARN to stderr and everything else to stdout.
    Stdio,
    /// Write everything to stdout.
    Stdout,
    /// Write everything to stderr.
    Stderr,
}

#[derive(Debug, Default)]
pub struct TracingSubscriberOptions {
    pub verbosity: Option<u8>,
    pub silent: Option<bool>,
    pub log_level: Option<LevelFilter>,
    pub writer_mode: Option<TracingWriterMode>,
}

impl TracingSubscriberOptions {
    /// The level that overrides `RUST_LOG`, if any.
    ///
    /// An explicit `log_level` wins over `verbosity`, which wins over `silent`.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level
            .or_else(|| {
                self.verbosity.and_then(|verbosity| match verbosity {
                    0 => None,
                    1 => Some(LevelFilter::DEBUG), // matches --verbose or -v
                    _ => Some(LevelFilter::TRACE), // matches -vv and beyond
                })
            })
            .or_else(|| match self.silent {
                Some(true) => Some(LevelFilter::OFF),
                _ => None,
            })
    }
}

/// A subscriber built from the default `tracing_subscriber::fmt::SubscriberBuilder` such
/// that its output matches plain `println!` output.
///
/// `RUST_LOG` can be used to set a different minimum level, the default is `INFO`.
/// An invalid `RUST_LOG` falls back to the default with a warning.
pub fn init_tracing_subscriber(options: TracingSubscriberOptions) {
    let mut invalid_filter = None;
    let env_filter = match env::var_os(LOG_FILTER) {
        Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|err| {
            invalid_filter = Some(err.to_string());
            EnvFilter::new("info")
        }),
        None => EnvFilter::new("info"),
    };

    let builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_ansi(true)
        .with_level(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .with_target(false)
        .with_writer(StdioTracingWriter {
            writer_mode: options.writer_mode.unwrap_or(TracingWriterMode::Stdio),
        });

    // If log level, verbosity, or silent mode is set, it overrides the RUST_LOG setting.
    let init_result = match options.level_filter() {
        Some(level_filter) => builder.with_max_level(level_filter).try_init(),
        None => builder.try_init(),
    };
    if init_result.is_err() {
        // A global subscriber is already installed, e.g. by a test harness.
        return;
    }

    if let Some(err) = invalid_filter {
        println_warning(&format!("ignoring invalid `{LOG_FILTER}`: {err}"));
    }
}
