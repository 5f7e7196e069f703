//! Setup for the health check logging.
//!
//! It redirects the log info to the standard output with the given log level:
//!
//! - `Off`
//! - `Error` (default)
//! - `Warn`
//! - `Info`
//! - `Debug`
//! - `Trace`
//!
//! Lines are written in JSON by default so container runtimes can collect
//! them as structured logs.
use std::sync::Once;

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraceStyle {
    Default,
    Pretty,
    Compact,
    #[default]
    Json,
}

/// It redirects the log info to the standard output with the given log level.
///
/// Only the first call installs the subscriber.
pub fn setup(log_level: LogLevel, style: TraceStyle) {
    let tracing_level = map_to_tracing_level_filter(log_level);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level, style);
    });
}

fn map_to_tracing_level_filter(log_level: LogLevel) -> LevelFilter {
    match log_level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter, style: TraceStyle) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stdout)
        .with_target(false);

    let () = match style {
        TraceStyle::Default => builder.init(),
        TraceStyle::Pretty => builder.pretty().init(),
        TraceStyle::Compact => builder.compact().init(),
        TraceStyle::Json => builder.json().with_ansi(false).init(),
    };

    tracing::debug!("Logging initialized");
}
