//! Command line application to run one health check.
//!
//! ```text
//! cargo run --bin http_health_check -- --url http://127.0.0.1:1212/health_check
//! cargo run --bin http_health_check -- --url http://127.0.0.1:1212/health_check --method head --timeout 2s --loglevel info
//! ```
//!
//! The process exits with `0` when the endpoint is healthy and with `1`
//! otherwise, including invalid arguments.
use std::ffi::OsString;

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use crate::check::{self, Status};
use crate::config::{PlainConfiguration, Timeout, DEFAULT_METHOD, DEFAULT_URL};
use crate::logging::{self, LogLevel, TraceStyle};
use crate::reporter::Tracing;

/// The only mode supported.
pub const HTTP_MODE: &str = "http";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Health check mode. At the moment only `http` is available.
    #[arg(long, default_value = HTTP_MODE)]
    mode: String,

    /// URL to check the health of the app.
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Method of the HTTP request.
    #[arg(long, default_value = DEFAULT_METHOD)]
    method: String,

    /// Timeout for the request, in seconds (`5`) or as a duration (`500ms`, `5s`, `2m`). Minimum 0, maximum 360 seconds.
    #[arg(long, default_value = "5", allow_hyphen_values = true)]
    timeout: Timeout,

    /// Log level.
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Error)]
    loglevel: LogLevel,

    /// Log output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = TraceStyle::Json)]
    log_style: TraceStyle,
}

/// It parses the command line arguments and runs the health check.
pub async fn run() -> Status {
    run_with_args(std::env::args_os()).await
}

/// Same as [`run`] but with explicit arguments, the first one being the
/// binary name.
pub async fn run_with_args<I, T>(args: I) -> Status
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Status::Success;
        }
        Err(err) => {
            let _ = err.print();
            return Status::Failure;
        }
    };

    logging::setup(args.loglevel, args.log_style);

    let plain_config = match setup_config(args) {
        Ok(plain_config) => plain_config,
        Err(err) => {
            tracing::error!("{err:#}");
            return Status::Failure;
        }
    };

    tracing::info!("Starting health check at {}", plain_config.url);

    check::run(&plain_config, &Tracing::default()).await
}

fn setup_config(args: Args) -> Result<PlainConfiguration> {
    check_mode(&args.mode).context("invalid health check mode")?;

    Ok(PlainConfiguration {
        method: args.method,
        url: args.url,
        timeout: args.timeout,
    })
}

fn check_mode(mode: &str) -> Result<()> {
    if mode != HTTP_MODE {
        bail!("Only HTTP mode is available for the health check, got: \"{mode}\"");
    }

    Ok(())
}
