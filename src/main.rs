//! Minimal `curl` or `wget` to be used for container health checks.
//!
//! ```text
//! cargo run --bin http_health_check -- --url http://127.0.0.1:1212/health_check
//! ```
use std::process::ExitCode;

use http_health_check::app;

#[tokio::main]
async fn main() -> ExitCode {
    app::run().await.into()
}
