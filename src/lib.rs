//! A single-request HTTP probe for container health checks.
//!
//! It sends one HTTP request to the configured endpoint and turns the outcome
//! into the process exit code, so it can be used as a Docker `HEALTHCHECK`
//! or a Kubernetes exec probe without shipping `curl` or `wget` in the image.
//!
//! ```text
//! http_health_check --url http://127.0.0.1:1212/health_check --method GET --timeout 5
//! ```
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | `0`       | The endpoint answered with a status code lower than `300`. |
//! | `1`       | Invalid arguments, no response, or a status code of `300` or greater. |
//!
//! The health check is built from these parts:
//!
//! - [`config`]: the user supplied values and their validation.
//! - [`check`]: the runner that sends the request and interprets the response.
//! - [`reporter`]: the logging capability injected into the runner.
//! - [`logging`]: the `tracing` subscriber setup.
//! - [`app`]: the command line wiring.
//!
//! The runner can also be used as a library:
//!
//! ```rust,no_run
//! use http_health_check::check::{self, Status};
//! use http_health_check::config::{PlainConfiguration, Timeout};
//! use http_health_check::reporter::Tracing;
//!
//! # async fn example() {
//! let plain_config = PlainConfiguration {
//!     method: "GET".to_owned(),
//!     url: "http://127.0.0.1:1212/health_check".to_owned(),
//!     timeout: Timeout::from_secs(5),
//! };
//!
//! let status = check::run(&plain_config, &Tracing::default()).await;
//!
//! assert_eq!(status, Status::Success);
//! # }
//! ```
pub mod app;
pub mod check;
pub mod config;
pub mod logging;
pub mod reporter;
