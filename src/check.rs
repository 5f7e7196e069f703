//! The health check runner.
//!
//! It validates the configuration, sends one HTTP request and maps the
//! outcome into a [`Status`]:
//!
//! - Invalid configuration: [`Status::Failure`], no request is sent.
//! - No response (connection refused, timeout, DNS failure, ...):
//!   [`Status::Failure`].
//! - Response with a status code greater than `299`: [`Status::Failure`].
//! - Any other response: [`Status::Success`].
//!
//! Nothing is retried.
use std::process::ExitCode;
use std::sync::Arc;

use reqwest::{Client as HttpClient, Response, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::{Configuration, ConfigurationError, PlainConfiguration};
use crate::reporter::Reporter;

pub const EXIT_CODE_SUCCESS: u8 = 0;
pub const EXIT_CODE_ERROR: u8 = 1;

/// The highest status code considered healthy.
pub const MAX_HEALTHY_STATUS_CODE: u16 = 299;

/// The outcome of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Status::Success => EXIT_CODE_SUCCESS,
            Status::Failure => EXIT_CODE_ERROR,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("error creating healthcheck http client: {err}")]
    ClientBuildingError { err: Arc<reqwest::Error> },
    #[error("error creating healthcheck request: {err}")]
    RequestBuildingError { err: Arc<reqwest::Error> },
    #[error("Health check {url}: Error {err}")]
    ResponseError { url: Url, err: Arc<reqwest::Error> },
    #[error("Health check {url}: Error - status code {}", .code.as_u16())]
    UnsuccessfulResponse { url: Url, code: StatusCode },
}

/// It runs the health check.
///
/// The configuration is fully validated before any request is sent. Every
/// failure is reported as one error line and every success as one info line.
/// Once validated, the URL is always reported in its normalized form.
pub async fn run(plain_config: &PlainConfiguration, reporter: &dyn Reporter) -> Status {
    let config = match Configuration::try_from(plain_config) {
        Ok(config) => config,
        Err(err) => {
            reporter.error(&Error::from(err).to_string());
            return Status::Failure;
        }
    };

    reporter.info(&format!("Querying Endpoint {}", config.url));

    match run_health_check(&config).await {
        Ok(response) => {
            reporter.info(&format!("Health check {}: HTTP status code {}", config.url, response.status()));
            Status::Success
        }
        Err(err) => {
            reporter.error(&err.to_string());
            Status::Failure
        }
    }
}

/// It sends the health check request for an already validated configuration.
///
/// # Errors
///
/// Will return an error if the request can't be built or sent, or if the
/// response status code is greater than [`MAX_HEALTHY_STATUS_CODE`].
pub async fn run_health_check(config: &Configuration) -> Result<Response, Error> {
    let mut builder = HttpClient::builder();

    if !config.timeout.is_zero() {
        builder = builder.timeout(config.timeout);
    }

    let client = builder.build().map_err(|e| Error::ClientBuildingError { err: e.into() })?;

    let request = client
        .request(config.method.clone(), config.url.clone())
        .build()
        .map_err(|e| Error::RequestBuildingError { err: e.into() })?;

    let response = client.execute(request).await.map_err(|e| Error::ResponseError {
        url: config.url.clone(),
        err: e.into(),
    })?;

    if response.status().as_u16() > MAX_HEALTHY_STATUS_CODE {
        return Err(Error::UnsuccessfulResponse {
            url: config.url.clone(),
            code: response.status(),
        });
    }

    Ok(response)
}
