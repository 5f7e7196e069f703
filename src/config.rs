//! Health check configuration.
//!
//! The configuration comes in two flavours:
//!
//! - [`PlainConfiguration`]: the values as they were supplied by the caller.
//!   They do not need to be valid.
//! - [`Configuration`]: the validated configuration. The only way to get one
//!   is converting a [`PlainConfiguration`] with [`TryFrom`].
//!
//! Validation always runs in the same order and stops at the first failing
//! check:
//!
//! 1. The timeout must be between `0` and [`MAX_TIMEOUT_SECS`] seconds.
//! 2. The URL must be an absolute URL.
//! 3. The method must be one of [`VALID_METHODS`] (case-insensitive).
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use thiserror::Error;
use url::Url;

/// The maximum timeout (inclusive) for the health check request.
pub const MAX_TIMEOUT_SECS: i64 = 360;

/// Default timeout for the health check request.
pub const DEFAULT_TIMEOUT: Timeout = Timeout::from_secs(5);

/// Default URL for the health check request.
pub const DEFAULT_URL: &str = "http://localhost:8080/healthz";

/// Default method for the health check request.
pub const DEFAULT_METHOD: &str = "GET";

/// The HTTP methods a health check is allowed to use.
pub const VALID_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// A request timeout as it was given by the user.
///
/// It's stored as a signed number of milliseconds so out-of-range values
/// (negative ones included) can be represented and rejected by the
/// validation.
///
/// It can be parsed from an integer number of seconds (`5`) or from a
/// duration literal with one of the units `ms`, `s`, `m` or `h` (`500ms`,
/// `5s`, `2m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout {
    millis: i64,
}

impl Timeout {
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self {
            millis: secs.saturating_mul(1000),
        }
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.millis
    }

    fn is_within_bounds(self) -> bool {
        (0..=MAX_TIMEOUT_SECS * 1000).contains(&self.millis)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis % 1000 == 0 {
            write!(f, "{}s", self.millis / 1000)
        } else {
            write!(f, "{}ms", self.millis)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timeout \"{input}\": expected whole seconds or a duration such as 500ms, 5s, 2m or 1h")]
pub struct ParseTimeoutError {
    input: String,
}

impl FromStr for Timeout {
    type Err = ParseTimeoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let err = || ParseTimeoutError { input: s.to_owned() };

        let split = input
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
            .map_or(input.len(), |(i, _)| i);

        let (amount, unit) = input.split_at(split);

        let amount: i64 = amount.parse().map_err(|_| err())?;

        let multiplier = match unit {
            "" | "s" => 1000,
            "ms" => 1,
            "m" => 60 * 1000,
            "h" => 60 * 60 * 1000,
            _ => return Err(err()),
        };

        let millis = amount.checked_mul(multiplier).ok_or_else(err)?;

        Ok(Self::from_millis(millis))
    }
}

/// DTO for the unvalidated health check configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainConfiguration {
    pub method: String,
    pub url: String,
    pub timeout: Timeout,
}

impl Default for PlainConfiguration {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_owned(),
            url: DEFAULT_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub method: Method,
    pub url: Url,
    /// A zero timeout means the request never times out.
    pub timeout: Duration,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The timeout must be between 0 and 360 seconds")]
    TimeoutOutOfBounds { timeout: Timeout },
    #[error("The health check URL must be valid")]
    InvalidUrl { url: String, err: url::ParseError },
    #[error("The method must be a valid HTTP method")]
    InvalidMethod { method: String },
}

impl TryFrom<&PlainConfiguration> for Configuration {
    type Error = ConfigurationError;

    fn try_from(plain_config: &PlainConfiguration) -> Result<Self, Self::Error> {
        let timeout = parse_timeout(plain_config.timeout)?;
        let url = parse_url(&plain_config.url)?;
        let method = parse_method(&plain_config.method)?;

        Ok(Configuration { method, url, timeout })
    }
}

impl TryFrom<PlainConfiguration> for Configuration {
    type Error = ConfigurationError;

    fn try_from(plain_config: PlainConfiguration) -> Result<Self, Self::Error> {
        Configuration::try_from(&plain_config)
    }
}

fn parse_timeout(timeout: Timeout) -> Result<Duration, ConfigurationError> {
    if !timeout.is_within_bounds() {
        return Err(ConfigurationError::TimeoutOutOfBounds { timeout });
    }

    // Bounds checked above, the amount is never negative.
    Ok(Duration::from_millis(timeout.as_millis().unsigned_abs()))
}

fn parse_url(url: &str) -> Result<Url, ConfigurationError> {
    Url::parse(url).map_err(|err| ConfigurationError::InvalidUrl { url: url.to_owned(), err })
}

fn parse_method(method: &str) -> Result<Method, ConfigurationError> {
    let invalid = || ConfigurationError::InvalidMethod {
        method: method.to_owned(),
    };

    let normalized = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(|_| invalid())?;

    if VALID_METHODS.contains(&normalized) {
        Ok(normalized)
    } else {
        Err(invalid())
    }
}
