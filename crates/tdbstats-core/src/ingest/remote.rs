//! Fetching line-oriented databases over HTTP(S)
//!
//! A single blocking GET per load. There is no retry; a transport failure or
//! a non-success status fails the load.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Timeout configuration for remote fetches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout - time to establish a connection
    pub connect_timeout: Duration,
    /// Request timeout - total time for the entire request, body included
    pub request_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl TimeoutConfig {
    /// Create a new timeout configuration
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            request_timeout,
        }
    }

    /// Override the request timeout, keeping the connect timeout no larger
    pub fn with_request_timeout(&self, timeout: Duration) -> Self {
        Self {
            connect_timeout: self.connect_timeout.min(timeout),
            request_timeout: timeout,
        }
    }

    /// Validate timeout configuration
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(configuration("Connect timeout cannot be zero"));
        }

        if self.request_timeout.is_zero() {
            return Err(configuration("Request timeout cannot be zero"));
        }

        if self.request_timeout < self.connect_timeout {
            return Err(configuration("Request timeout should be >= connect timeout"));
        }

        Ok(())
    }
}

fn configuration(message: &str) -> Error {
    Error::Configuration {
        message: message.to_string(),
    }
}

/// Interpret `input` as a remote source if it is an http(s) URL with a host
pub fn parse_remote(input: &str) -> Option<Url> {
    let url = Url::parse(input).ok()?;
    let supported = matches!(url.scheme(), "http" | "https") && url.host_str().is_some();
    supported.then_some(url)
}

/// Render a URL for logs and messages with any password masked
pub fn redact_url(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.password().is_some() {
        // cannot fail: the URL already carries credentials
        let _ = shown.set_password(Some("***"));
    }
    shown.to_string()
}

/// Download the body of `url`
pub(crate) fn fetch(url: &Url, timeouts: &TimeoutConfig) -> Result<Vec<u8>> {
    let shown = redact_url(url);

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(timeouts.connect_timeout)
        .timeout(timeouts.request_timeout)
        .build()
        .map_err(|e| Error::Http {
            message: format!("Failed to create HTTP client: {}", e),
            status_code: None,
            source: Some(e),
        })?;

    debug!(url = %shown, "Fetching remote database");

    let response = client.get(url.clone()).send().map_err(|e| Error::Http {
        message: format!("Request to {} failed: {}", shown, e),
        status_code: e.status().map(|s| s.as_u16()),
        source: Some(e),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            message: format!("{} responded with {}", shown, status),
            status_code: Some(status.as_u16()),
            source: None,
        });
    }

    let body = response.bytes().map_err(|e| Error::Http {
        message: format!("Failed to read response body from {}: {}", shown, e),
        status_code: Some(status.as_u16()),
        source: Some(e),
    })?;

    debug!(url = %shown, bytes = body.len(), "Remote database downloaded");
    Ok(body.to_vec())
}
