//! Error types for outbound requests.
//!
//! Every failure mode of a call surfaces here: rejected URLs, serialization
//! problems, timeouts, transport failures, and HTTP error statuses. Errors
//! that carry a server response preserve it in full so callers can inspect
//! partial data.

use std::time::Duration;

use http::StatusCode;

use crate::response::Response;
use crate::validate::ValidationError;

/// The error type for outbound requests.
///
/// # Examples
///
/// ```no_run
/// use palisade::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new()?;
///
/// match client.get("https://api.example.com/status").await {
///     Ok(response) => println!("Success: {:?}", response.data),
///     Err(Error::Http { status, response }) => {
///         eprintln!("HTTP error {}: {:?}", status, response.data);
///     }
///     Err(Error::Timeout { timeout }) => {
///         eprintln!("No response within {}ms", timeout.as_millis());
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The URL was rejected before any network activity.
    ///
    /// See [`ValidationError`] for the individual checks. Requests that fail
    /// validation are never sent and never retried.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// The client or request was misconfigured, such as an invalid header
    /// name or value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An attempt did not complete within its timeout.
    ///
    /// The attempt's timer is released when this error is produced; nothing
    /// keeps running in the background.
    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout {
        /// The per-attempt timeout that elapsed.
        timeout: Duration,
    },

    /// The transfer failed below the HTTP layer (connection refused, DNS
    /// failure, TLS problems).
    ///
    /// No status code exists for these failures; [`Error::status`] returns
    /// `None`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status (400 or above).
    ///
    /// The full decoded response is preserved so callers can inspect the
    /// body and headers of the failure.
    #[error("HTTP {status}")]
    Http {
        /// The response status.
        status: StatusCode,
        /// The complete decoded response.
        response: Box<Response>,
    },
}

impl Error {
    /// Returns `true` if a retry could plausibly succeed.
    ///
    /// Timeouts, transport failures, and server-side statuses are
    /// retryable. Client errors in the 400 range are not, with two
    /// exceptions: 408 (the server timed the request out) and 429 (rate
    /// limited). Validation, serialization, and configuration errors are
    /// never retryable.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use http::{HeaderMap, StatusCode};
    /// use palisade::{Error, Response, ResponseBody};
    ///
    /// let err = Error::Http {
    ///     status: StatusCode::INTERNAL_SERVER_ERROR,
    ///     response: Box::new(Response {
    ///         status: StatusCode::INTERNAL_SERVER_ERROR,
    ///         status_text: "Internal Server Error".to_string(),
    ///         headers: HeaderMap::new(),
    ///         data: ResponseBody::Empty,
    ///         elapsed: Duration::ZERO,
    ///     }),
    /// };
    /// assert!(err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Validation(_) | Error::Serialization(_) | Error::Configuration(_) => false,
            Error::Http { status, .. } => {
                !status.is_client_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Error::Timeout { .. } | Error::Network(_) => true,
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    ///
    /// `Http` errors report the server's status; `Timeout` reports 408.
    /// Transport failures have no status and return `None`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Timeout { .. } => Some(StatusCode::REQUEST_TIMEOUT),
            _ => None,
        }
    }

    /// Returns the server response embedded in this error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Http { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for outbound requests.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseBody;
    use crate::validate::validate_url;
    use http::HeaderMap;

    fn http_error(status: u16) -> Error {
        let status = StatusCode::from_u16(status).unwrap();
        Error::Http {
            status,
            response: Box::new(Response {
                status,
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers: HeaderMap::new(),
                data: ResponseBody::Empty,
                elapsed: Duration::ZERO,
            }),
        }
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(http_error(500).is_retryable());
        assert!(http_error(503).is_retryable());
    }

    #[test]
    fn timeout_and_rate_limit_statuses_are_retryable() {
        assert!(http_error(408).is_retryable());
        assert!(http_error(429).is_retryable());
    }

    #[test]
    fn other_client_errors_are_not_retryable() {
        assert!(!http_error(400).is_retryable());
        assert!(!http_error(401).is_retryable());
        assert!(!http_error(404).is_retryable());
    }

    #[test]
    fn pre_network_errors_are_not_retryable() {
        let validation: Error = validate_url("").unwrap_err().into();
        assert!(!validation.is_retryable());
        assert!(!Error::Serialization("boom".to_string()).is_retryable());
        assert!(!Error::Configuration("bad header".to_string()).is_retryable());
    }

    #[test]
    fn timeout_reports_request_timeout_status() {
        let err = Error::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(StatusCode::REQUEST_TIMEOUT));
        assert_eq!(err.to_string(), "Request timed out after 30000ms");
    }

    #[test]
    fn http_error_exposes_status_and_response() {
        let err = http_error(404);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err.response().map(|r| r.status),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn pre_network_errors_have_no_status() {
        assert_eq!(Error::Serialization("boom".to_string()).status(), None);
        let validation: Error = validate_url("").unwrap_err().into();
        assert_eq!(validation.status(), None);
    }
}
