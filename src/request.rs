//! Per-request descriptions: method, target URL, headers, body, and
//! per-call overrides for timeout and retry behavior.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Auth;

/// HTTP method for an outbound request.
///
/// The set is closed to the verbs the client supports; there is no
/// catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// The wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    pub(crate) fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
///
/// `Text` goes on the wire byte-for-byte; `Json` is serialized to JSON text
/// at send time. Deserialization is untagged, so a JSON string becomes
/// `Text` and any other JSON value becomes `Json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// A pre-encoded body sent verbatim.
    Text(String),
    /// A JSON value serialized when the request is sent.
    Json(serde_json::Value),
}

impl Body {
    /// Builds a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// value cannot be represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, crate::Error> {
        let value = serde_json::to_value(value)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        Ok(Body::Json(value))
    }

    /// Renders the body as the string sent on the wire.
    pub(crate) fn to_wire(&self) -> Result<String, crate::Error> {
        match self {
            Body::Text(text) => Ok(text.clone()),
            Body::Json(value) => serde_json::to_string(value)
                .map_err(|e| crate::Error::Serialization(e.to_string())),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

/// Everything needed to issue one request.
///
/// A `RequestSpec` is an immutable description: the client reads it and
/// never mutates it, so the same value can be executed repeatedly or shared
/// across tasks. Unset `timeout`, `retries`, and `retry_delay` fall back to
/// the client's defaults.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: Method,

    /// The target URL. Validated before any network activity.
    pub url: String,

    /// Caller-supplied headers, merged over the client's default headers.
    pub headers: HashMap<String, String>,

    /// Optional request payload. Not sent for GET requests.
    pub body: Option<Body>,

    /// Per-attempt timeout override.
    pub timeout: Option<Duration>,

    /// Maximum number of retries after the initial attempt.
    pub retries: Option<u32>,

    /// Base backoff delay override.
    pub retry_delay: Option<Duration>,

    /// Authentication injected as a header before sending.
    pub auth: Option<Auth>,
}

impl RequestSpec {
    /// Creates a request description with the given method and URL and no
    /// overrides.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
            retries: None,
            retry_delay: None,
            auth: None,
        }
    }

    /// Adds a header. A later value replaces an earlier one with the same
    /// name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds every header from `headers`.
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` to JSON and uses it as the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// value cannot be represented as JSON.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, crate::Error> {
        self.body = Some(Body::json(value)?);
        Ok(self)
    }

    /// Overrides the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the retry budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Overrides the base backoff delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Attaches an authentication descriptor.
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }
}
