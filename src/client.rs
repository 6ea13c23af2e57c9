//! Hardened HTTP client with URL validation, bounded retries, and strict
//! per-attempt timeouts.
//!
//! The [`Client`] type is the entry point for outbound requests. Use
//! [`ClientBuilder`] to configure defaults that apply to every request the
//! client sends.

use std::sync::Arc;
use std::time::{Duration, Instant};

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::request::{Body, Method, RequestSpec};
use crate::response::{Response, ResponseBody};
use crate::retry::{self, RetryPolicy};
use crate::validate;
use crate::{Error, Result};

/// Per-attempt timeout used when a request does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Retries after the initial attempt used when a request does not override it.
pub const DEFAULT_RETRIES: u32 = 3;

/// Base backoff delay used when a request does not override it.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

/// `User-Agent` value sent on every request, replacing any caller-supplied
/// value.
pub const USER_AGENT: &str = concat!("palisade/", env!("CARGO_PKG_VERSION"));

/// An HTTP client that validates, authenticates, and retries outbound
/// requests.
///
/// The client is designed to be created once and reused: it holds the
/// connection pool and the defaults that apply to every request. Cloning is
/// cheap and clones share the pool.
///
/// Every call validates the target URL before any network activity. URLs
/// pointing at private or loopback addresses are rejected, so the client is
/// safe to hand URLs that originated outside the process.
///
/// # Examples
///
/// ```no_run
/// use palisade::{Auth, Client, Method, RequestSpec};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), palisade::Error> {
/// let client = Client::builder()
///     .default_timeout(Duration::from_secs(10))
///     .default_retries(2)
///     .build()?;
///
/// // Simple GET.
/// let response = client.get("https://api.example.com/users/123").await?;
/// println!("Status: {}", response.status);
///
/// // POST with a JSON body and bearer authentication.
/// let spec = RequestSpec::new(Method::Post, "https://api.example.com/users")
///     .with_json(&serde_json::json!({ "name": "Alice" }))?
///     .with_auth(Auth::Bearer {
///         token: "secret-token".to_string(),
///     });
/// let created = client.execute(&spec).await?;
/// println!("Created: {:?}", created.data);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    default_headers: HeaderMap,
    default_timeout: Duration,
    default_retries: u32,
    default_retry_delay: Duration,
    allow_private_targets: bool,
}

impl Client {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Executes a request described by `spec`.
    ///
    /// The URL is validated first; requests that fail validation are never
    /// sent and never retried. Each attempt runs under the request's timeout
    /// (or the client default), and retryable failures back off
    /// exponentially until the retry budget is spent. The call resolves to
    /// exactly one of a response with status below 400 or an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use palisade::{Client, Method, RequestSpec};
    ///
    /// # async fn example() -> Result<(), palisade::Error> {
    /// let client = Client::new()?;
    ///
    /// let spec = RequestSpec::new(Method::Get, "https://api.example.com/health")
    ///     .with_header("Accept", "application/json")
    ///     .with_retries(1);
    ///
    /// let response = client.execute(&spec).await?;
    /// assert!(response.is_ok());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Response> {
        let url = self.validate_target(&spec.url)?;

        let timeout = spec.timeout.unwrap_or(self.inner.default_timeout);
        let policy = RetryPolicy {
            max_retries: spec.retries.unwrap_or(self.inner.default_retries),
            base_delay: spec.retry_delay.unwrap_or(self.inner.default_retry_delay),
        };

        let start = Instant::now();
        let url = &url;
        retry::run(policy, move |attempt| async move {
            self.execute_attempt(spec, url, timeout, start, attempt).await
        })
        .await
    }

    /// Applies the structural URL checks, and the private-host check unless
    /// the client was built to skip it.
    fn validate_target(&self, raw: &str) -> Result<Url> {
        let url = validate::parse_url(raw)?;
        if !self.inner.allow_private_targets {
            validate::ensure_public_host(&url)?;
        }
        Ok(url)
    }

    /// Runs a single attempt.
    ///
    /// The per-attempt timer covers the transfer and is released when the
    /// attempt resolves, on every exit path.
    async fn execute_attempt(
        &self,
        spec: &RequestSpec,
        url: &Url,
        timeout: Duration,
        start: Instant,
        attempt: u32,
    ) -> Result<Response> {
        tracing::debug!(
            method = %spec.method,
            url = %url,
            attempt = attempt + 1,
            "Executing HTTP request"
        );

        let headers = self.build_headers(spec)?;

        let mut request = self
            .inner
            .http_client
            .request(spec.method.as_reqwest(), url.clone())
            .headers(headers);

        if spec.method != Method::Get {
            if let Some(body) = &spec.body {
                request = request.body(body.to_wire()?);
            }
        }

        let response = match tokio::time::timeout(timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(Error::Timeout { timeout }),
            Ok(Err(e)) => return Err(Error::Network(e)),
            Err(_) => return Err(Error::Timeout { timeout }),
        };

        self.assemble(response, start).await
    }

    /// Builds the final header set for one attempt.
    ///
    /// Client defaults go first, then the request's own headers, then
    /// authentication, which replaces any caller-supplied value for its
    /// header. `Content-Type` defaults to `application/json` when a body is
    /// present and the caller set none, and the fixed `User-Agent` is
    /// written last. Each name ends up with exactly one value.
    fn build_headers(&self, spec: &RequestSpec) -> Result<HeaderMap> {
        let mut headers = self.inner.default_headers.clone();

        for (name, value) in &spec.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        if let Some(auth) = &spec.auth {
            auth.apply(&mut headers)?;
        }

        if spec.body.is_some() && !headers.contains_key(http::header::CONTENT_TYPE) {
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        headers.insert(http::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        Ok(headers)
    }

    /// Decodes the transport response and classifies it by status.
    async fn assemble(&self, response: reqwest::Response, start: Instant) -> Result<Response> {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = response.headers().clone();

        let content_type = headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        // Body decoding never fails the call; an unreadable body is empty.
        let data = match response.bytes().await {
            Ok(bytes) => ResponseBody::decode(content_type.as_deref(), &bytes),
            Err(_) => ResponseBody::Empty,
        };

        let elapsed = start.elapsed();

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis(),
            "Received HTTP response"
        );

        let assembled = Response {
            status,
            status_text,
            headers,
            data,
            elapsed,
        };

        if assembled.is_ok() {
            Ok(assembled)
        } else {
            if status.is_client_error() {
                tracing::error!(status = status.as_u16(), "Client error response");
            } else {
                tracing::warn!(status = status.as_u16(), "Server error response");
            }
            Err(Error::Http {
                status,
                response: Box::new(assembled),
            })
        }
    }

    /// Makes a GET request to the given URL.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use palisade::Client;
    ///
    /// # async fn example() -> Result<(), palisade::Error> {
    /// let client = Client::new()?;
    ///
    /// let response = client.get("https://api.example.com/users/123").await?;
    /// if let Some(user) = response.data.as_json() {
    ///     println!("User: {}", user["name"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, url: impl Into<String>) -> Result<Response> {
        self.execute(&RequestSpec::new(Method::Get, url)).await
    }

    /// Makes a POST request to the given URL with a body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use palisade::Client;
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), palisade::Error> {
    /// let client = Client::new()?;
    ///
    /// let response = client
    ///     .post("https://api.example.com/users", json!({ "name": "Alice" }))
    ///     .await?;
    /// println!("Created with status {}", response.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post(&self, url: impl Into<String>, body: impl Into<Body>) -> Result<Response> {
        self.execute(&RequestSpec::new(Method::Post, url).with_body(body))
            .await
    }

    /// Makes a PUT request to the given URL with a body.
    pub async fn put(&self, url: impl Into<String>, body: impl Into<Body>) -> Result<Response> {
        self.execute(&RequestSpec::new(Method::Put, url).with_body(body))
            .await
    }

    /// Makes a DELETE request to the given URL.
    pub async fn delete(&self, url: impl Into<String>) -> Result<Response> {
        self.execute(&RequestSpec::new(Method::Delete, url)).await
    }

    /// Makes a PATCH request to the given URL with a body.
    pub async fn patch(&self, url: impl Into<String>, body: impl Into<Body>) -> Result<Response> {
        self.execute(&RequestSpec::new(Method::Patch, url).with_body(body))
            .await
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use palisade::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), palisade::Error> {
/// let client = ClientBuilder::new()
///     .default_timeout(Duration::from_secs(15))
///     .default_retries(5)
///     .default_retry_delay(Duration::from_millis(250))
///     .default_header("Accept", "application/json")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    default_headers: HeaderMap,
    default_timeout: Duration,
    default_retries: u32,
    default_retry_delay: Duration,
    allow_private_targets: bool,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            default_headers: HeaderMap::new(),
            default_timeout: DEFAULT_TIMEOUT,
            default_retries: DEFAULT_RETRIES,
            default_retry_delay: DEFAULT_RETRY_DELAY,
            allow_private_targets: false,
        }
    }

    /// Adds a default header included in every request.
    ///
    /// A request's own header with the same name takes precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-attempt timeout used when a request does not override
    /// it. Defaults to [`DEFAULT_TIMEOUT`].
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sets the retry budget used when a request does not override it.
    /// Defaults to [`DEFAULT_RETRIES`].
    pub fn default_retries(mut self, retries: u32) -> Self {
        self.default_retries = retries;
        self
    }

    /// Sets the base backoff delay used when a request does not override
    /// it. Defaults to [`DEFAULT_RETRY_DELAY`].
    pub fn default_retry_delay(mut self, delay: Duration) -> Self {
        self.default_retry_delay = delay;
        self
    }

    /// Disables the private/loopback host check.
    ///
    /// Intended for tests that point requests at a mock server on loopback.
    /// The length, parse, and scheme checks still apply. Off by default.
    pub fn allow_private_targets(mut self, allow: bool) -> Self {
        self.allow_private_targets = allow;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP transport cannot be
    /// initialized.
    pub fn build(self) -> Result<Client> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                default_headers: self.default_headers,
                default_timeout: self.default_timeout,
                default_retries: self.default_retries,
                default_retry_delay: self.default_retry_delay,
                allow_private_targets: self.allow_private_targets,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
