//! # Palisade - a hardened outbound HTTP client
//!
//! Palisade issues HTTP requests with pre-flight URL validation, bounded
//! retries, strict per-attempt timeouts, and authentication header
//! injection. It is built on `reqwest` and meant for callers that forward
//! URLs originating outside the process: requests to private, link-local,
//! and loopback addresses are rejected before any network activity.
//!
//! ## Quick Start
//!
//! ```no_run
//! use palisade::{Auth, Client, Method, RequestSpec};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), palisade::Error> {
//!     let client = Client::builder()
//!         .default_timeout(Duration::from_secs(10))
//!         .default_retries(2)
//!         .build()?;
//!
//!     // Simple GET.
//!     let response = client.get("https://api.example.com/users/123").await?;
//!     if let Some(user) = response.data.as_json() {
//!         println!("User: {}", user["name"]);
//!     }
//!
//!     // POST with a JSON body, bearer auth, and a tighter retry budget.
//!     let spec = RequestSpec::new(Method::Post, "https://api.example.com/users")
//!         .with_json(&serde_json::json!({ "name": "Alice" }))?
//!         .with_auth(Auth::Bearer {
//!             token: "secret".to_string(),
//!         })
//!         .with_retries(1);
//!     let created = client.execute(&spec).await?;
//!     println!("Created with status {}", created.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Validation before I/O** - URLs are checked for length, scheme, and
//!   private/loopback targets before a connection is opened; rejected
//!   requests are never sent and never retried
//! - **Bounded retries** - exponential backoff (`base * 2^attempt`); client
//!   errors other than 408 and 429 are never retried, and the last error is
//!   surfaced unchanged when the budget runs out
//! - **Strict timeouts** - each attempt runs under its own timer, released
//!   on every exit path
//! - **Authentication injection** - bearer, basic, and API-key schemes as a
//!   closed set, injected as exactly one header
//! - **Lenient response decoding** - JSON when the content type says so,
//!   text otherwise; an undecodable body is empty, never an error
//! - **Structured logging** - the request lifecycle is logged with `tracing`
//! - **Builder pattern** - fluent configuration of per-client defaults
//!
//! ## URL validation
//!
//! [`validate_url`] is exported so targets can be checked ahead of time:
//!
//! ```
//! use palisade::{validate_url, ValidationError};
//!
//! assert!(validate_url("https://api.example.com/v1").is_ok());
//!
//! assert!(matches!(
//!     validate_url("http://192.168.1.1/router"),
//!     Err(ValidationError::PrivateAddress { .. })
//! ));
//! assert!(matches!(
//!     validate_url("file:///etc/passwd"),
//!     Err(ValidationError::DisallowedScheme { .. })
//! ));
//! ```
//!
//! Validation is purely syntactic. Hostnames are not resolved, so a public
//! DNS name that points at a private address passes; put the client behind
//! network-level controls if that matters for your deployment.
//!
//! ## Error Handling
//!
//! A call resolves to exactly one of `Ok(Response)` (status below 400) or
//! `Err(Error)`. HTTP errors keep the full decoded response:
//!
//! ```no_run
//! use palisade::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new()?;
//! match client.get("https://api.example.com/endpoint").await {
//!     Ok(response) => {
//!         println!("Success: {:?}", response.data);
//!     }
//!     Err(Error::Http { status, response }) => {
//!         eprintln!("HTTP error {}: {:?}", status, response.data);
//!     }
//!     Err(Error::Timeout { timeout }) => {
//!         eprintln!("No response within {}ms", timeout.as_millis());
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod error;
mod request;
mod response;
mod retry;
mod validate;

pub use auth::{Auth, DEFAULT_API_KEY_HEADER};
pub use client::{
    Client, ClientBuilder, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, USER_AGENT,
};
pub use error::{Error, Result};
pub use request::{Body, Method, RequestSpec};
pub use response::{Response, ResponseBody};
pub use validate::{validate_url, ValidationError, MAX_URL_LENGTH};
