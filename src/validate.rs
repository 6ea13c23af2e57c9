//! Pre-flight URL validation.
//!
//! Every outbound request passes through [`validate_url`] before any network
//! I/O happens. The checks are purely syntactic: the URL must be non-empty,
//! within the length limit, well-formed, `http`/`https`, and must not target
//! a private or loopback address (SSRF mitigation).
//!
//! # Known gaps
//!
//! Hostnames are not resolved: a public DNS name that points at a private
//! address passes validation, since resolving here would turn a pure check
//! into network I/O and still leave a DNS-rebinding window. Likewise only
//! `127.0.0.1` itself is rejected, not the rest of `127.0.0.0/8`.
//!
//! The URL parser normalizes IPv4 literals before the check, so obfuscated
//! spellings such as `http://0x7f.0.0.1/` are still caught.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// A URL rejected before any network activity.
///
/// Each variant identifies the specific defect; checks run in declaration
/// order and stop at the first failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The URL string was empty.
    #[error("URL must be a non-empty string")]
    Empty,

    /// The URL exceeded [`MAX_URL_LENGTH`].
    #[error("URL exceeds maximum length of {limit} characters")]
    TooLong {
        /// The configured length limit.
        limit: usize,
    },

    /// The string did not parse as an absolute URL.
    #[error("Invalid URL format: {url}")]
    Malformed {
        /// The offending input.
        url: String,
        /// The underlying parse error.
        source: url::ParseError,
    },

    /// The URL used a scheme other than `http` or `https`.
    #[error("Protocol {scheme} is not allowed")]
    DisallowedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// The URL targeted a private or loopback address.
    #[error("Requests to private addresses are not allowed: {host}")]
    PrivateAddress {
        /// The rejected host.
        host: String,
    },
}

/// Validates a candidate URL, returning the parsed form on success.
///
/// Performs no I/O and no DNS resolution; validating the same input twice
/// yields the same outcome.
///
/// # Examples
///
/// ```
/// use palisade::{validate_url, ValidationError};
///
/// assert!(validate_url("https://api.example.com/v1").is_ok());
/// assert!(matches!(
///     validate_url("http://169.254.169.254/latest/meta-data"),
///     Err(ValidationError::PrivateAddress { .. })
/// ));
/// ```
pub fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    let url = parse_url(raw)?;
    ensure_public_host(&url)?;
    Ok(url)
}

/// Structural checks only: non-empty, length, parse, scheme.
pub(crate) fn parse_url(raw: &str) -> Result<Url, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }

    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            limit: MAX_URL_LENGTH,
        });
    }

    let url = Url::parse(raw).map_err(|source| ValidationError::Malformed {
        url: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::DisallowedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Rejects private and loopback hosts.
pub(crate) fn ensure_public_host(url: &Url) -> Result<(), ValidationError> {
    if host_is_private(url) {
        return Err(ValidationError::PrivateAddress {
            host: url.host_str().unwrap_or_default().to_string(),
        });
    }
    Ok(())
}

/// Private-host detection over the parsed host.
///
/// Domains are matched against `localhost` only; the parser has already
/// lowercased them. IPv4 literals are rejected for 10.0.0.0/8,
/// 172.16.0.0/12, 192.168.0.0/16, 169.254.0.0/16, and 127.0.0.1 exactly.
/// IPv6 literals are rejected for `::1`.
fn host_is_private(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(ip)) => {
            ip.is_private() || ip.is_link_local() || ip == Ipv4Addr::LOCALHOST
        }
        Some(Host::Ipv6(ip)) => ip == Ipv6Addr::LOCALHOST,
        None => false,
    }
}
