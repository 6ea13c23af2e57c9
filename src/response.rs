//! Response wrapper that preserves decoded data and transaction metadata.
//!
//! The [`Response`] type carries the decoded payload along with the status,
//! headers, and timing of the HTTP transaction. Responses embedded in
//! [`Error::Http`](crate::Error::Http) use the same shape, so error bodies
//! stay inspectable.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// Decoded response payload.
///
/// Decoding follows the declared content type: `application/json` bodies are
/// parsed into [`Json`](ResponseBody::Json), everything else is read as
/// [`Text`](ResponseBody::Text). A body that fails to parse or read becomes
/// [`Empty`](ResponseBody::Empty) rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Parsed JSON from an `application/json` response.
    Json(serde_json::Value),
    /// The body as text, decoded lossily.
    Text(String),
    /// No usable payload.
    Empty,
}

impl ResponseBody {
    /// Decodes raw bytes according to the declared content type.
    pub(crate) fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
        if is_json {
            match serde_json::from_slice(bytes) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Empty,
            }
        } else {
            ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    /// Returns the parsed JSON value, if this body is JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text payload, if this body is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` when there is no decoded payload, or the text payload
    /// is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Empty => true,
            ResponseBody::Text(text) => text.is_empty(),
            ResponseBody::Json(_) => false,
        }
    }
}

/// A completed HTTP exchange.
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
///
/// println!("Status: {}", response.status);
/// println!("Request took {:?}", response.elapsed);
/// if let Some(user) = response.data.as_json() {
///     println!("User: {}", user["name"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The canonical reason phrase for the status, empty when unknown.
    pub status_text: String,

    /// The response headers.
    pub headers: HeaderMap,

    /// The decoded response payload.
    pub data: ResponseBody,

    /// Time from the start of the first attempt until this response was
    /// assembled, including any retries and backoff.
    pub elapsed: Duration,
}

impl Response {
    /// Returns `true` if the status is below 400.
    pub fn is_ok(&self) -> bool {
        self.status.as_u16() < 400
    }

    /// Returns a header value by name.
    ///
    /// Lookup is case-insensitive. Values that are not valid UTF-8 return
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use palisade::{Response, ResponseBody};
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = Response {
    ///     status: StatusCode::OK,
    ///     status_text: "OK".to_string(),
    ///     headers,
    ///     data: ResponseBody::Empty,
    ///     elapsed: Duration::from_millis(100),
    /// };
    ///
    /// assert_eq!(response.header("Content-Type").unwrap(), "application/json");
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_status(status: u16) -> Response {
        let status = StatusCode::from_u16(status).unwrap();
        Response {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: HeaderMap::new(),
            data: ResponseBody::Empty,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn json_content_type_is_parsed() {
        let body = ResponseBody::decode(Some("application/json"), br#"{"ok": true}"#);
        assert_eq!(body, ResponseBody::Json(json!({"ok": true})));
    }

    #[test]
    fn json_content_type_with_charset_is_parsed() {
        let body = ResponseBody::decode(Some("application/json; charset=utf-8"), b"[1, 2]");
        assert_eq!(body, ResponseBody::Json(json!([1, 2])));
    }

    #[test]
    fn invalid_json_decodes_to_empty() {
        let body = ResponseBody::decode(Some("application/json"), b"not json");
        assert_eq!(body, ResponseBody::Empty);
        assert!(body.is_empty());
    }

    #[test]
    fn non_json_content_type_decodes_to_text() {
        let body = ResponseBody::decode(Some("text/html"), b"<html></html>");
        assert_eq!(body.as_text(), Some("<html></html>"));
    }

    #[test]
    fn missing_content_type_decodes_to_text() {
        let body = ResponseBody::decode(None, b"plain");
        assert_eq!(body, ResponseBody::Text("plain".to_string()));
    }

    #[test]
    fn text_decoding_is_lossy() {
        let body = ResponseBody::decode(Some("text/plain"), &[0xff, b'a']);
        assert_eq!(body.as_text(), Some("\u{fffd}a"));
    }

    #[test]
    fn ok_boundary_is_at_400() {
        assert!(response_with_status(200).is_ok());
        assert!(response_with_status(302).is_ok());
        assert!(response_with_status(399).is_ok());
        assert!(!response_with_status(400).is_ok());
        assert!(!response_with_status(500).is_ok());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut response = response_with_status(200);
        response.headers.insert(
            "x-request-id",
            http::HeaderValue::from_static("abc-123"),
        );
        assert_eq!(response.header("X-Request-Id"), Some("abc-123"));
        assert_eq!(response.header("missing"), None);
    }
}
