//! Error types for the Walky client.
//!
//! The backend has no single error schema: bodies look like
//! `{ "message": "...", "error"?: "...", "errors"?: [...] }` where `errors`
//! holds either strings or objects. [`Error::kind`] folds every failure into a
//! small closed set so callers can branch without parsing bodies.

use derive_more::{Display, Error, From};
use serde::Deserialize;

/// Closed classification of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// 400 or 422: the backend rejected the input.
    #[display("validation")]
    Validation,
    /// 401 or 403.
    #[display("auth")]
    Auth,
    /// 404.
    #[display("not found")]
    NotFound,
    /// 409, e.g. a duplicate space title on a campus.
    #[display("conflict")]
    Conflict,
    /// Any other 4xx.
    #[display("client")]
    Client,
    /// 5xx.
    #[display("server")]
    Server,
    /// Connection, TLS or timeout failure; no response was received.
    #[display("transport")]
    Transport,
    /// Request could not be built or response could not be decoded.
    #[display("encoding")]
    Encoding,
}

impl ErrorKind {
    /// Classify an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 | 403 => Self::Auth,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Server,
            _ => Self::Client,
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Detail, only sent by development deployments.
    #[serde(default)]
    pub error: Option<String>,
    /// Validation errors, strings or objects depending on the endpoint.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    /// Validation messages, flattening object entries to their `msg`/`message` field.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|entry| match entry {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Object(fields) => fields
                    .get("msg")
                    .or_else(|| fields.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| entry.to_string(), str::to_string),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Main error type for Walky client operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Non-2xx response.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Backend message, or a generic one.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration (missing path parameter, bad header...).
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "data.0.campus").
        path: String,
        /// Error message.
        message: String,
    },

    /// Query string or url-encoded body serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Build the error for a non-2xx response, preferring the backend's `message`.
    #[must_use]
    pub fn from_response(status: u16, body: bytes::Bytes) -> Self {
        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .map(|decoded| decoded.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::http_with_body(status, message, body)
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Closed classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { status, .. } => ErrorKind::from_status(*status),
            Self::Connection(_) | Self::Tls(_) | Self::Timeout => ErrorKind::Transport,
            Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::JsonDeserialization { .. }
            | Self::FormSerialization(_)
            | Self::InvalidUrl(_) => ErrorKind::Encoding,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// `None` when there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }

    /// The backend error body, when one was returned and parses.
    #[must_use]
    pub fn api_body(&self) -> Option<ApiErrorBody> {
        self.decode_body::<ApiErrorBody>().and_then(Result::ok)
    }
}
