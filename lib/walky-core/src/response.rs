//! HTTP response handling.
//!
//! [`Response`] exposes status, headers and the buffered body, plus decoding
//! according to a route's [`ResponseFormat`].

use std::collections::HashMap;

use bytes::Bytes;

use crate::ResponseFormat;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// An empty body decodes as JSON `null`, so `()` and `Option<T>` accept
    /// `204 No Content` replies.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> crate::Result<T> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return crate::from_json(b"null");
        }
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Decode the body the way the route declares.
    ///
    /// Text bodies are handed to `T` as a JSON string, so `T = String` reads
    /// plain-text endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(self, format: ResponseFormat) -> crate::Result<T> {
        match format {
            ResponseFormat::Json => self.json(),
            ResponseFormat::Text => {
                let text = String::from_utf8_lossy(&self.body).into_owned();
                serde_json::from_value(serde_json::Value::String(text)).map_err(|e| {
                    crate::Error::json_deserialization(String::new(), e.to_string())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, Bytes::from(r#"{"status":"ok"}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn status_classes() {
        assert!(Response::new(404, HashMap::new(), Bytes::new()).is_client_error());
        assert!(Response::new(500, HashMap::new(), Bytes::new()).is_server_error());
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let response = Response::new(204, HashMap::new(), Bytes::new());
        let () = response.json().expect("unit");
    }

    #[test]
    fn text_format_reads_plain_bodies() {
        let response = Response::new(200, HashMap::new(), Bytes::from("pong"));
        let text: String = response.decode(ResponseFormat::Text).expect("text");
        assert_eq!(text, "pong");
    }

    #[test]
    fn json_format_reads_objects() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Health {
            status: String,
        }

        let response = Response::new(200, HashMap::new(), Bytes::from(r#"{"status":"ok"}"#));
        let health: Health = response.decode(ResponseFormat::Json).expect("json");
        assert_eq!(
            health,
            Health {
                status: "ok".to_string()
            }
        );
    }
}
