//! HTTP request building.
//!
//! Requests are usually produced by the dispatcher from a [`Route`](crate::Route),
//! but [`Request::builder`] is available for hand-made calls and test doubles.
//!
//! # Example
//!
//! ```
//! use walky_core::{Method, Request};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://api.example.com/api/events".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! assert_eq!(request.url().query(), Some("page=1"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;

/// Insert a header, replacing any existing entry whose name matches case-insensitively.
pub(crate) fn insert_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

/// An HTTP request with method, URL, headers, optional body and typed extensions.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    extensions: http::Extensions,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL, including the query string.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Typed extensions (route metadata for middleware).
    #[must_use]
    pub fn extensions(&self) -> &http::Extensions {
        &self.extensions
    }

    /// Mutable access to extensions.
    #[must_use]
    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        &mut self.extensions
    }

    /// Consume into (method, url, headers, body, extensions).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        url::Url,
        HashMap<String, String>,
        Option<B>,
        http::Extensions,
    ) {
        (
            self.method,
            self.url,
            self.headers,
            self.body,
            self.extensions,
        )
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    extensions: http::Extensions,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
            extensions: http::Extensions::new(),
        }
    }

    /// Sets a header, replacing any case-insensitive duplicate.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(&mut self.headers, name.into(), value.into());
        self
    }

    /// Sets multiple headers; later entries win.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            insert_header(&mut self.headers, name, value);
        }
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return self;
        }
        {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches a typed extension.
    #[must_use]
    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            extensions: self.extensions,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathTemplate;

    fn url(raw: &str) -> url::Url {
        url::Url::parse(raw).expect("valid URL")
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = Request::<Bytes>::builder(Method::Get, url("https://api.example.com/api/users"))
            .header("Content-Type", "application/json")
            .build();

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn later_header_replaces_case_insensitive_duplicate() {
        let request = Request::<Bytes>::builder(Method::Get, url("https://api.example.com/"))
            .header("authorization", "Bearer old")
            .header("Authorization", "Bearer new")
            .build();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn query_pairs_are_appended_in_order() {
        let request = Request::<Bytes>::builder(Method::Get, url("https://api.example.com/api/events"))
            .query("page", "2")
            .query_pairs([("search".to_string(), "jazz night".to_string())])
            .build();

        assert_eq!(request.url().query(), Some("page=2&search=jazz+night"));
    }

    #[test]
    fn empty_query_pairs_leave_url_untouched() {
        let request = Request::<Bytes>::builder(Method::Get, url("https://api.example.com/api/events"))
            .query_pairs(Vec::new())
            .build();

        assert_eq!(request.url().as_str(), "https://api.example.com/api/events");
    }

    #[test]
    fn extensions_survive_build() {
        let request = Request::<Bytes>::builder(Method::Get, url("https://api.example.com/"))
            .extension(PathTemplate::new("/api/events/{event_id}"))
            .build();

        let template = request.extensions().get::<PathTemplate>().expect("template");
        assert_eq!(template.as_str(), "/api/events/{event_id}");
    }

    #[test]
    fn json_body_sets_content_type() {
        #[derive(serde::Serialize)]
        struct Campus {
            name: String,
        }

        let request = Request::builder(Method::Post, url("https://api.example.com/api/campuses"))
            .json(&Campus {
                name: "North".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(br#"{"name":"North"}"#.as_slice())
        );
    }
}
