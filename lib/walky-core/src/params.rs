//! Request configuration layers.
//!
//! Headers are merged lowest to highest:
//!
//! 1. client-wide defaults ([`RequestDefaults::header`]),
//! 2. client defaults for the HTTP method ([`RequestDefaults::method_header`]),
//! 3. the caller's per-call [`RequestParams`],
//! 4. the fragment returned by the security worker.
//!
//! Names compare case-insensitively; the higher layer wins.

use std::collections::HashMap;

use crate::request::insert_header;
use crate::{ContentType, Method, ResponseFormat};

/// Per-call overrides, also used for the security worker's fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Extra query pairs, appended after the route's own.
    pub query: Vec<(String, String)>,
    /// Force the call to be (or not be) authenticated.
    pub secure: Option<bool>,
    /// Override the declared request content type.
    pub content_type: Option<ContentType>,
    /// Override the declared response format.
    pub format: Option<ResponseFormat>,
}

impl RequestParams {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query pair.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Force authentication on or off.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Override the request content type.
    #[must_use]
    pub const fn content(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Override the response format.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Overlay `other` on top of `self`: scalar overrides in `other` win,
    /// headers and query pairs are appended after ours.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self.query.extend(other.query);
        self.secure = other.secure.or(self.secure);
        self.content_type = other.content_type.or(self.content_type);
        self.format = other.format.or(self.format);
        self
    }
}

/// Client-level defaults applied to every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDefaults {
    headers: Vec<(String, String)>,
    method_headers: HashMap<Method, Vec<(String, String)>>,
    secure: bool,
}

impl RequestDefaults {
    /// Empty defaults; calls are public unless a route says otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Header sent with every request using `method`.
    #[must_use]
    pub fn method_header(
        mut self,
        method: Method,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.method_headers
            .entry(method)
            .or_default()
            .push((name.into(), value.into()));
        self
    }

    /// Treat routes without an explicit flag as secure.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Default `secure` flag.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Merge the default layers with the given higher layers, in order.
    #[must_use]
    pub fn merged_headers<'a>(
        &self,
        method: Method,
        layers: impl IntoIterator<Item = &'a RequestParams>,
    ) -> HashMap<String, String> {
        let mut merged = HashMap::new();
        let method_defaults = self.method_headers.get(&method).into_iter().flatten();
        let higher = layers.into_iter().flat_map(|params| params.headers.iter());

        for (name, value) in self.headers.iter().chain(method_defaults).chain(higher) {
            insert_header(&mut merged, name.clone(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn override_beats_defaults_and_method_defaults_survive() {
        let defaults = RequestDefaults::new()
            .header("X-Client", "admin-console")
            .method_header(Method::Post, "X-Trace", "method-default");
        let call = RequestParams::new().header("x-client", "override");

        let merged = defaults.merged_headers(Method::Post, [&call]);

        assert_eq!(merged.len(), 2);
        assert_eq!(get(&merged, "X-Client"), Some("override"));
        assert_eq!(get(&merged, "X-Trace"), Some("method-default"));
    }

    #[test]
    fn method_defaults_only_apply_to_their_method() {
        let defaults = RequestDefaults::new().method_header(Method::Post, "X-Trace", "post-only");

        let merged = defaults.merged_headers(Method::Get, []);

        assert!(merged.is_empty());
    }

    #[test]
    fn method_default_overrides_client_default() {
        let defaults = RequestDefaults::new()
            .header("Accept", "*/*")
            .method_header(Method::Get, "Accept", "application/json");

        let merged = defaults.merged_headers(Method::Get, []);

        assert_eq!(get(&merged, "accept"), Some("application/json"));
    }

    #[test]
    fn security_layer_is_highest() {
        let defaults = RequestDefaults::new();
        let call = RequestParams::new().header("Authorization", "Bearer stale");
        let security = RequestParams::new().header("Authorization", "Bearer fresh");

        let merged = defaults.merged_headers(Method::Get, [&call, &security]);

        assert_eq!(get(&merged, "Authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn merge_prefers_later_scalars() {
        let base = RequestParams::new().secure(true).query("page", "1");
        let merged = base.merge(
            RequestParams::new()
                .secure(false)
                .format(ResponseFormat::Text)
                .query("limit", "20"),
        );

        assert_eq!(merged.secure, Some(false));
        assert_eq!(merged.format, Some(ResponseFormat::Text));
        assert_eq!(merged.query.len(), 2);
        assert_eq!(merged.content_type, None);
    }
}
