//! Declarative route metadata.
//!
//! Every backend endpoint is described once as a `const` [`Route`]; one
//! generic dispatcher turns a route plus call arguments into a request.
//!
//! ```
//! use walky_core::{ContentType, Method, Route};
//!
//! const SPACE_IMAGE: Route = Route::post("spacesImageUpload", "/api/spaces/{space_id}/image")
//!     .secure()
//!     .content(ContentType::FormData);
//!
//! assert_eq!(SPACE_IMAGE.method, Method::Post);
//! assert_eq!(SPACE_IMAGE.secure, Some(true));
//! ```

use crate::{ContentType, Method, PathTemplate};

/// How the response body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseFormat {
    /// JSON document.
    #[default]
    Json,
    /// Plain text.
    Text,
}

/// One backend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    /// Operation name, e.g. `eventsDetail`.
    pub name: &'static str,
    /// HTTP verb.
    pub method: Method,
    /// Path template.
    pub path: PathTemplate,
    /// `Some(true)` for endpoints that require auth; `None` defers to the client default.
    pub secure: Option<bool>,
    /// Declared request content type, if the endpoint takes a body.
    pub content_type: Option<ContentType>,
    /// Expected response body format.
    pub format: ResponseFormat,
}

impl Route {
    /// Route with the given verb.
    #[must_use]
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path: PathTemplate::new(path),
            secure: None,
            content_type: None,
            format: ResponseFormat::Json,
        }
    }

    /// `GET` route.
    #[must_use]
    pub const fn get(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::Get, path)
    }

    /// `POST` route with a JSON body.
    #[must_use]
    pub const fn post(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::Post, path).content(ContentType::Json)
    }

    /// `PUT` route with a JSON body.
    #[must_use]
    pub const fn put(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::Put, path).content(ContentType::Json)
    }

    /// `PATCH` route with a JSON body.
    #[must_use]
    pub const fn patch(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::Patch, path).content(ContentType::Json)
    }

    /// `DELETE` route.
    #[must_use]
    pub const fn delete(name: &'static str, path: &'static str) -> Self {
        Self::new(name, Method::Delete, path)
    }

    /// Mark the route as requiring authentication.
    #[must_use]
    pub const fn secure(mut self) -> Self {
        self.secure = Some(true);
        self
    }

    /// Mark the route as public even when the client is secure by default.
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.secure = Some(false);
        self
    }

    /// Declare the request content type.
    #[must_use]
    pub const fn content(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Declare the response format.
    #[must_use]
    pub const fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Route identity carried in request extensions for middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteName(pub &'static str);

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS_DETAIL: Route = Route::get("eventsDetail", "/api/events/{event_id}").secure();

    #[test]
    fn const_builders_set_metadata() {
        assert_eq!(EVENTS_DETAIL.method, Method::Get);
        assert_eq!(EVENTS_DETAIL.secure, Some(true));
        assert_eq!(EVENTS_DETAIL.content_type, None);
        assert_eq!(EVENTS_DETAIL.format, ResponseFormat::Json);
    }

    #[test]
    fn body_verbs_default_to_json() {
        let route = Route::post("campusesCreate", "/api/campuses");
        assert_eq!(route.content_type, Some(ContentType::Json));
        assert_eq!(route.secure, None);
    }

    #[test]
    fn display_shows_verb_and_template() {
        assert_eq!(EVENTS_DETAIL.to_string(), "GET /api/events/{event_id}");
    }

    #[test]
    fn public_and_text_overrides() {
        let route = Route::get("health", "/health")
            .public()
            .format(ResponseFormat::Text);
        assert_eq!(route.secure, Some(false));
        assert_eq!(route.format, ResponseFormat::Text);
    }
}
