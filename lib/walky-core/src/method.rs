//! HTTP verbs used by the Walky routes.

use derive_more::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Method {
    /// Read a resource or a page of resources.
    #[display("GET")]
    Get,
    /// Create a resource or trigger an action.
    #[display("POST")]
    Post,
    /// Replace a resource.
    #[display("PUT")]
    Put,
    /// Partially update a resource.
    #[display("PATCH")]
    Patch,
    /// Remove (or soft-delete) a resource.
    #[display("DELETE")]
    Delete,
    /// Headers only.
    #[display("HEAD")]
    Head,
    /// Allowed methods.
    #[display("OPTIONS")]
    Options,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Options,
    ];

    /// Upper-case verb.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether requests with this method conventionally carry a body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch | Self::Delete)
    }

    /// Returns `true` if the method does not modify resources.
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for method in Method::ALL {
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn mutating_methods_carry_bodies() {
        assert!(Method::Post.has_body());
        assert!(Method::Patch.has_body());
        assert!(!Method::Get.has_body());
        assert!(Method::Get.is_safe());
        assert!(!Method::Delete.is_safe());
    }

    #[test]
    fn converts_into_http_method() {
        assert_eq!(http::Method::from(Method::Patch), http::Method::PATCH);
        assert_eq!(http::Method::from(Method::Delete), http::Method::DELETE);
    }
}
