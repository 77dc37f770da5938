//! Typed endpoint catalog.
//!
//! Each module declares its routes as `const` [`Route`] records and adds thin
//! methods to [`WalkyApi`](crate::WalkyApi) that bind parameters and delegate
//! to [`WalkyApi::execute`](crate::WalkyApi::execute). Per-call overrides go
//! through [`WalkyApi::with_params`](crate::WalkyApi::with_params):
//!
//! ```ignore
//! let event = api
//!     .with_params(RequestParams::new().header("X-Request-Id", "42"))
//!     .events_detail("evt1", &EventDetailQuery::default())
//!     .await?;
//! ```

use serde::Serialize;
use walky_core::Route;

pub mod alerts;
pub mod analytics;
pub mod audit;
pub mod auth;
pub mod campuses;
pub mod chat;
pub mod events;
pub mod health;
pub mod invites;
pub mod location;
pub mod places;
pub mod reports;
pub mod spaces;
pub mod surprise;
pub mod users;

/// Every declared route, grouped by domain.
pub const DOMAINS: &[(&str, &[Route])] = &[
    ("alerts", alerts::ROUTES),
    ("analytics", analytics::ROUTES),
    ("audit", audit::ROUTES),
    ("auth", auth::ROUTES),
    ("campuses", campuses::ROUTES),
    ("chat", chat::ROUTES),
    ("events", events::ROUTES),
    ("health", health::ROUTES),
    ("invites", invites::ROUTES),
    ("location", location::ROUTES),
    ("places", places::ROUTES),
    ("reports", reports::ROUTES),
    ("spaces", spaces::ROUTES),
    ("surprise", surprise::ROUTES),
    ("users", users::ROUTES),
];

/// Iterate over every declared route.
pub fn routes() -> impl Iterator<Item = &'static Route> {
    DOMAINS.iter().flat_map(|(_, routes)| routes.iter())
}

/// Look a route up by operation name, e.g. `eventsDetail`.
#[must_use]
pub fn find(name: &str) -> Option<&'static Route> {
    routes().find(|route| route.name == name)
}

/// `page`/`limit` for simple paginated endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Page `page` of `limit` rows.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// Body of flag, ban and delete actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReasonBody {
    /// Reason recorded in the audit trail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReasonBody {
    /// Body carrying `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use walky_core::{ContentType, Method};

    #[test]
    fn route_names_are_unique() {
        let mut seen = HashSet::new();
        for route in routes() {
            assert!(seen.insert(route.name), "duplicate route name {}", route.name);
        }
        assert!(seen.len() > 100);
    }

    #[test]
    fn method_and_template_pairs_are_unique() {
        let mut seen = HashSet::new();
        for route in routes() {
            assert!(
                seen.insert((route.method, route.path.as_str())),
                "duplicate route {route}"
            );
        }
    }

    #[test]
    fn templates_are_rooted_and_balanced() {
        for route in routes() {
            let path = route.path.as_str();
            assert!(path.starts_with('/'), "{route}");
            assert_eq!(path.matches('{').count(), path.matches('}').count(), "{route}");
            assert!(!path.ends_with('/') || path == "/", "{route}");
        }
    }

    #[test]
    fn bodies_only_on_methods_that_carry_one() {
        for route in routes() {
            if route.content_type == Some(ContentType::FormData) {
                assert!(route.method.has_body(), "{route}");
            }
        }
    }

    #[test]
    fn admin_routes_are_secure() {
        for route in routes().filter(|r| r.path.as_str().starts_with("/admin/")) {
            if route.name == auth::BOOTSTRAP_ADMIN.name {
                assert_eq!(route.secure, Some(false));
            } else {
                assert_eq!(route.secure, Some(true), "{route}");
            }
        }
    }

    #[test]
    fn find_by_name() {
        let route = find("eventsDetail").expect("route");
        assert_eq!(route.method, Method::Get);
        assert_eq!(route.path.as_str(), "/api/events/{event_id}");
        assert!(find("nope").is_none());
    }
}
