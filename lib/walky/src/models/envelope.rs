//! Response envelopes.
//!
//! The backend is not consistent: lists come back paginated, wrapped in
//! `{ success, data }` or as bare arrays, and mutations answer
//! `{ message, data? }`. Each catalog method returns the envelope its
//! endpoint actually sends.

use serde::{Deserialize, Serialize};

/// `{ data, total, page, limit }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Rows of this page.
    pub data: Vec<T>,
    /// Rows across every page.
    #[serde(default)]
    pub total: u64,
    /// 1-based page number.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Maximum number of rows returned.
    #[serde(default)]
    pub limit: u32,
}

const fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    /// Number of pages for `total` rows; at least one.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.limit)).max(1)
    }

    /// Whether another page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

/// `{ success, data }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Backend success flag.
    #[serde(default)]
    pub success: bool,
    /// Payload.
    pub data: T,
}

/// `{ message, data? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope<T = serde_json::Value> {
    /// Human-readable outcome.
    #[serde(default)]
    pub message: String,
    /// Affected object, when the backend returns it.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::User;

    #[test]
    fn paginated_pages() {
        let page: Paginated<u32> =
            serde_json::from_value(json!({ "data": [1, 2], "total": 41, "page": 2, "limit": 20 }))
                .expect("page");

        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn paginated_defaults() {
        let page: Paginated<u32> = serde_json::from_value(json!({ "data": [] })).expect("page");
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn message_without_data() {
        let envelope: MessageEnvelope =
            serde_json::from_value(json!({ "message": "Event deleted" })).expect("envelope");
        assert_eq!(envelope.message, "Event deleted");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn message_with_typed_model() {
        let user = json!({ "_id": "u1", "name": "Ada", "email": "ada@mit.edu", "role": "student" });

        let created: MessageEnvelope<User> =
            serde_json::from_value(json!({ "message": "User created", "data": user }))
                .expect("with data");
        assert_eq!(created.data.map(|user| user.id).as_deref(), Some("u1"));

        let deleted: MessageEnvelope<User> =
            serde_json::from_value(json!({ "message": "User deleted" })).expect("without data");
        assert!(deleted.data.is_none());
    }
}
