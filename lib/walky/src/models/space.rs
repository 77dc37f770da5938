use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Visibility;

/// Category a space belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCategory {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A category reference, either the bare id or the populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Unpopulated reference.
    Id(String),
    /// Populated category.
    Populated(SpaceCategory),
}

impl CategoryRef {
    /// The category id in either form.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(category) => &category.id,
        }
    }
}

/// A community group scoped to a campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Campus id.
    pub campus: String,
    /// Category, populated or not.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Who can see it.
    #[serde(default)]
    pub visibility: Visibility,
    /// Accepted members.
    #[serde(default)]
    pub members_count: u32,
    /// Join requests waiting for approval.
    #[serde(default)]
    pub pending_count: u32,
    /// Admin user ids.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Cover image URL.
    #[serde(default)]
    pub cover: Option<String>,
    /// Whether moderators flagged it.
    #[serde(default)]
    pub is_flagged: bool,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
    /// Hash of title and campus computed by the backend; one space per key.
    #[serde(default)]
    pub uniqueness_key: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Space {
    /// Whether both spaces claim the same title on the same campus.
    ///
    /// Spaces without a key never collide.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        match (&self.uniqueness_key, &other.uniqueness_key) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }

    /// Whether `user_id` administers this space.
    #[must_use]
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admins.iter().any(|id| id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn space(key: Option<&str>) -> Space {
        serde_json::from_value(json!({
            "_id": "sp1",
            "title": "Chess club",
            "campus": "mit",
            "category": { "_id": "cat1", "name": "Games" },
            "membersCount": 12,
            "uniquenessKey": key
        }))
        .expect("space")
    }

    #[test]
    fn category_reference_forms() {
        assert_eq!(space(None).category.as_ref().map(CategoryRef::id), Some("cat1"));

        let bare: CategoryRef = serde_json::from_value(json!("cat2")).expect("id");
        assert_eq!(bare.id(), "cat2");
    }

    #[test]
    fn same_slot_compares_keys() {
        assert!(space(Some("a1b2")).same_slot(&space(Some("a1b2"))));
        assert!(!space(Some("a1b2")).same_slot(&space(Some("ffff"))));
        assert!(!space(None).same_slot(&space(None)));
    }
}
