use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-friendly name.
    #[serde(default)]
    pub slug: Option<String>,
    /// E-mail domains that identify students of this campus.
    #[serde(default)]
    pub domains: Vec<String>,
    /// GeoJSON position.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// IANA time zone, e.g. `Europe/Paris`.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Logo image URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Cover image URL.
    #[serde(default)]
    pub cover: Option<String>,
    /// Whether it is currently in effect.
    #[serde(default)]
    pub is_active: bool,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Campus {
    /// Whether `email` belongs to one of the campus domains.
    #[must_use]
    pub fn accepts_email(&self, email: &str) -> bool {
        email.rsplit_once('@').is_some_and(|(_, domain)| {
            self.domains
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(domain))
        })
    }
}

/// Body for creating or updating a campus.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusInput {
    /// Display name.
    pub name: String,
    /// Email domains accepted for sign-up.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    /// GeoJSON position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// IANA time zone, e.g. `Europe/Paris`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Whether it is currently in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A student ambassador for a campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambassador {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// User id.
    pub user: String,
    /// Campus id.
    pub campus: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether it is currently in effect.
    #[serde(default)]
    pub is_active: bool,
}

/// An interest users pick on their profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Grouping shown in the picker.
    #[serde(default)]
    pub category: Option<String>,
    /// Icon name or URL.
    #[serde(default)]
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn email_domain_matching() {
        let campus: Campus = serde_json::from_value(json!({
            "_id": "c1",
            "name": "MIT",
            "domains": ["mit.edu"]
        }))
        .expect("campus");

        assert!(campus.accepts_email("ada@MIT.edu"));
        assert!(!campus.accepts_email("ada@harvard.edu"));
        assert!(!campus.accepts_email("not-an-email"));
    }

    #[test]
    fn input_omits_unset_fields() {
        let input = CampusInput {
            name: "Stanford".into(),
            ..CampusInput::default()
        };
        assert_eq!(
            serde_json::to_value(&input).expect("json"),
            json!({ "name": "Stanford" })
        );
    }
}
