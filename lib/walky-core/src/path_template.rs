//! Route path templates such as `/api/events/{event_id}`.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Characters escaped inside a single path segment.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) pass through; separators and
/// template delimiters are encoded so a value can never add a segment.
/// Values that would remove one (empty, `.`, `..`) are rejected by
/// [`PathTemplate::interpolate`].
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// The declared path of a route, before parameter substitution.
///
/// The dispatcher stores it in request extensions so middleware can log the
/// template (`/api/events/{event_id}`) rather than the resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Names of the `{placeholders}` in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.0.split('/').filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
        })
    }

    /// Substitute every placeholder with its percent-encoded value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a placeholder has no value, or
    /// when the value is empty, `.` or `..`.
    pub fn interpolate(&self, params: &[(&str, String)]) -> Result<String> {
        let mut resolved = String::with_capacity(self.0.len() + 16);
        for (index, segment) in self.0.split('/').enumerate() {
            if index > 0 {
                resolved.push('/');
            }
            match segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
            {
                Some(name) => {
                    let (_, value) = params.iter().find(|(key, _)| *key == name).ok_or_else(|| {
                        Error::invalid_request(format!(
                            "missing path parameter `{name}` for {}",
                            self.0
                        ))
                    })?;
                    if matches!(value.as_str(), "" | "." | "..") {
                        return Err(Error::invalid_request(format!(
                            "path parameter `{name}` for {} cannot be {value:?}",
                            self.0
                        )));
                    }
                    resolved.extend(utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET));
                }
                None => resolved.push_str(segment),
            }
        }
        Ok(resolved)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_single_parameter() {
        let template = PathTemplate::new("/api/events/{event_id}");
        let path = template
            .interpolate(&[("event_id", "abc123".to_string())])
            .expect("interpolate");

        assert_eq!(path, "/api/events/abc123");
        assert!(!path.contains('{'));
    }

    #[test]
    fn interpolates_several_parameters() {
        let template = PathTemplate::new("/api/spaces/{space_id}/members/{user_id}");
        let path = template
            .interpolate(&[
                ("user_id", "u-9".to_string()),
                ("space_id", "s-1".to_string()),
            ])
            .expect("interpolate");

        assert_eq!(path, "/api/spaces/s-1/members/u-9");
    }

    #[test]
    fn encodes_separators_in_values() {
        let template = PathTemplate::new("/api/places/{place_id}");
        let path = template
            .interpolate(&[("place_id", "a/b c?".to_string())])
            .expect("interpolate");

        assert_eq!(path, "/api/places/a%2Fb%20c%3F");
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let template = PathTemplate::new("/api/events/{event_id}");
        let err = template.interpolate(&[]).expect_err("missing param");

        assert!(err.to_string().contains("event_id"));
    }

    #[test]
    fn dot_segments_and_empty_values_are_rejected() {
        let template = PathTemplate::new("/admin/events/{event_id}");
        for value in ["", ".", ".."] {
            let err = template
                .interpolate(&[("event_id", value.to_string())])
                .expect_err("segment-removing value");
            assert!(matches!(err, Error::InvalidRequest(_)), "{value:?}");
        }
    }

    #[test]
    fn dots_inside_a_value_are_kept() {
        let template = PathTemplate::new("/api/places/{place_id}");
        let path = template
            .interpolate(&[("place_id", "fr...paris".to_string())])
            .expect("interpolate");

        assert_eq!(path, "/api/places/fr...paris");
    }

    #[test]
    fn lists_placeholders() {
        let template = PathTemplate::new("/api/chat/{room_id}/messages/{message_id}");
        let names: Vec<_> = template.placeholders().collect();

        assert_eq!(names, ["room_id", "message_id"]);
    }

    #[test]
    fn static_path_is_unchanged() {
        let template = PathTemplate::new("/health");
        assert_eq!(template.interpolate(&[]).expect("static"), "/health");
        assert_eq!(template.to_string(), "/health");
    }
}
