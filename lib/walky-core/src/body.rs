//! Body serialization and the content-type normalizer.
//!
//! [`normalize`] shapes an outgoing [`RequestBody`] according to the
//! [`ContentType`] a route declares:
//!
//! | Content type | Behaviour |
//! |--------------|-----------|
//! | JSON | value passes through and is serialized |
//! | multipart | a native [`Form`] passes through; flat objects are built field by field |
//! | text | strings pass through; anything else is JSON-serialized first |
//! | url-encoded | flat object encoded with `serde_html_form` |
//! | octet stream | raw bytes pass through |

use bytes::Bytes;
use serde_json::Value;

use crate::{Error, Form, FormFields, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`.
    Json,
    /// `multipart/form-data`.
    FormData,
    /// `application/x-www-form-urlencoded`.
    UrlEncoded,
    /// `text/plain`.
    Text,
    /// `application/octet-stream`.
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormData => "multipart/form-data",
            Self::UrlEncoded => "application/x-www-form-urlencoded",
            Self::Text => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outgoing body before normalization.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Any JSON value.
    Json(Value),
    /// A string, sent verbatim as text.
    Text(String),
    /// A flat object destined for multipart encoding.
    Fields(FormFields),
    /// A ready-made multipart container.
    Multipart(Form),
    /// Raw bytes.
    Binary(Bytes),
}

impl RequestBody {
    /// JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Whether there is nothing to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A normalized body ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// Value for the `Content-Type` header.
    pub content_type: String,
    /// Serialized bytes.
    pub bytes: Bytes,
}

impl EncodedBody {
    fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Shape `body` for the declared `content_type`.
///
/// Returns `None` for an empty body.
///
/// # Errors
///
/// Returns an error when a body cannot be expressed in the declared encoding
/// (e.g. a non-object or raw bytes sent as multipart, nested values sent
/// url-encoded, or a multipart form sent as JSON).
pub fn normalize(content_type: ContentType, body: RequestBody) -> Result<Option<EncodedBody>> {
    let encoded = match (content_type, body) {
        (_, RequestBody::Empty) => return Ok(None),
        (ContentType::FormData, RequestBody::Binary(_)) => {
            return Err(Error::invalid_request(
                "raw bytes cannot be sent as multipart form data without a boundary",
            ));
        }
        (_, RequestBody::Binary(bytes)) => EncodedBody::new(content_type.as_str(), bytes),

        (ContentType::FormData, RequestBody::Multipart(form)) => multipart(form),
        (ContentType::FormData, RequestBody::Fields(fields)) => multipart(Form::from_fields(fields)),
        (ContentType::FormData, RequestBody::Json(value)) => {
            multipart(Form::from_fields(FormFields::from_json(value)?))
        }
        (ContentType::FormData, RequestBody::Text(text)) => {
            multipart(Form::from_fields(FormFields::from_json(serde_json::from_str(&text)?)?))
        }

        (ContentType::Text, RequestBody::Text(text)) => EncodedBody::new("text/plain", text),
        (ContentType::Text, RequestBody::Json(value)) => {
            EncodedBody::new("text/plain", to_json(&value)?)
        }

        (ContentType::Json | ContentType::OctetStream, RequestBody::Json(value)) => {
            EncodedBody::new("application/json", to_json(&value)?)
        }
        (ContentType::Json | ContentType::OctetStream, RequestBody::Text(text)) => {
            EncodedBody::new("application/json", to_json(&text)?)
        }

        (ContentType::UrlEncoded, RequestBody::Json(value)) => EncodedBody::new(
            ContentType::UrlEncoded.as_str(),
            serde_html_form::to_string(&value)?,
        ),
        (ContentType::UrlEncoded, RequestBody::Text(text)) => {
            EncodedBody::new(ContentType::UrlEncoded.as_str(), text)
        }

        (declared, RequestBody::Fields(_) | RequestBody::Multipart(_)) => {
            return Err(Error::invalid_request(format!(
                "multipart body cannot be sent as {declared}"
            )));
        }
    };
    Ok(Some(encoded))
}

fn multipart(form: Form) -> EncodedBody {
    let (content_type, bytes) = form.into_body();
    EncodedBody::new(content_type, bytes)
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// Uses `serde_html_form`, so `Vec<T>` fields become repeated parameters
/// (`?campus=a&campus=b`) and `None` fields marked
/// `skip_serializing_if` disappear.
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use walky_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Page {
///     page: u32,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     search: Option<String>,
/// }
///
/// let query = to_query_string(&Page { page: 2, search: None }).expect("serialize");
/// assert_eq!(query, "page=2");
/// ```
pub fn to_query_string<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Serialize a value into decoded query pairs.
///
/// # Errors
///
/// Returns an error if query serialization fails.
pub fn to_query_pairs<T: serde::Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>> {
    let encoded = to_query_string(value)?;
    Ok(url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// # Errors
///
/// Returns an error naming the path of the field that failed
/// (e.g. `data.0.role`).
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::FileValue;

    #[test]
    fn json_passes_through() {
        let value = json!({ "name": "North Campus", "city": "Lyon" });
        let_assert!(Ok(Some(encoded)) = normalize(ContentType::Json, RequestBody::Json(value.clone())));

        check!(encoded.content_type == "application/json");
        let decoded: Value = serde_json::from_slice(&encoded.bytes).expect("json");
        check!(decoded == value);
    }

    #[test]
    fn empty_body_produces_nothing() {
        let_assert!(Ok(None) = normalize(ContentType::Json, RequestBody::Empty));
    }

    #[test]
    fn text_serializes_non_strings() {
        let_assert!(
            Ok(Some(encoded)) = normalize(ContentType::Text, RequestBody::Json(json!({ "a": [1, 2] })))
        );
        check!(encoded.content_type == "text/plain");
        check!(encoded.bytes == r#"{"a":[1,2]}"#);
    }

    #[test]
    fn text_keeps_strings_verbatim() {
        let_assert!(
            Ok(Some(encoded)) = normalize(ContentType::Text, RequestBody::Text("hello".to_string()))
        );
        check!(encoded.bytes == "hello");
    }

    #[test]
    fn multipart_from_fields_sets_boundary() {
        let fields = FormFields::new()
            .text("name", "Sports")
            .file("image", FileValue::new("sports.png", vec![1, 2, 3]));

        let_assert!(Ok(Some(encoded)) = normalize(ContentType::FormData, RequestBody::Fields(fields)));
        check!(encoded.content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&encoded.bytes);
        check!(body.contains("filename=\"sports.png\""));
        check!(body.contains("\r\n\r\nSports\r\n"));
    }

    #[test]
    fn native_form_passes_through() {
        let form = Form::with_boundary("fixed").text("a", "1");
        let expected = form.clone().into_body();

        let_assert!(Ok(Some(encoded)) = normalize(ContentType::FormData, RequestBody::Multipart(form)));
        check!(encoded.content_type == expected.0);
        check!(encoded.bytes == expected.1);
    }

    #[test]
    fn url_encoded_flat_object() {
        let_assert!(
            Ok(Some(encoded)) = normalize(
                ContentType::UrlEncoded,
                RequestBody::Json(json!({ "email": "a@b.c", "code": "42" }))
            )
        );
        check!(encoded.content_type == "application/x-www-form-urlencoded");
        check!(encoded.bytes == "code=42&email=a%40b.c");
    }

    #[test]
    fn multipart_form_rejected_as_json() {
        let result = normalize(ContentType::Json, RequestBody::Multipart(Form::new()));
        let_assert!(Err(Error::InvalidRequest(message)) = result);
        check!(message.contains("application/json"));
    }

    #[test]
    fn raw_bytes_rejected_as_multipart() {
        let result = normalize(
            ContentType::FormData,
            RequestBody::Binary(Bytes::from_static(b"\x89PNG")),
        );
        let_assert!(Err(Error::InvalidRequest(message)) = result);
        check!(message.contains("boundary"));
    }

    #[test]
    fn query_pairs_skip_missing_options() {
        #[derive(serde::Serialize)]
        struct Filters {
            page: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            search: Option<String>,
            include_past: bool,
        }

        let pairs = to_query_pairs(&Filters {
            page: 1,
            search: None,
            include_past: false,
        })
        .expect("pairs");

        check!(
            pairs
                == [
                    ("page".to_string(), "1".to_string()),
                    ("include_past".to_string(), "false".to_string()),
                ]
        );
    }

    #[test]
    fn from_json_reports_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            #[allow(dead_code)]
            id: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Page {
            #[allow(dead_code)]
            data: Vec<Row>,
        }

        let err = from_json::<Page>(br#"{"data":[{"id":"a"},{}]}"#).expect_err("missing id");
        let message = err.to_string();
        check!(message.contains("data[1]") || message.contains("data.1"));
        check!(message.contains("id"));
    }
}
