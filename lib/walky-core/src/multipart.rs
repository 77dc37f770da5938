//! Multipart form data for uploads (event images, category images, logos and covers).
//!
//! Two ways to produce a form:
//!
//! - build a [`Form`] part by part, the native container that is sent as-is;
//! - describe a flat object with [`FormFields`] and let [`Form::from_fields`]
//!   turn every field into parts.
//!
//! # Example
//!
//! ```
//! use walky_core::{FileValue, Form, FormFields};
//!
//! let fields = FormFields::new()
//!     .text("name", "Music")
//!     .file("image", FileValue::new("music.png", vec![0x89, 0x50]));
//!
//! let form = Form::from_fields(fields);
//! assert_eq!(form.parts().len(), 2);
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use serde_json::Value;

use crate::{Error, Result};

/// A single part in a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl Part {
    /// Create a text part.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// Create a file part; the content type is guessed from the extension.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename).to_string();
        Self {
            name: name.into(),
            filename: Some(filename),
            content_type: Some(content_type),
            data: data.into(),
        }
    }

    /// Set the content type for this part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Get the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the filename, if set.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get the content type, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the part data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Whether this part carries a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.filename.is_some()
    }

    /// `Content-Disposition` and optional `Content-Type` lines, each ending in CRLF.
    fn headers(&self) -> String {
        let mut headers = format!("Content-Disposition: form-data; name=\"{}\"", self.name);
        if let Some(filename) = &self.filename {
            headers.push_str(&format!("; filename=\"{filename}\""));
        }
        headers.push_str("\r\n");
        if let Some(content_type) = &self.content_type {
            headers.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        headers
    }
}

/// Guess the content type of an upload from its filename extension.
fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "json" => "application/json",
        "txt" => "text/plain",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// A file-like value inside [`FormFields`]; appended to the form untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValue {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

impl FileValue {
    /// A file whose content type is guessed from `filename`.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Force a content type instead of guessing it.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn into_part(self, name: &str) -> Part {
        let part = Part::file(name, self.filename, self.data);
        match self.content_type {
            Some(content_type) => part.with_content_type(content_type),
            None => part,
        }
    }
}

/// Value of one field in a flat multipart object.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A file, appended as-is.
    File(FileValue),
    /// Several files under the same field name.
    Files(Vec<FileValue>),
    /// Any JSON value. Arrays produce one part per element.
    Value(Value),
}

/// A flat object to be encoded as multipart form data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormFields {
    fields: Vec<(String, FieldValue)>,
}

impl FormFields {
    /// Empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a serializable struct into value fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to a JSON object.
    pub fn from_serialize<T: serde::Serialize>(value: &T) -> Result<Self> {
        Self::from_json(serde_json::to_value(value)?)
    }

    /// Use the keys of a JSON object as fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::Value(value)))
                    .collect(),
            }),
            other => Err(Error::invalid_request(format!(
                "multipart body must be an object, got {other}"
            ))),
        }
    }

    /// Add a text field.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, FieldValue::Value(Value::String(value.into())))
    }

    /// Add a file field.
    #[must_use]
    pub fn file(self, name: impl Into<String>, file: FileValue) -> Self {
        self.field(name, FieldValue::File(file))
    }

    /// Add an arbitrary field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }
}

/// String form of a non-file value: objects and arrays as JSON, strings
/// verbatim, other primitives coerced.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
    }
}

/// A multipart form containing multiple parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    parts: Vec<Part>,
    boundary: String,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create a new empty form with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    /// Create a new form with a custom boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            parts: Vec::new(),
            boundary: boundary.into(),
        }
    }

    /// Build a form from a flat object, one field at a time.
    ///
    /// Array values emit one part per element. Files are appended as-is;
    /// every other value is coerced to a string.
    #[must_use]
    pub fn from_fields(fields: FormFields) -> Self {
        fields
            .fields
            .into_iter()
            .fold(Self::new(), |form, (name, value)| match value {
                FieldValue::File(file) => form.part(file.into_part(&name)),
                FieldValue::Files(files) => files
                    .into_iter()
                    .fold(form, |form, file| form.part(file.into_part(&name))),
                FieldValue::Value(Value::Array(items)) => items
                    .iter()
                    .fold(form, |form, item| form.text(name.as_str(), coerce(item))),
                FieldValue::Value(value) => form.text(name.as_str(), coerce(&value)),
            })
    }

    /// Add a part to the form.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Add a text field to the form.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.part(Part::text(name, value))
    }

    /// Add a file to the form.
    #[must_use]
    pub fn file(
        self,
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.part(Part::file(name, filename, data))
    }

    /// Get the boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the parts in this form.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Convert the form into (content-type header value, body bytes).
    #[must_use]
    pub fn into_body(self) -> (String, Bytes) {
        let content_type = self.content_type();
        let body = self.encode();
        (content_type, body)
    }

    fn encode(&self) -> Bytes {
        let delimiter = format!("--{}", self.boundary);
        let mut buf = BytesMut::with_capacity(self.parts.iter().map(|p| p.data.len() + 128).sum());

        for part in &self.parts {
            buf.put_slice(delimiter.as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(part.headers().as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(&part.data);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(delimiter.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----WalkyFormBoundary{timestamp:x}")
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn file_and_string_fields() {
        let image = FileValue::new("cover.jpg", vec![0xFF, 0xD8, 0xFF]);
        let fields = FormFields::new()
            .file("image", image)
            .text("title", "Jazz night");

        let form = Form::from_fields(fields);
        let files: Vec<_> = form.parts().iter().filter(|p| p.is_file()).collect();
        let texts: Vec<_> = form.parts().iter().filter(|p| !p.is_file()).collect();

        let_assert!([file] = files.as_slice());
        check!(file.name() == "image");
        check!(file.filename() == Some("cover.jpg"));
        check!(file.content_type() == Some("image/jpeg"));
        check!(*file.data() == Bytes::from_static(&[0xFF, 0xD8, 0xFF]));

        let_assert!([text] = texts.as_slice());
        check!(text.name() == "title");
        check!(*text.data() == "Jazz night");
    }

    #[test]
    fn object_values_become_json_strings() {
        let fields = FormFields::from_json(json!({
            "location": { "type": "Point", "coordinates": [2.35, 48.85] }
        }))
        .expect("object");

        let form = Form::from_fields(fields);
        let_assert!([part] = form.parts());
        check!(part.name() == "location");
        check!(*part.data() == r#"{"coordinates":[2.35,48.85],"type":"Point"}"#);
    }

    #[test]
    fn arrays_emit_one_part_per_element() {
        let fields = FormFields::from_json(json!({ "tags": ["music", 3, { "k": 1 }] }))
            .expect("object");

        let form = Form::from_fields(fields);
        let values: Vec<_> = form
            .parts()
            .iter()
            .map(|p| (p.name(), String::from_utf8_lossy(p.data()).into_owned()))
            .collect();

        check!(
            values
                == [
                    ("tags", "music".to_string()),
                    ("tags", "3".to_string()),
                    ("tags", r#"{"k":1}"#.to_string()),
                ]
        );
    }

    #[test]
    fn primitives_are_coerced() {
        let fields = FormFields::from_json(json!({ "a": true, "b": 12.5, "c": null }))
            .expect("object");

        let form = Form::from_fields(fields);
        let values: Vec<_> = form.parts().iter().map(|p| p.data().clone()).collect();
        check!(values == [Bytes::from("true"), Bytes::from("12.5"), Bytes::from("null")]);
    }

    #[test]
    fn several_files_under_one_name() {
        let fields = FormFields::new().field(
            "photos",
            FieldValue::Files(vec![
                FileValue::new("a.png", vec![1]),
                FileValue::new("b.bin", vec![2]).with_content_type("image/avif"),
            ]),
        );

        let form = Form::from_fields(fields);
        let_assert!([first, second] = form.parts());
        check!(first.content_type() == Some("image/png"));
        check!(second.content_type() == Some("image/avif"));
    }

    #[test]
    fn non_object_cannot_be_flattened() {
        let err = FormFields::from_json(json!([1, 2])).expect_err("array body");
        check!(err.to_string().contains("must be an object"));
    }

    #[test]
    fn encodes_parts_with_boundary() {
        let form = Form::with_boundary("b123")
            .text("name", "Music")
            .file("image", "music.png", "PNG");

        let (content_type, body) = form.into_body();
        let body = String::from_utf8_lossy(&body);

        check!(content_type == "multipart/form-data; boundary=b123");
        check!(body.contains("--b123\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nMusic\r\n"));
        check!(body.contains("name=\"image\"; filename=\"music.png\"\r\nContent-Type: image/png\r\n"));
        check!(body.ends_with("--b123--\r\n"));
    }

    #[test]
    fn guesses_upload_types() {
        check!(guess_content_type("LOGO.PNG") == "image/png");
        check!(guess_content_type("cover.webp") == "image/webp");
        check!(guess_content_type("noext") == "application/octet-stream");
    }
}
