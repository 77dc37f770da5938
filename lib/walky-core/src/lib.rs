//! Core types for the Walky API client.
//!
//! This crate holds everything that does not depend on a concrete transport:
//! - [`Method`], [`Request`] and [`Response`] - HTTP primitives
//! - [`Error`], [`ErrorKind`] and [`Result`] - failure classification
//! - [`Route`] and [`PathTemplate`] - declarative endpoint metadata
//! - [`RequestParams`] and [`RequestDefaults`] - layered request configuration
//! - [`normalize`], [`Form`] and [`FormFields`] - content-type aware body shaping
//! - [`AuthContext`] and [`SecurityWorker`] - auth injection
//! - [`HttpClient`] - the transport trait

mod auth;
mod body;
mod client;
mod error;
mod method;
mod multipart;
mod params;
mod path_template;
pub mod prelude;
mod request;
mod response;
mod route;

pub use auth::{AuthContext, BearerWorker, SecurityData, SecurityWorker, WorkerFuture};
pub use body::{
    ContentType, EncodedBody, RequestBody, from_json, normalize, to_json, to_query_pairs,
    to_query_string,
};
pub use client::HttpClient;
pub use error::{ApiErrorBody, Error, ErrorKind, Result};
pub use method::Method;
pub use multipart::{FieldValue, FileValue, Form, FormFields, Part};
pub use params::{RequestDefaults, RequestParams};
pub use path_template::PathTemplate;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use route::{ResponseFormat, Route, RouteName};
