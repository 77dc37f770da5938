//! Typed client for the Walky campus API.
//!
//! Every backend endpoint is declared once as a [`Route`] in [`catalog`] and
//! exposed as a method on [`WalkyApi`]. One dispatcher builds each request:
//! it interpolates the path, layers headers, asks the [`SecurityWorker`] for
//! credentials on secure routes and shapes the body for the declared
//! [`ContentType`].
//!
//! # Example
//!
//! ```ignore
//! use walky::prelude::*;
//! use walky::catalog::auth::Credentials;
//! use walky::catalog::events::EventDetailQuery;
//!
//! let api = WalkyApi::from_env(HyperClient::builder().with_logging().build(), AuthContext::new())?;
//! api.sign_in(&Credentials::new("admin@walky.app", "secret")).await?;
//!
//! let event = api.events_detail("evt1", &EventDetailQuery::default()).await?;
//! ```
//!
//! The [`admin`] module holds the console's list, cache and mutation helpers.

pub mod admin;
mod api_client;
pub mod catalog;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod models;
pub mod prelude;

pub use api_client::{Call, WalkyApi, WalkyApiBuilder};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    ApiConfig, BASE_URL_ENV, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};

// Re-export tower for middleware composition
pub use tower;

pub use walky_core::{
    ApiErrorBody, AuthContext, BearerWorker, ContentType, EncodedBody, Error, ErrorKind,
    FieldValue, FileValue, Form, FormFields, HttpClient, Method, Part, PathTemplate, Request,
    RequestBody, RequestBuilder, RequestDefaults, RequestParams, Response, ResponseFormat, Result,
    Route, RouteName, SecurityData, SecurityWorker, WorkerFuture, from_json, normalize, to_json,
    to_query_pairs, to_query_string,
};
