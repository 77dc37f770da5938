//! Prelude module for convenient imports.
//!
//! ```ignore
//! use walky::prelude::*;
//! ```

pub use crate::admin::{ListEnvelope, ListQuery, QueryCache, Resource, ResourceMutation};
pub use crate::{
    ApiConfig, AuthContext, BearerWorker, ContentType, Error, ErrorKind, FileValue, FormFields,
    HttpClient, HyperClient, RequestBody, RequestDefaults, RequestParams, Result, Route,
    SecurityData, SecurityWorker, WalkyApi,
};
pub use serde::{Deserialize, Serialize};
