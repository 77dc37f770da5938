//! Prelude module for convenient imports.
//!
//! ```ignore
//! use walky_core::prelude::*;
//! ```

pub use crate::{
    AuthContext, ContentType, Error, ErrorKind, FileValue, Form, FormFields, HttpClient, Method,
    Request, RequestBody, RequestParams, Response, Result, Route, SecurityData, SecurityWorker,
};
