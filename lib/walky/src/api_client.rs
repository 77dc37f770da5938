//! The dispatching API client.
//!
//! Every catalog method builds a [`Call`] from a [`Route`] and hands it to
//! [`WalkyApi::execute`]; there is no per-endpoint request code.
//!
//! # Example
//!
//! ```ignore
//! use walky::{ApiConfig, AuthContext, BearerWorker, HyperClient, WalkyApi};
//! use walky::catalog::events::EventDetailQuery;
//!
//! let auth = AuthContext::new();
//! let api = WalkyApi::builder(HyperClient::builder().with_logging().build())
//!     .config(ApiConfig::from_env()?)
//!     .auth(auth.clone())
//!     .security_worker(BearerWorker)
//!     .build();
//!
//! let event = api
//!     .events_detail("evt1", &EventDetailQuery { include_past: Some(false) })
//!     .await?;
//! ```

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use walky_core::{
    AuthContext, ContentType, HttpClient, Request, RequestBody, RequestDefaults, RequestParams,
    Response, Route, RouteName, SecurityWorker, normalize, to_query_pairs,
};

use crate::config::ApiConfig;
use crate::{Error, Result};

/// One invocation of a route.
#[derive(Debug, Clone)]
pub struct Call {
    route: Route,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    body: RequestBody,
    params: RequestParams,
}

impl Call {
    /// Call `route` with no parameters.
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            path_params: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            params: RequestParams::new(),
        }
    }

    /// Bind a path placeholder.
    #[must_use]
    pub fn path(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Append the fields of a query struct; `None` fields are skipped.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        self.query.extend(to_query_pairs(query)?);
        Ok(self)
    }

    /// Append one query pair.
    #[must_use]
    pub fn query_pair(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append already-encoded query pairs.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Set a JSON body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.body(RequestBody::Json(serde_json::to_value(body)?)))
    }

    /// Layer per-call overrides on top of any already set.
    #[must_use]
    pub fn params(mut self, params: RequestParams) -> Self {
        self.params = self.params.merge(params);
        self
    }

    /// The route being called.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }
}

struct Shared<C> {
    client: C,
    base_url: Url,
    defaults: RequestDefaults,
    auth: AuthContext,
    worker: Option<Arc<dyn SecurityWorker>>,
}

/// Typed client for the Walky backend.
///
/// Cheap to clone. The catalog methods live in [`crate::catalog`].
pub struct WalkyApi<C> {
    shared: Arc<Shared<C>>,
    overrides: RequestParams,
}

impl<C> Clone for WalkyApi<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            overrides: self.overrides.clone(),
        }
    }
}

impl<C> std::fmt::Debug for WalkyApi<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkyApi")
            .field("base_url", &self.shared.base_url.as_str())
            .field("defaults", &self.shared.defaults)
            .field("authenticated", &self.shared.auth.is_authenticated())
            .field("has_worker", &self.shared.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> WalkyApi<C> {
    /// Start configuring a client around `client`.
    pub fn builder(client: C) -> WalkyApiBuilder<C> {
        WalkyApiBuilder::new(client)
    }

    /// Client for the backend selected by `VITE_API_BASE_URL`, with bearer auth.
    pub fn from_env(client: C, auth: AuthContext) -> Result<Self> {
        Ok(Self::builder(client)
            .config(ApiConfig::from_env()?)
            .auth(auth)
            .security_worker(walky_core::BearerWorker)
            .build())
    }

    /// The same client with `params` applied to every call made through it.
    #[must_use]
    pub fn with_params(&self, params: RequestParams) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            overrides: self.overrides.clone().merge(params),
        }
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.shared.base_url
    }

    /// The auth state this client reads on secure calls.
    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.shared.auth
    }

    /// Client-wide request defaults.
    #[must_use]
    pub fn defaults(&self) -> &RequestDefaults {
        &self.shared.defaults
    }

    /// The underlying transport.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.shared.client
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let base = self.shared.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

impl<C: HttpClient> WalkyApi<C> {
    /// Build and send the request for `call`, returning the raw response.
    ///
    /// Non-2xx statuses are not errors here.
    pub async fn request(&self, call: Call) -> Result<Response<Bytes>> {
        let Call {
            route,
            path_params,
            query,
            body,
            params,
        } = call;
        let params = self.overrides.clone().merge(params);

        let path = route.path.interpolate(&path_params)?;
        let secure = params
            .secure
            .or(route.secure)
            .unwrap_or(self.shared.defaults.is_secure());

        let security = if secure {
            self.security_fragment().await
        } else {
            None
        };

        let mut headers = self
            .shared
            .defaults
            .merged_headers(route.method, std::iter::once(&params).chain(security.as_ref()));

        let content_type = params
            .content_type
            .or(route.content_type)
            .unwrap_or(ContentType::Json);
        let encoded = normalize(content_type, body)?;
        if let Some(encoded) = &encoded {
            // A caller-supplied type wins, except for multipart whose boundary must match.
            let declared = headers
                .keys()
                .find(|name| name.eq_ignore_ascii_case("content-type"))
                .cloned();
            if declared.is_none() || content_type == ContentType::FormData {
                if let Some(name) = declared {
                    headers.remove(&name);
                }
                headers.insert("Content-Type".to_string(), encoded.content_type.clone());
            }
        }

        let extra_query = params
            .query
            .iter()
            .chain(security.iter().flat_map(|fragment| fragment.query.iter()))
            .cloned();

        let mut builder = Request::builder(route.method, self.url_for(&path)?)
            .query_pairs(query.into_iter().chain(extra_query))
            .headers(headers)
            .extension(RouteName(route.name))
            .extension(route.path);
        if let Some(encoded) = encoded {
            builder = builder.body(encoded.bytes);
        }
        let request = builder.build();

        tracing::debug!(
            route = route.name,
            method = %route.method,
            url = %request.url(),
            secure,
            "dispatching request"
        );

        self.shared.client.execute(request).await
    }

    /// Send `call` and decode a 2xx body as `T`.
    ///
    /// Non-2xx responses become [`Error::Http`] carrying the backend message.
    pub async fn execute<T: DeserializeOwned>(&self, call: Call) -> Result<T> {
        let format = call
            .params
            .format
            .or(self.overrides.format)
            .unwrap_or(call.route.format);
        let route = call.route.name;

        let response = self.request(call).await?;
        if !response.is_success() {
            let error = Error::from_response(response.status(), response.into_body());
            tracing::debug!(route, kind = %error.kind(), error = %error, "request rejected");
            return Err(error);
        }

        response.decode(format)
    }

    async fn security_fragment(&self) -> Option<RequestParams> {
        match &self.shared.worker {
            Some(worker) => worker.resolve(self.shared.auth.get()).await,
            None => {
                tracing::debug!("secure call without a security worker, sending unauthenticated");
                None
            }
        }
    }
}

/// Builder for [`WalkyApi`].
pub struct WalkyApiBuilder<C> {
    client: C,
    config: ApiConfig,
    defaults: RequestDefaults,
    auth: AuthContext,
    worker: Option<Arc<dyn SecurityWorker>>,
}

impl<C> std::fmt::Debug for WalkyApiBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkyApiBuilder")
            .field("config", &self.config)
            .field("defaults", &self.defaults)
            .field("has_worker", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> WalkyApiBuilder<C> {
    fn new(client: C) -> Self {
        Self {
            client,
            config: ApiConfig::default(),
            defaults: RequestDefaults::new(),
            auth: AuthContext::new(),
            worker: None,
        }
    }

    /// Backend location. Defaults to the staging host.
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse and use `base_url`.
    pub fn base_url(self, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(self.config(ApiConfig::new(base_url)?))
    }

    /// Default headers and default `secure` flag.
    #[must_use]
    pub fn defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Shared auth state; keep a clone to log in and out.
    #[must_use]
    pub fn auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    /// Worker turning the auth state into request configuration.
    #[must_use]
    pub fn security_worker(mut self, worker: impl SecurityWorker) -> Self {
        self.worker = Some(Arc::new(worker));
        self
    }

    /// Treat routes without a declared `secure` flag as secure.
    #[must_use]
    pub fn secure_by_default(mut self, secure: bool) -> Self {
        self.defaults = self.defaults.secure(secure);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> WalkyApi<C> {
        WalkyApi {
            shared: Arc::new(Shared {
                client: self.client,
                base_url: self.config.base_url().clone(),
                defaults: self.defaults,
                auth: self.auth,
                worker: self.worker,
            }),
            overrides: RequestParams::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use walky_core::PathTemplate;

    use super::*;

    const DETAIL: Route = Route::get("eventsDetail", "/api/events/{event_id}").secure();

    fn api(base: &str) -> WalkyApi<()> {
        WalkyApi::builder(())
            .base_url(base)
            .expect("base url")
            .build()
    }

    #[test]
    fn url_joins_base_and_path() {
        let url = api("https://api.walky.app/").url_for("/api/events/1").expect("url");
        assert_eq!(url.as_str(), "https://api.walky.app/api/events/1");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let url = api("http://localhost:4000/v2").url_for("/api/campuses").expect("url");
        assert_eq!(url.as_str(), "http://localhost:4000/v2/api/campuses");
    }

    #[test]
    fn call_collects_parts() {
        let call = Call::new(DETAIL)
            .path("event_id", "evt1")
            .query_pair("include_past", "false")
            .params(RequestParams::new().header("X-Trace", "1"))
            .params(RequestParams::new().secure(false));

        assert_eq!(call.route().path, PathTemplate::new("/api/events/{event_id}"));
        assert_eq!(call.path_params, [("event_id", "evt1".to_string())]);
        assert_eq!(call.query, [("include_past".to_string(), "false".to_string())]);
        assert_eq!(call.params.headers.len(), 1);
        assert_eq!(call.params.secure, Some(false));
    }

    #[test]
    fn with_params_stacks_overrides() {
        let base = api("https://api.walky.app");
        let scoped = base
            .with_params(RequestParams::new().header("X-Campus", "mit"))
            .with_params(RequestParams::new().header("X-Trace", "7"));

        assert!(base.overrides.headers.is_empty());
        assert_eq!(scoped.overrides.headers.len(), 2);
        assert_eq!(scoped.base_url(), base.base_url());
    }

    #[test]
    fn builder_defaults_to_staging() {
        let api = WalkyApi::builder(()).build();
        assert_eq!(api.base_url(), ApiConfig::default().base_url());
        assert!(!api.defaults().is_secure());
        assert!(!api.auth().is_authenticated());
    }
}
