//! HTTP transport using hyper-util.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::middleware::LoggingLayer;
use crate::{
    Error, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
};

#[cfg(feature = "middleware-retry")]
use crate::middleware::RetryPolicy;
#[cfg(feature = "middleware-concurrency")]
use tower::limit::ConcurrencyLimitLayer;
#[cfg(feature = "middleware-retry")]
use tower::retry::RetryLayer;

/// Type-erased service the middleware stack is built from.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by the transport service.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

/// Shares one middleware stack between clones of [`HyperClient`].
///
/// Each call clones the stack out of the mutex so no lock is held across
/// the exchange.
#[derive(Clone)]
struct SharedStack(Arc<Mutex<BoxedService>>);

impl SharedStack {
    fn new(service: BoxedService) -> Self {
        Self(Arc::new(Mutex::new(service)))
    }

    fn dispatch(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut service = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        Box::pin(async move { service.call(request).await })
    }
}

type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Innermost service: exactly one hyper exchange per call.
#[derive(Clone)]
struct Exchange {
    pool: Pool,
    timeout: Duration,
    user_agent: Arc<str>,
}

impl Exchange {
    fn new(config: &ClientConfig) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config));

        Self {
            pool,
            timeout: config.timeout,
            user_agent: Arc::from(config.user_agent.as_str()),
        }
    }

    /// Convert to a hyper request, keeping extensions for the layers below.
    fn to_hyper(&self, request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body, extensions) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());
        if !headers.keys().any(|name| name.eq_ignore_ascii_case("user-agent")) {
            builder = builder.header(http::header::USER_AGENT, &*self.user_agent);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut converted = builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        *converted.extensions_mut() = extensions;
        Ok(converted)
    }

    async fn send(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = self.to_hyper(request)?;

        let response = tokio::time::timeout(self.timeout, self.pool.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(classify)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }
}

/// Sort a hyper failure into the transport error variants.
#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let message = err.to_string();
    let lower = message.to_ascii_lowercase();
    if !err.is_connect() && ["tls", "ssl", "certificate"].iter().any(|m| lower.contains(m)) {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

impl Service<Request<Bytes>> for Exchange {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().send(request))
    }
}

/// Pooled HTTPS transport with a tower middleware stack.
///
/// Statuses are never turned into errors here; [`crate::WalkyApi`] does that.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use walky::HyperClient;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(15))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: SharedStack,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with default configuration and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with custom configuration and no middleware.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            stack: SharedStack::new(BoxCloneService::new(Exchange::new(&config))),
            config,
        }
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl walky_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.stack.dispatch(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.stack.dispatch(request)
    }
}

/// Builder for [`HyperClient`].
///
/// Layers are applied in the order they are added; the first one added sits
/// closest to the network.
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers_count", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Add a tower layer.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.layers.push(Arc::new(move |service| {
            BoxCloneService::new(layer.layer(service))
        }));
        self
    }

    /// Log one summary line per exchange.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log requests with their headers at debug level.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Retry transport failures, 5xx and 429 up to `max_retries` times.
    ///
    /// Off unless called.
    #[cfg(feature = "middleware-retry")]
    #[must_use]
    pub fn with_retry(self, max_retries: u32) -> Self {
        self.layer(RetryLayer::new(RetryPolicy::new(max_retries)))
    }

    /// Cap the number of in-flight requests.
    #[cfg(feature = "middleware-concurrency")]
    #[must_use]
    pub fn with_concurrency_limit(self, max: usize) -> Self {
        self.layer(ConcurrencyLimitLayer::new(max))
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config.build();
        let innermost: BoxedService = BoxCloneService::new(Exchange::new(&config));
        let service = self.layers.into_iter().fold(innermost, |service, wrap| wrap(service));

        HyperClient {
            stack: SharedStack::new(service),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_default() {
        let client = HyperClient::new();
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_builder() {
        let client = HyperClient::builder()
            .timeout(Duration::from_secs(60))
            .pool_idle_per_host(4)
            .with_logging()
            .build();

        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(client.config().pool_idle_per_host, 4);
    }

    #[test]
    fn builder_counts_layers() {
        let builder = HyperClient::builder().with_logging().with_debug_logging();
        assert!(format!("{builder:?}").contains("layers_count: 2"));
    }

    fn exchange() -> Exchange {
        Exchange::new(&ClientConfig::builder().user_agent("walky-admin/1.0").build())
    }

    #[tokio::test]
    async fn hyper_request_keeps_extensions() {
        let url = url::Url::parse("https://api.walky.app/api/events").expect("url");
        let request = Request::builder(walky_core::Method::Post, url)
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .extension(walky_core::RouteName("eventsCreate"))
            .build();

        let hyper_request = exchange().to_hyper(request).expect("request");

        assert_eq!(hyper_request.method(), http::Method::POST);
        assert_eq!(
            hyper_request.headers().get("user-agent").and_then(|v| v.to_str().ok()),
            Some("walky-admin/1.0")
        );
        assert_eq!(
            hyper_request.extensions().get::<walky_core::RouteName>(),
            Some(&walky_core::RouteName("eventsCreate"))
        );
    }

    #[tokio::test]
    async fn caller_user_agent_wins() {
        let url = url::Url::parse("https://api.walky.app/health").expect("url");
        let request = Request::builder(walky_core::Method::Get, url)
            .header("user-agent", "walky-mobile/3.2")
            .build();

        let hyper_request = exchange().to_hyper(request).expect("request");

        let agents: Vec<_> = hyper_request.headers().get_all("user-agent").iter().collect();
        assert_eq!(agents, ["walky-mobile/3.2"]);
    }
}
