//! Tower middleware for [`HyperClient`](crate::HyperClient).
//!
//! | Layer | Helper | Feature |
//! |-------|--------|---------|
//! | [`LoggingLayer`] | `.with_logging()` / `.with_debug_logging()` | always |
//! | [`RetryLayer`] + [`RetryPolicy`] | `.with_retry(n)` | `middleware-retry` |
//! | [`ConcurrencyLimitLayer`] | `.with_concurrency_limit(n)` | `middleware-concurrency` |
//!
//! Any other tower layer over [`BoxedService`](crate::BoxedService) can be
//! added with `.layer()`. The API client never retries on its own.

mod logging;
mod retry;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
