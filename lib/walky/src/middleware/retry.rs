//! Opt-in retry policy.
//!
//! The API client itself never retries; this policy only runs when the
//! transport was built with `.with_retry(n)` or an explicit [`RetryLayer`].
//!
//! [`RetryLayer`]: tower::retry::RetryLayer

use std::future;

use bytes::Bytes;
use tower::retry::Policy;
use walky_core::{ErrorKind, Method};

use crate::{Error, Request, Response};

/// Retries transport failures, 5xx responses and 429 Too Many Requests.
///
/// Only safe methods (`GET`, `HEAD`, `OPTIONS`) are retried after a response
/// was received; a mutation that reached the backend is never replayed.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
}

impl RetryPolicy {
    /// Policy allowing `max_retries` extra attempts.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    fn should_retry_response(method: Method, response: &Response<Bytes>) -> bool {
        let status = response.status();
        method.is_safe() && (status >= 500 || status == 429)
    }

    fn should_retry_error(error: &Error) -> bool {
        error.kind() == ErrorKind::Transport && !matches!(error, Error::Tls(_))
    }
}

impl Policy<Request<Bytes>, Response<Bytes>, Error> for RetryPolicy {
    type Future = future::Ready<()>;

    fn retry(
        &mut self,
        req: &mut Request<Bytes>,
        result: &mut Result<Response<Bytes>, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(req.method(), response),
            Err(error) => Self::should_retry_error(error),
        };

        if should_retry {
            self.remaining -= 1;
            tracing::debug!(remaining = self.remaining, url = %req.url(), "retrying request");
            Some(future::ready(()))
        } else {
            None
        }
    }

    fn clone_request(&mut self, req: &Request<Bytes>) -> Option<Request<Bytes>> {
        Some(req.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn response(status: u16) -> Response<Bytes> {
        Response::new(status, HashMap::default(), Bytes::new())
    }

    #[test]
    fn retries_server_errors_on_reads() {
        assert!(RetryPolicy::should_retry_response(Method::Get, &response(503)));
        assert!(RetryPolicy::should_retry_response(Method::Get, &response(429)));
    }

    #[test]
    fn never_replays_mutations() {
        assert!(!RetryPolicy::should_retry_response(Method::Post, &response(503)));
        assert!(!RetryPolicy::should_retry_response(Method::Delete, &response(500)));
    }

    #[test]
    fn client_errors_are_final() {
        assert!(!RetryPolicy::should_retry_response(Method::Get, &response(404)));
        assert!(!RetryPolicy::should_retry_response(Method::Get, &response(200)));
    }

    #[test]
    fn transport_errors_are_retried() {
        assert!(RetryPolicy::should_retry_error(&Error::connection("refused")));
        assert!(RetryPolicy::should_retry_error(&Error::Timeout));
        assert!(!RetryPolicy::should_retry_error(&Error::tls("bad certificate")));
        assert!(!RetryPolicy::should_retry_error(&Error::http(500, "boom")));
    }
}
