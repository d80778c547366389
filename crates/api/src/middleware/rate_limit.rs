//! Per-client rate limiting.
//!
//! Each client IP gets `max_requests` per window as a burst allowance, which
//! refills one request every `window / max_requests`. Spent allowances are
//! answered with 429 and a `Retry-After` header.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Tracked clients above which idle entries are dropped.
const PRUNE_THRESHOLD: usize = 10_000;

/// Shared keyed limiter; cheap to clone.
#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    retry_after_secs: u64,
}

impl ClientRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let replenish = window / burst.get();
        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            retry_after_secs: replenish.as_secs_f64().ceil().max(1.0) as u64,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.rate_limit_window_ms),
            config.rate_limit_max_requests,
        )
    }

    /// Spend one request for `client`, or report how long to wait.
    pub fn check(&self, client: IpAddr) -> Result<(), AppError> {
        if self.limiter.len() > PRUNE_THRESHOLD {
            self.limiter.retain_recent();
        }
        self.limiter
            .check_key(&client)
            .map_err(|_| AppError::RateLimited {
                retry_after_secs: self.retry_after_secs,
            })
    }
}

/// Peer address from the connection, when the server was started with
/// connect info. Requests without one share a single allowance.
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware: reject the request with 429 once its client is over quota.
pub async fn throttle(
    State(limiter): State<ClientRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);
    match limiter.check(client) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(%client, path = %request.uri().path(), "Rate limit exceeded");
            err.into_response()
        }
    }
}
