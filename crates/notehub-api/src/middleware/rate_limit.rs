//! Fixed-window rate limiter for login attempts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use notehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Simple in-memory fixed-window rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → current window.
    windows: Arc<Mutex<HashMap<String, Window>>>,
    /// Attempts allowed per window.
    max_attempts: u32,
    /// Window length.
    window: Duration,
}

#[derive(Debug, Clone)]
struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    /// Window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records an attempt for the given key. Returns `false` once the key
    /// has used up its window.
    ///
    /// Expired windows of every key are dropped on each call.
    pub async fn check(&self, key: &str) -> bool {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if entry.count >= self.max_attempts {
            return false;
        }
        entry.count += 1;
        true
    }
}

/// Rejects login attempts beyond the configured window with 429.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let key = client_key(
        request.headers(),
        peer,
        state.config.rate_limit.trust_forwarded_for,
    );

    if !state.login_limiter.check(&key).await {
        warn!(client = %key, "Login rate limit exceeded");
        let minutes = state.login_limiter.window().as_secs().div_ceil(60);
        return ApiError::from(AppError::rate_limit(format!(
            "Too many login attempts. Please try again after {minutes} minutes."
        )))
        .into_response();
    }

    next.run(request).await
}

/// Identifies the client by its peer address, or by the first
/// `X-Forwarded-For` hop when the proxy is trusted. Requests without either
/// share one bucket.
fn client_key(headers: &HeaderMap, peer: Option<String>, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .flatten();

    forwarded.or(peer).unwrap_or_else(|| "unknown".to_string())
}
