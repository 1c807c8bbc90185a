//! Login rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Limits repeated login attempts from one client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Attempts allowed per window.
    #[serde(default = "default_login_attempts")]
    pub login_max_attempts: u32,
    /// Window length in seconds.
    #[serde(default = "default_login_window")]
    pub login_window_seconds: u64,
    /// Key clients on the first `X-Forwarded-For` hop instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_max_attempts: default_login_attempts(),
            login_window_seconds: default_login_window(),
            trust_forwarded_for: false,
        }
    }
}

fn default_login_attempts() -> u32 {
    5
}

fn default_login_window() -> u64 {
    15 * 60
}
