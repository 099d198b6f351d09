use std::env;
use std::fmt;

use tracing::warn;

pub const DEFAULT_JWT_SECRET: &str = "change-me-secret";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// Token signing settings, fixed at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Lifetime applied when a token is created without an explicit TTL
    pub token_ttl_secs: u64,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Zero falls back to the default lifetime.
    pub fn with_ttl_secs(mut self, ttl: u64) -> Self {
        self.token_ttl_secs = if ttl == 0 { DEFAULT_TOKEN_TTL_SECS } else { ttl };
        self
    }

    /// Read `JWT_SECRET` and `TOKEN_TTL_SECONDS`.
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                warn!("JWT_SECRET not set; using the built-in development secret");
                DEFAULT_JWT_SECRET.to_string()
            });

        let ttl = match env::var("TOKEN_TTL_SECONDS") {
            Ok(raw) => parse_ttl(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "invalid TOKEN_TTL_SECONDS; using default");
                DEFAULT_TOKEN_TTL_SECS
            }),
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Self::new(secret.into_bytes()).with_ttl_secs(ttl)
    }
}

fn parse_ttl(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(DEFAULT_JWT_SECRET.as_bytes().to_vec())
    }
}
