//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret shipped in the defaults. Never valid for
/// issuing admin sessions.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Admin credential and session-token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Plaintext admin password; hashed with Argon2 at startup.
    ///
    /// Ignored when `admin_password_hash` is set.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Argon2 PHC string for the admin password.
    #[serde(default)]
    pub admin_password_hash: Option<String>,
    /// Secret key for admin session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Admin session token TTL in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
}

impl AuthConfig {
    /// Whether `jwt_secret` is blank or still the shipped placeholder.
    pub fn has_placeholder_secret(&self) -> bool {
        let secret = self.jwt_secret.trim();
        secret.is_empty() || secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: None,
            admin_password_hash: None,
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_session_ttl() -> u64 {
    120
}
