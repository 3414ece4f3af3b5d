//! Single-administrator login and session verification.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use barid_core::config::AuthConfig;
use barid_core::error::AppError;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// A freshly issued admin session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Bearer token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Verifies the admin password and the session tokens it issues.
#[derive(Debug, Clone)]
pub struct AdminGate {
    hasher: PasswordHasher,
    /// PHC string of the admin password; `None` disables login.
    password_hash: Option<String>,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl AdminGate {
    /// Build the gate from configuration.
    ///
    /// A configured hash takes precedence over a plaintext password, which is
    /// hashed here so the plaintext is never compared directly. A configured
    /// password requires a real signing secret.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        let hasher = PasswordHasher::new();

        let password_hash = match (&config.admin_password_hash, &config.admin_password) {
            (Some(hash), _) if !hash.trim().is_empty() => {
                hasher.check_hash(hash)?;
                Some(hash.clone())
            }
            (_, Some(password)) if !password.is_empty() => Some(hasher.hash_password(password)?),
            _ => {
                warn!("No admin password configured; admin login is disabled");
                None
            }
        };

        if password_hash.is_some() && config.has_placeholder_secret() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set when an admin password is configured",
            ));
        }

        Ok(Self {
            hasher,
            password_hash,
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        })
    }

    /// Whether an admin password is configured.
    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Exchange the admin password for a session token.
    pub fn login(&self, password: &str) -> Result<AdminSession, AppError> {
        let Some(hash) = &self.password_hash else {
            return Err(AppError::authentication("Invalid password"));
        };

        if !self.hasher.verify_password(password, hash)? {
            warn!("Admin login failed");
            return Err(AppError::authentication("Invalid password"));
        }

        let (token, claims) = self.encoder.issue(Utc::now())?;
        info!(jti = %claims.jti, expires_at = %claims.expires_at(), "Admin session issued");

        Ok(AdminSession {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Validate a bearer token presented on an admin request.
    ///
    /// Every token is refused while admin access is disabled.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        if !self.is_enabled() {
            return Err(AppError::authentication("Admin access is disabled"));
        }
        self.decoder.decode(token)
    }
}
