//! # barid-auth
//!
//! Admin authentication for Al Barid.
//!
//! ## Modules
//!
//! - `password` — Argon2id hashing and verification of the admin password
//! - `jwt` — signed, expiring admin session tokens
//! - `admin` — the gate combining both: login and per-request verification

pub mod admin;
pub mod jwt;
pub mod password;

pub use admin::{AdminGate, AdminSession};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
