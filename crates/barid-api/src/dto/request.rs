//! Request DTOs that have no service-layer counterpart.

use serde::Deserialize;

/// Admin login request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Admin password.
    #[serde(default)]
    pub password: String,
}

/// Review moderation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalRequest {
    /// New approval flag; anything but `true` un-approves.
    #[serde(default)]
    pub approved: Option<bool>,
}

impl ApprovalRequest {
    pub fn is_approved(&self) -> bool {
        self.approved == Some(true)
    }
}
