//! Contact form validation and relay.
//!
//! Messages are not persisted. A valid submission is relayed as a structured
//! log event for the operations inbox to pick up.

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use barid_core::error::AppError;
use barid_core::result::AppResult;

/// Contact form as posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A contact message with every required field present.
#[derive(Debug, Clone, Validate)]
pub struct ContactMessage {
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<ContactRequest> for ContactMessage {
    type Error = AppError;

    fn try_from(req: ContactRequest) -> AppResult<Self> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            required(req.name),
            required(req.email),
            required(req.subject),
            required(req.message),
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };

        let msg = Self {
            name,
            email,
            phone: required(req.phone),
            subject,
            message,
        };
        msg.validate()
            .map_err(|_| AppError::validation("Invalid email format"))?;
        Ok(msg)
    }
}

/// Relays contact form submissions.
#[derive(Debug, Clone, Default)]
pub struct ContactService;

impl ContactService {
    pub fn new() -> Self {
        Self
    }

    /// Validate and relay a submission.
    pub fn submit(&self, req: ContactRequest) -> AppResult<ContactMessage> {
        let msg = ContactMessage::try_from(req)?;
        info!(
            name = %msg.name,
            email = %msg.email,
            phone = msg.phone.as_deref().unwrap_or(""),
            subject = %msg.subject,
            message = %msg.message,
            "Contact form submission"
        );
        Ok(msg)
    }
}
