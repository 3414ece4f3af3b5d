//! Tracking number generation.

use chrono::Utc;
use rand::Rng;

/// Produces candidate tracking numbers.
///
/// Candidates need not be unique; the caller checks the store and retries.
pub trait TrackingNumberGenerator: Send + Sync + std::fmt::Debug {
    /// Produce one candidate.
    fn generate(&self) -> String;
}

/// `{prefix}{last 10 digits of epoch millis}{3 random digits}`, uppercased.
#[derive(Debug, Clone)]
pub struct TimestampGenerator {
    prefix: String,
}

impl TimestampGenerator {
    /// Create a generator with the given prefix (e.g. `"AB"`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Assemble a tracking number from its parts.
    pub fn compose(prefix: &str, epoch_millis: i64, random: u32) -> String {
        let millis = epoch_millis.to_string();
        let tail = &millis[millis.len().saturating_sub(10)..];
        format!("{prefix}{tail}{:03}", random % 1000).to_uppercase()
    }
}

impl TrackingNumberGenerator for TimestampGenerator {
    fn generate(&self) -> String {
        let random = rand::rng().random_range(0..1000);
        Self::compose(&self.prefix, Utc::now().timestamp_millis(), random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_layout() {
        assert_eq!(
            TimestampGenerator::compose("AB", 1_712_345_678_901, 7),
            "AB2345678901007"
        );
        assert_eq!(
            TimestampGenerator::compose("ab", 1_712_345_678_901, 42),
            "AB2345678901042"
        );
        assert_eq!(TimestampGenerator::compose("AB", 123, 999), "AB123999");
    }

    #[test]
    fn test_generated_shape() {
        let code = TimestampGenerator::new("AB").generate();
        assert_eq!(code.len(), 15);
        assert!(code.starts_with("AB"));
        assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
    }
}
