use std::fmt;

/// Error raised when a required runtime object turns out to be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    message: String,
}

impl InvariantViolation {
    #[allow(dead_code)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Unwraps `value` or fails with `message`. Used at construction seams where
/// a missing collaborator must abort setup instead of limping along.
pub fn require<T>(value: Option<T>, message: &str) -> Result<T, InvariantViolation> {
    match value {
        Some(value) => Ok(value),
        None => Err(InvariantViolation {
            message: message.to_string(),
        }),
    }
}
