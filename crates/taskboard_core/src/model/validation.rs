//! Input validation shared by project and task write paths.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected create/patch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
    /// A required field was not supplied at all.
    MissingField(&'static str),
    /// Text does not name a known enum value (status, priority, ...).
    UnknownValue { field: &'static str, value: String },
    /// Remote service rejected the payload; carries its message.
    Rejected(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
            Self::Rejected(message) => write!(f, "input rejected: {message}"),
        }
    }
}

impl Error for ValidationError {}

/// Ensures a required text field carries visible content.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_text, ValidationError};

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("title", "  \t"),
            Err(ValidationError::EmptyField("title"))
        );
        assert!(require_text("title", "ship it").is_ok());
    }
}
