//! Errors raised by sheet rules and value objects.

use thiserror::Error;

use crate::value_objects::DiceParseError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation. The message is shown to the user as-is.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// A sheet rule refused the change (e.g. too many Shinobigami skills).
    /// Carries the user-facing message.
    #[error("{0}")]
    Constraint(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// The game system has no implementation of `operation`.
    #[error("Unsupported for game system {system}: {operation}")]
    UnsupportedSystem {
        system: String,
        operation: &'static str,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Used by `FromStr` impls when the text matches no known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unsupported_system(system: impl ToString, operation: &'static str) -> Self {
        Self::UnsupportedSystem {
            system: system.to_string(),
            operation,
        }
    }
}

impl From<DiceParseError> for DomainError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_refusals_display_only_their_message() {
        let err = DomainError::constraint("特技は最大6個までです");
        assert_eq!(err.to_string(), "特技は最大6個までです");
    }

    #[test]
    fn dice_errors_become_parse_errors() {
        let domain_err: DomainError = DiceParseError::Empty.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Empty dice formula"));
    }

    #[test]
    fn unsupported_system_names_the_operation() {
        let err = DomainError::unsupported_system("shinobigami", "auto-roll");
        assert_eq!(
            err.to_string(),
            "Unsupported for game system shinobigami: auto-roll"
        );
    }
}
