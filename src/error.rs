//! Parse errors for the string forms of dashboard enums

use thiserror::Error;

/// A string did not name a known variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new("theme", "sepia", "light, dark, system");
        assert_eq!(
            err.to_string(),
            "Invalid theme 'sepia' (expected one of: light, dark, system)"
        );
    }
}
