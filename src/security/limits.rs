//! Request limits.
//!
//! # Responsibilities
//! - Hold the process-wide resource limits
//! - Reject oversized input text before any other work happens
//!
//! # Design Decisions
//! - Limits are compile-time constants, not configuration
//! - Text length counts Unicode scalar values, not bytes

use std::time::Duration;

use thiserror::Error;

/// Upper bound applied to every resolved `max_length` setting.
pub const GLOBAL_MAX_LENGTH: u64 = 500;

/// Maximum accepted length of the request `text` field.
pub const INPUT_MAX_LENGTH: usize = 1000;

/// Default deadline for one upstream call.
pub const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    #[error("input text has {len} characters, limit is {max}")]
    InputTooLong { len: usize, max: usize },

    /// The raw body overran the listener's body limit before it was parsed.
    #[error("request body exceeds the configured size limit")]
    BodyTooLarge,
}

/// Check the request text against [`INPUT_MAX_LENGTH`].
pub fn check_input_length(text: &str) -> Result<(), LimitError> {
    let len = text.chars().count();
    if len > INPUT_MAX_LENGTH {
        return Err(LimitError::InputTooLong {
            len,
            max: INPUT_MAX_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_boundary() {
        assert!(check_input_length("").is_ok());
        assert!(check_input_length(&"a".repeat(INPUT_MAX_LENGTH)).is_ok());
        assert_eq!(
            check_input_length(&"a".repeat(INPUT_MAX_LENGTH + 1)),
            Err(LimitError::InputTooLong { len: 1001, max: 1000 })
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 1000 two-byte characters still fit.
        let text = "é".repeat(INPUT_MAX_LENGTH);
        assert_eq!(text.len(), 2000);
        assert!(check_input_length(&text).is_ok());
    }
}
