// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Input checks that run before any storage access.

use crate::error::CoreError;

/// Longest accepted name, in characters. Matches the `VARCHAR(255)` columns.
pub const MAX_NAME_LEN: usize = 255;

/// Trim `raw` and reject it when empty or longer than [`MAX_NAME_LEN`].
///
/// Case is preserved: `"Ana"` and `"ana"` stay distinct.
///
/// # Errors
///
/// [`CoreError::InvalidInput`] naming `field`.
///
/// # Example
///
/// ```rust
/// use event_ideas_core::validate::validate_name;
///
/// assert_eq!(validate_name("event_name", "  Boliche ").unwrap(), "Boliche");
/// assert!(validate_name("event_name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::InvalidInput(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Reject non-positive identifiers.
///
/// # Errors
///
/// [`CoreError::InvalidInput`] naming `field`.
pub fn validate_id(field: &str, id: i64) -> Result<i64, CoreError> {
    if id <= 0 {
        return Err(CoreError::InvalidInput(format!("{field} must be positive")));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_name("event_name", "\t Karaoke \n").unwrap(), "Karaoke");
    }

    #[test]
    fn keeps_inner_whitespace_and_case() {
        assert_eq!(validate_name("participant_name", " Ana  Maria ").unwrap(), "Ana  Maria");
        assert_eq!(validate_name("participant_name", "ana").unwrap(), "ana");
    }

    #[test]
    fn rejects_empty_and_blank() {
        for raw in ["", " ", "\t\n  "] {
            let err = validate_name("participant_name", raw).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(err.to_string().contains("participant_name"));
        }
    }

    #[test]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_NAME_LEN);
        assert!(validate_name("event_name", &at_limit).is_ok());

        let over = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name("event_name", &over).unwrap_err().is_invalid_input());
    }

    #[test]
    fn limit_applies_after_trim() {
        let padded = format!("  {}  ", "a".repeat(MAX_NAME_LEN));
        assert!(validate_name("event_name", &padded).is_ok());
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(validate_id("event_id", 1).unwrap(), 1);
        assert!(validate_id("event_id", 0).unwrap_err().is_invalid_input());
        assert!(validate_id("event_id", -3).unwrap_err().is_invalid_input());
    }
}
