//! Validation helpers for DTOs.

use validator::ValidationError;

/// Maximum number of a single scoring element a scorekeeper can report.
/// Nothing in a two-and-a-half-minute match legitimately exceeds this; a
/// larger value is a fat-fingered entry.
pub const MAX_ELEMENT_COUNT: u32 = 200;

/// Validates that a team display name is non-empty, printable, and fits on
/// the scoreboard.
///
/// # Examples
///
/// ```ignore
/// validate_team_name("Gear Grinders")  // Ok
/// validate_team_name("")               // Err - empty
/// validate_team_name("a\tb")           // Err - control character
/// ```
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("team_name_empty");
        err.message = Some("Team name must not be empty".into());
        return Err(err);
    }

    if trimmed.chars().count() > 48 {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some("Team name must be at most 48 characters".into());
        return Err(err);
    }

    if trimmed.chars().any(char::is_control) {
        let mut err = ValidationError::new("team_name_format");
        err.message = Some("Team name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a scoring counter is within the plausible per-match range.
pub fn validate_element_count(count: u32) -> Result<(), ValidationError> {
    if count > MAX_ELEMENT_COUNT {
        let mut err = ValidationError::new("element_count_range");
        err.message = Some(
            format!(
                "Element count must be at most {} (got {})",
                MAX_ELEMENT_COUNT, count
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_team_name_valid() {
        assert!(validate_team_name("Gear Grinders").is_ok());
        assert!(validate_team_name("  padded  ").is_ok());
        assert!(validate_team_name("1234").is_ok());
    }

    #[test]
    fn test_validate_team_name_invalid() {
        assert!(validate_team_name("").is_err());
        assert!(validate_team_name("   ").is_err()); // whitespace only
        assert!(validate_team_name(&"x".repeat(49)).is_err()); // too long
        assert!(validate_team_name("a\tb").is_err()); // control character
    }

    #[test]
    fn test_validate_element_count() {
        assert!(validate_element_count(0).is_ok());
        assert!(validate_element_count(MAX_ELEMENT_COUNT).is_ok());
        assert!(validate_element_count(MAX_ELEMENT_COUNT + 1).is_err());
    }
}
