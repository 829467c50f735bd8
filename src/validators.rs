use once_cell::sync::Lazy;
use regex::Regex;

/// Input validation utilities for the auth handlers

// Compiled once on first use; the pattern is a hardcoded constant
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9 ._'-]{1,100}$").expect("hardcoded name regex is invalid")
});

/// Validate a display name (1-100 characters, letters, digits and basic punctuation)
pub fn validate_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Validate password strength requirements
/// - Minimum 8 characters
/// - At least one letter
/// - At least one digit
pub fn validate_password(password: &str) -> bool {
    if password.len() < 8 {
        return false;
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_letter && has_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_name("Jane Doe"));
        assert!(validate_name("user_42"));
        assert!(validate_name("O'Brien"));
    }

    #[test]
    fn test_invalid_name() {
        assert!(!validate_name("")); // Empty
        assert!(!validate_name(&"a".repeat(101))); // Too long
        assert!(!validate_name("jane<script>")); // Invalid character
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("password1"));
        assert!(validate_password("Tr0ub4dor&3"));
    }

    #[test]
    fn test_invalid_password() {
        assert!(!validate_password("short1")); // Too short
        assert!(!validate_password("allletters")); // No digit
        assert!(!validate_password("12345678")); // No letter
    }
}
