// File: src/rules.rs
// Purpose: Basic checks used by schema field rules

use once_cell::sync::Lazy;
use regex::Regex;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Length in characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if char_len(s) >= min {
        Ok(())
    } else {
        Err(format!("String must contain at least {} character(s)", min))
    }
}

pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if char_len(s) <= max {
        Ok(())
    } else {
        Err(format!("String must contain at most {} character(s)", max))
    }
}

pub fn validate_min(value: f64, min: f64) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!("Number must be greater than or equal to {}", min))
    }
}

pub fn validate_max(value: f64, max: f64) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!("Number must be less than or equal to {}", max))
    }
}

pub fn validate_email(s: &str) -> Result<(), String> {
    if is_valid_email(s) {
        Ok(())
    } else {
        Err("Invalid email".to_string())
    }
}

pub fn validate_pattern(s: &str, pattern: &Regex) -> Result<(), String> {
    if pattern.is_match(s) {
        Ok(())
    } else {
        Err("Invalid".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(validate_min_length("héllo", 5).is_ok());
        assert!(validate_max_length("héllo", 5).is_ok());
        assert!(validate_min_length("", 1).is_err());
        assert_eq!(
            validate_max_length("toolong", 3).unwrap_err(),
            "String must contain at most 3 character(s)"
        );
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(validate_min(18.0, 18.0).is_ok());
        assert!(validate_min(17.5, 18.0).is_err());
        assert!(validate_max(120.0, 120.0).is_ok());
        assert!(validate_max(121.0, 120.0).is_err());
    }

    #[test]
    fn test_pattern() {
        let code = Regex::new(r"^[A-Z]{3}$").unwrap();
        assert!(validate_pattern("ABC", &code).is_ok());
        assert!(validate_pattern("abc", &code).is_err());
    }
}
