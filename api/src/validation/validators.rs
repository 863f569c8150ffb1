//! Field validators for input validation
//!
//! Reusable checks behind the schema constraints. Each returns the
//! user-facing message on failure; the caller attaches the field path.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pragmatic e-mail shape: local@domain.tld
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();

    /// Indian mobile number: 10 digits starting with 6-9
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();

    /// Indian postal code: 6 digits, no leading zero
    pub static ref PINCODE_REGEX: Regex = Regex::new(r"^[1-9]\d{5}$").unwrap();

    /// Database object id: 24 hex characters
    pub static ref OBJECT_ID_REGEX: Regex = Regex::new(r"^[0-9a-fA-F]{24}$").unwrap();

    /// URL pattern for links and images
    pub static ref URL_REGEX: Regex = Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap();

    /// At least one ASCII letter
    pub static ref HAS_LETTER_REGEX: Regex = Regex::new(r"[A-Za-z]").unwrap();

    /// At least one digit
    pub static ref HAS_DIGIT_REGEX: Regex = Regex::new(r"\d").unwrap();

    /// Shipment tracking numbers
    pub static ref TRACKING_NUMBER_REGEX: Regex = Regex::new(r"^[A-Za-z0-9-]{6,50}$").unwrap();

    /// Script/event handler pattern for XSS detection
    static ref XSS_PATTERN_REGEX: Regex = Regex::new(
        r"(?i)(javascript:|on\w+\s*=|<script|<iframe|<object|<embed)"
    ).unwrap();
}

/// Validate string length within bounds
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("must be at least {} characters", min));
    }
    if len > max {
        return Err(format!("must be at most {} characters", max));
    }
    Ok(())
}

/// Validate a number against optional inclusive bounds
pub fn validate_range(value: f64, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    if let Some(min) = min {
        if value < min {
            return Err(format!("must be greater than or equal to {}", min));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(format!("must be less than or equal to {}", max));
        }
    }
    Ok(())
}

/// Validate array length within bounds
pub fn validate_item_count(len: usize, min: usize, max: usize) -> Result<(), String> {
    if len < min {
        return Err(format!("must contain at least {} items", min));
    }
    if len > max {
        return Err(format!("must contain at most {} items", max));
    }
    Ok(())
}

/// Validate that a value is one of an allowed set
pub fn validate_one_of(value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!("must be one of [{}]", allowed.join(", ")))
    }
}

/// Validate against a pattern, reporting `message` on mismatch
pub fn validate_pattern(value: &str, pattern: &Regex, message: &str) -> Result<(), String> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Validate e-mail format
pub fn validate_email(value: &str) -> Result<(), String> {
    validate_pattern(value, &EMAIL_REGEX, "must be a valid email address")
}

/// Validate that a string contains no potential XSS patterns
pub fn validate_no_xss(value: &str) -> Result<(), String> {
    if XSS_PATTERN_REGEX.is_match(value) {
        return Err("potentially unsafe content detected".to_string());
    }
    Ok(())
}

/// Validate JSON value is not deeply nested (prevent DoS)
pub fn validate_json_depth(value: &serde_json::Value, max_depth: usize) -> Result<(), String> {
    fn check_depth(v: &serde_json::Value, current: usize, max: usize) -> Result<(), String> {
        if current > max {
            return Err(format!("JSON exceeds maximum nesting depth of {}", max));
        }
        match v {
            serde_json::Value::Array(arr) => {
                for item in arr {
                    check_depth(item, current + 1, max)?;
                }
            }
            serde_json::Value::Object(obj) => {
                for (_, val) in obj {
                    check_depth(val, current + 1, max)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    check_depth(value, 0, max_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert!(validate_length("hello", 1, 10).is_ok());
        assert!(validate_length("", 1, 10).is_err());
        assert!(validate_length("hello world!", 1, 10).is_err());

        // Unicode characters count as single chars
        assert!(validate_length("धान", 3, 3).is_ok());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(6.5, Some(0.0), Some(14.0)).is_ok());
        assert_eq!(
            validate_range(-1.0, Some(0.0), None).unwrap_err(),
            "must be greater than or equal to 0"
        );
        assert_eq!(
            validate_range(15.0, None, Some(14.0)).unwrap_err(),
            "must be less than or equal to 14"
        );
    }

    #[test]
    fn test_validate_one_of() {
        let allowed = ["asc", "desc"];
        assert!(validate_one_of("asc", &allowed).is_ok());
        assert_eq!(
            validate_one_of("up", &allowed).unwrap_err(),
            "must be one of [asc, desc]"
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("farmer@agrismart.in").is_ok());
        assert!(validate_email("farmer.name+tag@mail.co").is_ok());
        assert!(validate_email("farmer@").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_patterns() {
        assert!(PHONE_REGEX.is_match("9876543210"));
        assert!(!PHONE_REGEX.is_match("1234567890"));
        assert!(PINCODE_REGEX.is_match("560001"));
        assert!(!PINCODE_REGEX.is_match("060001"));
        assert!(OBJECT_ID_REGEX.is_match("64b7f3c2a1d4e5f6a7b8c9d0"));
        assert!(!OBJECT_ID_REGEX.is_match("64b7f3c2"));
    }

    #[test]
    fn test_validate_no_xss() {
        assert!(validate_no_xss("Normal text").is_ok());
        assert!(validate_no_xss("javascript:alert(1)").is_err());
        assert!(validate_no_xss("<script>alert(1)</script>").is_err());
        assert!(validate_no_xss("onclick=alert(1)").is_err());
    }

    #[test]
    fn test_validate_json_depth() {
        let shallow = serde_json::json!({"a": {"b": 1}});
        assert!(validate_json_depth(&shallow, 5).is_ok());

        let deep = serde_json::json!({"a": {"b": {"c": {"d": {"e": {"f": 1}}}}}});
        assert!(validate_json_depth(&deep, 3).is_err());
    }
}
