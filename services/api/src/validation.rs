//! Input validation utilities
//!
//! Validation happens at the boundary of each operation, before any
//! persistence call.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest video clip accepted for an order photo, in seconds.
pub const MAX_VIDEO_DURATION_SECONDS: i32 = 60;

/// Require a non-blank value for a mandatory field.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("{field} is required")),
    }
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email is required".to_string());
    }

    if email.len() > 254 {
        return Err("email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("password is required".to_string());
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }

    if password.len() > 128 {
        return Err("password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate the duration constraint for video uploads. Images carry no
/// duration; videos are capped at one minute.
pub fn validate_video_duration(duration_seconds: Option<i32>) -> Result<(), String> {
    match duration_seconds {
        None => Ok(()),
        Some(d) if d < 0 => Err("duration_seconds must not be negative".to_string()),
        Some(d) if d > MAX_VIDEO_DURATION_SECONDS => Err(format!(
            "videos longer than {MAX_VIDEO_DURATION_SECONDS} seconds are not accepted"
        )),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_blank_values() {
        assert!(require("client_name", None).is_err());
        assert!(require("client_name", Some("   ".to_string())).is_err());
        assert_eq!(
            require("client_name", Some("Acme".to_string())),
            Ok("Acme".to_string())
        );
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("tech@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn short_passwords_are_weak() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn video_duration_is_capped_at_sixty_seconds() {
        assert!(validate_video_duration(None).is_ok());
        assert!(validate_video_duration(Some(60)).is_ok());
        assert!(validate_video_duration(Some(61)).is_err());
        assert!(validate_video_duration(Some(-1)).is_err());
    }
}
