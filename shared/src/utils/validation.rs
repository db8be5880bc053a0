//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex"));

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]{2,29}$").expect("valid username regex"));

/// Check if a string is blank (empty or whitespace only)
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check if an email address is well-formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check if a username is well-formed
///
/// Usernames are compared lowercase, 3-30 characters, starting with a letter
/// or digit.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username)
}
