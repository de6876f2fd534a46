//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for validating employee usernames
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9._-]*$").unwrap());

/// Validate an employee username
pub fn validate_username(username: &str) -> bool {
    !username.is_empty() && username.len() <= 50 && USERNAME_REGEX.is_match(username)
}

/// Validate a service type filter; `all` is the wildcard
pub fn validate_service_type(service_type: &str) -> bool {
    !service_type.is_empty() && service_type.len() <= 100
}
