//! Field validation for the create-admin form. Each check returns the error
//! message to show, or `None` when the value is acceptable.

pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 254;
pub const PASSWORD_MIN: usize = 8;

/// Username: 2-50 chars, letters, digits and underscore only.
pub fn validate_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Some("Username is required".to_string());
    }
    let len = trimmed.chars().count();
    if len < USERNAME_MIN {
        return Some(format!("Username must be at least {USERNAME_MIN} characters"));
    }
    if len > USERNAME_MAX {
        return Some(format!("Username must be at most {USERNAME_MAX} characters"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("Username may only contain letters, numbers, and underscores".to_string());
    }
    None
}

/// Email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > EMAIL_MAX {
        return Some(format!("Email must be at most {EMAIL_MAX} characters"));
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.chars().count() < PASSWORD_MIN {
        return Some(format!("Password must be at least {PASSWORD_MIN} characters"));
    }
    None
}

pub fn validate_password_match(password: &str, confirm: &str) -> Option<String> {
    if password != confirm {
        return Some("Passwords do not match".to_string());
    }
    None
}
