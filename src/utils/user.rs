use validator::ValidateEmail;

/// Emails are compared case-insensitively everywhere; store and look them
/// up in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}
