use serde::Deserialize;

/// `?user_email=` query used by the per-user listings.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub user_email: Option<String>,
}

impl EmailQuery {
    /// The email, if present and not blank.
    pub fn email(&self) -> Option<&str> {
        self.user_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
