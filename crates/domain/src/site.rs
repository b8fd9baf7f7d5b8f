use serde::{Deserialize, Serialize};

use crate::user::RegistrationMode;

/// Application paths the account forms navigate to.
pub mod paths {
    /// Front page.
    pub const HOME: &str = "";
    /// Login form.
    pub const LOGIN: &str = "user/login";
    /// Registration form.
    pub const REGISTER: &str = "user/register";
    /// Password reset request form.
    pub const PASSWORD: &str = "user/password";
}

/// Read-only site account settings supplied by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// New accounts must confirm their e-mail address before signing in.
    pub requires_email_verification: bool,
    /// Who may create accounts.
    pub registration_mode: RegistrationMode,
    /// Landing destination after a successful login.
    pub front_page: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            requires_email_verification: false,
            registration_mode: RegistrationMode::Open,
            front_page: "dashboard".to_owned(),
        }
    }
}
