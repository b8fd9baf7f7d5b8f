//! Account domain types and validation rules.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use formwork_core::{AccountId, AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Who may create accounts on the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// Only administrators create accounts.
    AdministratorsOnly,
    /// Visitors can register and sign in right away.
    #[default]
    Open,
    /// Visitors can register; an administrator must approve the account.
    ApprovalRequired,
}

impl RegistrationMode {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdministratorsOnly => "administrators_only",
            Self::Open => "open",
            Self::ApprovalRequired => "approval_required",
        }
    }

    /// Returns whether visitors may create accounts.
    #[must_use]
    pub fn allows_visitors(&self) -> bool {
        !matches!(self, Self::AdministratorsOnly)
    }
}

impl FromStr for RegistrationMode {
    type Err = AppError;

    /// Accepts storage names and the backend's numeric codes `0`, `1`, `2`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "administrators_only" | "0" => Ok(Self::AdministratorsOnly),
            "open" | "1" => Ok(Self::Open),
            "approval_required" | "2" => Ok(Self::ApprovalRequired),
            other => Err(AppError::Validation(format!(
                "unknown registration mode '{other}'"
            ))),
        }
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account may sign in.
    Active,
    /// Account is waiting for approval or was blocked.
    Blocked,
}

/// Account record returned by backend actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Backend identifier.
    pub uid: AccountId,
    /// Unique user name.
    pub name: String,
    /// Canonical e-mail address.
    pub mail: String,
    /// Sign-in status.
    pub status: AccountStatus,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
}

/// Account record assembled from a submitted form.
///
/// Blank submitted values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntity {
    /// Identifier of the edited account; `None` for new accounts.
    pub uid: Option<AccountId>,
    /// User name.
    pub name: Option<String>,
    /// E-mail address.
    pub mail: Option<String>,
    /// New password.
    pub pass: Option<String>,
    /// Current password, confirming sensitive profile changes.
    pub current_pass: Option<String>,
    /// Values of fields without a dedicated slot.
    pub extra: BTreeMap<String, String>,
}

impl AccountEntity {
    /// Returns sign-in credentials when both name and password are present.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.name, &self.pass) {
            (Some(name), Some(pass)) => Some(Credentials {
                name: name.clone(),
                pass: pass.clone(),
            }),
            _ => None,
        }
    }
}

/// Name and password pair handed to the authenticator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name or e-mail.
    pub name: String,
    /// Plaintext password.
    pub pass: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("name", &self.name)
            .field("pass", &"<redacted>")
            .finish()
    }
}
