use serde::{Deserialize, Serialize};

use crate::AccountId;

/// Identity of the account signed in on this device, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSession {
    account_id: Option<AccountId>,
    name: Option<String>,
}

impl CurrentSession {
    /// Creates a session for an anonymous visitor.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a session for a signed-in account.
    #[must_use]
    pub fn authenticated(account_id: AccountId, name: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id),
            name: Some(name.into()),
        }
    }

    /// Returns the signed-in account identifier.
    #[must_use]
    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    /// Returns the signed-in account name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether an account is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }

    /// Returns whether the given account is the one signed in.
    #[must_use]
    pub fn is_account(&self, account_id: AccountId) -> bool {
        self.account_id == Some(account_id)
    }
}
