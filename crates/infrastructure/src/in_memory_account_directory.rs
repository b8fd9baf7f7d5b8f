//! In-memory account backend implementing every account port.
//!
//! Stands in for the remote content-management backend in the CLI and in
//! tests. Passwords are hashed through the [`PasswordHasher`] port and
//! reset e-mails go through the [`EmailService`] port.

mod authentication;
mod entity_form;
mod password_reset;
mod registration;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use formwork_application::{EmailService, PasswordHasher};
use formwork_core::{AccountId, AppError, AppResult, FieldErrors};
use formwork_domain::{Account, AccountStatus, EmailAddress, SiteConfig};

/// Generic rejection that does not reveal whether the account exists.
pub(crate) const WRONG_CREDENTIALS: &str = "Sorry, unrecognized username or password.";

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password_hash: Option<String>,
}

/// In-memory account directory.
pub struct InMemoryAccountDirectory {
    accounts: RwLock<Vec<StoredAccount>>,
    reset_requests: RwLock<HashMap<String, Vec<DateTime<Utc>>>>,
    password_hasher: Arc<dyn PasswordHasher>,
    email_service: Arc<dyn EmailService>,
    site: SiteConfig,
    reset_requests_per_hour: usize,
}

impl InMemoryAccountDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new(
        password_hasher: Arc<dyn PasswordHasher>,
        email_service: Arc<dyn EmailService>,
        site: SiteConfig,
        reset_requests_per_hour: usize,
    ) -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            reset_requests: RwLock::new(HashMap::new()),
            password_hasher,
            email_service,
            site,
            reset_requests_per_hour,
        }
    }

    /// Adds an account directly, bypassing registration rules.
    pub async fn seed_account(
        &self,
        name: &str,
        mail: &str,
        password: &str,
        status: AccountStatus,
    ) -> AppResult<Account> {
        let mail = EmailAddress::new(mail)?;
        let password_hash = self.password_hasher.hash_password(password)?;
        let mut accounts = self.accounts.write().await;

        let mut errors = FieldErrors::new();
        check_unique(&accounts, None, Some(name), Some(mail.as_str()), &mut errors);
        if !errors.is_empty() {
            return Err(AppError::Conflict(errors.to_string()));
        }

        let account = Account {
            uid: next_uid(&accounts),
            name: name.to_owned(),
            mail: mail.into(),
            status,
            created: Utc::now(),
        };
        accounts.push(StoredAccount {
            account: account.clone(),
            password_hash: Some(password_hash),
        });
        Ok(account)
    }

    /// Returns the account with this identifier.
    pub async fn find(&self, uid: AccountId) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|stored| stored.account.uid == uid)
            .map(|stored| stored.account.clone())
    }

    /// Returns the account whose name or e-mail matches the identifier.
    pub async fn find_by_identifier(&self, identifier: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        find_by_identifier(&accounts, identifier).map(|stored| stored.account.clone())
    }

    /// Marks a pending account as active.
    pub async fn activate(&self, uid: AccountId) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .iter_mut()
            .find(|stored| stored.account.uid == uid)
            .ok_or_else(|| AppError::NotFound(format!("account '{uid}' does not exist")))?;
        stored.account.status = AccountStatus::Active;
        Ok(stored.account.clone())
    }
}

fn next_uid(accounts: &[StoredAccount]) -> AccountId {
    let highest = accounts
        .iter()
        .map(|stored| stored.account.uid.value())
        .max()
        .unwrap_or(0);
    AccountId::new(highest + 1)
}

fn find_by_identifier<'a>(accounts: &'a [StoredAccount], identifier: &str) -> Option<&'a StoredAccount> {
    let identifier = identifier.trim();
    let lowered = identifier.to_lowercase();
    accounts.iter().find(|stored| {
        stored.account.name.eq_ignore_ascii_case(identifier) || stored.account.mail == lowered
    })
}

/// Records name and e-mail collisions with accounts other than `except`.
fn check_unique(
    accounts: &[StoredAccount],
    except: Option<AccountId>,
    name: Option<&str>,
    mail: Option<&str>,
    errors: &mut FieldErrors,
) {
    let others = accounts
        .iter()
        .filter(|stored| Some(stored.account.uid) != except);

    for stored in others {
        if let Some(name) = name
            && stored.account.name.eq_ignore_ascii_case(name)
        {
            errors.record("name", format!("The name {name} is already taken."));
        }
        if let Some(mail) = mail
            && stored.account.mail == mail
        {
            errors.record("mail", format!("The e-mail address {mail} is already taken."));
        }
    }
}
