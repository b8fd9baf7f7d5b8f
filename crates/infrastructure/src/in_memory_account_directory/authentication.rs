use async_trait::async_trait;
use formwork_application::Authenticator;
use formwork_core::CurrentSession;
use tracing::info;

use super::*;

#[async_trait]
impl Authenticator for InMemoryAccountDirectory {
    async fn authenticate(&self, name: &str, pass: &str) -> AppResult<CurrentSession> {
        let accounts = self.accounts.read().await;

        let Some(stored) = find_by_identifier(&accounts, name) else {
            // Hash anyway so unknown names take as long as wrong passwords.
            let _ = self.password_hasher.hash_password(pass);
            return Err(AppError::Unauthorized(WRONG_CREDENTIALS.to_owned()));
        };

        let Some(hash) = stored.password_hash.as_deref() else {
            let _ = self.password_hasher.hash_password(pass);
            return Err(AppError::Unauthorized(WRONG_CREDENTIALS.to_owned()));
        };

        if !self.password_hasher.verify_password(pass, hash)? {
            return Err(AppError::Unauthorized(WRONG_CREDENTIALS.to_owned()));
        }

        if stored.account.status == AccountStatus::Blocked {
            return Err(AppError::Unauthorized(format!(
                "The username {} has not been activated or is blocked.",
                stored.account.name
            )));
        }

        info!(account_id = %stored.account.uid, "account authenticated");
        Ok(CurrentSession::authenticated(
            stored.account.uid,
            stored.account.name.as_str(),
        ))
    }
}
