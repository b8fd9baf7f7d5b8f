use async_trait::async_trait;
use formwork_application::AccountRegistrar;
use formwork_domain::{AccountEntity, RegistrationMode};
use tracing::{info, warn};

use super::*;

#[async_trait]
impl AccountRegistrar for InMemoryAccountDirectory {
    async fn register_account(&self, entity: &AccountEntity) -> AppResult<Account> {
        if !self.site.registration_mode.allows_visitors() {
            return Err(AppError::Unauthorized(
                "Only site administrators can create new user accounts.".to_owned(),
            ));
        }

        let mut errors = FieldErrors::new();

        let name = entity.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            errors.record("name", "You must enter a username.");
        }

        let mail = match entity.mail.as_deref().map(EmailAddress::new) {
            Some(Ok(mail)) => Some(mail),
            Some(Err(_)) | None => {
                errors.record("mail", "You must enter a valid e-mail address.");
                None
            }
        };

        let password = if self.site.requires_email_verification {
            None
        } else {
            if entity.pass.is_none() {
                errors.record("pass", "You must enter a password.");
            }
            entity.pass.as_deref()
        };

        let mut accounts = self.accounts.write().await;
        check_unique(
            &accounts,
            None,
            (!name.is_empty()).then_some(name),
            mail.as_ref().map(EmailAddress::as_str),
            &mut errors,
        );

        let Some(mail) = mail.filter(|_| errors.is_empty()) else {
            return Err(AppError::FieldValidation {
                errors,
                message: None,
            });
        };

        let password_hash = password
            .map(|password| self.password_hasher.hash_password(password))
            .transpose()?;
        let status = match self.site.registration_mode {
            RegistrationMode::ApprovalRequired => AccountStatus::Blocked,
            RegistrationMode::Open | RegistrationMode::AdministratorsOnly => AccountStatus::Active,
        };

        let account = Account {
            uid: next_uid(&accounts),
            name: name.to_owned(),
            mail: mail.into(),
            status,
            created: Utc::now(),
        };
        accounts.push(StoredAccount {
            account: account.clone(),
            password_hash,
        });
        drop(accounts);

        info!(account_id = %account.uid, status = ?account.status, "account registered");

        if self.site.requires_email_verification {
            let body = format!(
                "Thank you for registering, {}.\n\n\
                 Use the one-time login link sent with this message to verify your account \
                 and set a password.",
                account.name
            );
            if let Err(error) = self
                .email_service
                .send_email(&account.mail, "Account details", &body)
                .await
            {
                warn!(%error, account_id = %account.uid, "failed to send verification e-mail");
            }
        }

        Ok(account)
    }
}
