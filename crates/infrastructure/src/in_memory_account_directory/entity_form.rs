use async_trait::async_trait;
use formwork_application::EntityFormSubmitter;
use formwork_domain::{AccountEntity, FormSchema, FormState};
use tracing::info;

use super::*;

const CURRENT_PASSWORD_REQUIRED: &str = "Your current password is missing or incorrect; \
     it's required to change the E-mail address or Password.";

#[async_trait]
impl EntityFormSubmitter for InMemoryAccountDirectory {
    async fn submit_entity_form(
        &self,
        schema: &FormSchema,
        _state: &FormState,
        entity: &AccountEntity,
    ) -> AppResult<Account> {
        let uid = entity.uid.ok_or_else(|| {
            AppError::Validation("account entity is missing its identifier".to_owned())
        })?;

        let mut accounts = self.accounts.write().await;
        let index = accounts
            .iter()
            .position(|stored| stored.account.uid == uid)
            .ok_or_else(|| AppError::NotFound(format!("account '{uid}' does not exist")))?;

        let mut errors = FieldErrors::new();
        let current = accounts[index].clone();

        let name = entity
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(current.account.name.as_str());

        let mail = match entity.mail.as_deref() {
            Some(value) => match EmailAddress::new(value) {
                Ok(mail) => String::from(mail),
                Err(_) => {
                    errors.record("mail", format!("The e-mail address {value} is not valid."));
                    current.account.mail.clone()
                }
            },
            None => current.account.mail.clone(),
        };

        check_unique(&accounts, Some(uid), Some(name), Some(mail.as_str()), &mut errors);

        let sensitive_change = mail != current.account.mail || entity.pass.is_some();
        if schema.has_field("current_pass") && sensitive_change {
            let confirmed = match (entity.current_pass.as_deref(), current.password_hash.as_deref()) {
                (Some(given), Some(hash)) => self.password_hasher.verify_password(given, hash)?,
                _ => false,
            };
            if !confirmed {
                errors.record("current_pass", CURRENT_PASSWORD_REQUIRED);
            }
        }

        if !errors.is_empty() {
            return Err(AppError::FieldValidation {
                errors,
                message: None,
            });
        }

        let password_hash = match entity.pass.as_deref() {
            Some(password) => Some(self.password_hasher.hash_password(password)?),
            None => current.password_hash,
        };

        let stored = &mut accounts[index];
        stored.account.name = name.to_owned();
        stored.account.mail = mail;
        stored.password_hash = password_hash;

        info!(account_id = %uid, "account profile saved");
        Ok(stored.account.clone())
    }
}
