use formwork_domain::{FormSchema, FormState, RegistrationMode, paths};
use tracing::{info, warn};

use crate::build_account_entity;

use super::*;

impl FormSubmitService {
    /// Registers an account from the submitted registration form.
    ///
    /// On success the follow-up is checked in order: the verification flag
    /// the form was built with, administrator approval, then an open site where
    /// the new account is signed in when the form asks for it. Backend field
    /// errors are merged into `state`; any other message is alerted.
    pub async fn submit_register(
        &self,
        schema: &FormSchema,
        state: &mut FormState,
        token: &CancellationToken,
    ) -> AppResult<SubmitOutcome> {
        let entity = build_account_entity(schema, state, None);
        let messages = schema.registration_messages().cloned().unwrap_or_default();

        let account =
            match until_cancelled(token, self.backend.registrar.register_account(&entity)).await {
                Ok(account) => account,
                Err(AppError::Cancelled(_)) => return Ok(SubmitOutcome::Cancelled),
                Err(AppError::FieldValidation { errors, message }) => {
                    warn!(%errors, "registration rejected with field errors");
                    state.merge_errors(&errors);
                    if let Some(message) = message.as_deref() {
                        self.notify_alert(message);
                    }
                    return Ok(SubmitOutcome::Rejected { message });
                }
                Err(error) => {
                    warn!(%error, "registration failed");
                    let message = error.user_message();
                    self.notify_alert(&message);
                    return Ok(SubmitOutcome::Rejected {
                        message: Some(message),
                    });
                }
            };

        info!(account_id = %account.uid, "account registered");

        if schema.flags().email_verification {
            self.notify_alert(&messages.email_verification);
            return Ok(self.navigate(paths::HOME));
        }

        if self.site.registration_mode == RegistrationMode::ApprovalRequired {
            self.notify_alert(&messages.pending_approval);
            return Ok(self.navigate(paths::HOME));
        }

        self.notify_alert(&messages.no_approval_required);

        if !schema.flags().auto_user_login {
            return Ok(self.navigate(paths::HOME));
        }

        let Some(credentials) = entity.credentials() else {
            return Ok(self.navigate(paths::HOME));
        };

        let login = self
            .backend
            .authenticator
            .authenticate(&credentials.name, &credentials.pass);
        match until_cancelled(token, login).await {
            Ok(_) => Ok(self.navigate(paths::HOME)),
            Err(AppError::Cancelled(_)) => Ok(SubmitOutcome::Cancelled),
            Err(error) => {
                warn!(%error, "automatic login after registration failed");
                self.notify_alert(&error.user_message());
                Ok(self.navigate(paths::LOGIN))
            }
        }
    }
}
