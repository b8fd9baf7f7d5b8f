use async_trait::async_trait;
use formwork_application::PasswordResetRequester;
use tracing::{info, warn};

use super::*;

#[async_trait]
impl PasswordResetRequester for InMemoryAccountDirectory {
    async fn request_password_reset(&self, identifier: &str) -> AppResult<bool> {
        let key = identifier.trim().to_lowercase();
        let one_hour_ago = Utc::now() - chrono::Duration::hours(1);

        {
            let mut requests = self.reset_requests.write().await;
            requests.retain(|_, recent| {
                recent.retain(|requested_at| *requested_at > one_hour_ago);
                !recent.is_empty()
            });
            let recent = requests.entry(key).or_default();
            if recent.len() >= self.reset_requests_per_hour {
                warn!("password reset request rate limited");
                return Ok(false);
            }
            recent.push(Utc::now());
        }

        let Some(account) = self.find_by_identifier(identifier).await else {
            return Ok(false);
        };

        if account.status == AccountStatus::Blocked {
            return Ok(false);
        }

        let body = format!(
            "A request to reset the password for {} has been made.\n\n\
             Use the one-time login link sent with this message to choose a new password.\n\n\
             If you did not request this, you can safely ignore this email.",
            account.name
        );

        match self
            .email_service
            .send_email(&account.mail, "Replacement login information", &body)
            .await
        {
            Ok(()) => {
                info!(account_id = %account.uid, "password reset e-mail sent");
                Ok(true)
            }
            Err(error) => {
                warn!(%error, account_id = %account.uid, "failed to send password reset e-mail");
                Ok(false)
            }
        }
    }
}
