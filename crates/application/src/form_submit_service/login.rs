use formwork_domain::FormState;
use tracing::{info, warn};

use super::*;

impl FormSubmitService {
    /// Signs in with the submitted name and password.
    ///
    /// Navigates to the site front page on success. A rejection is alerted
    /// as-is and the form stays for another attempt.
    pub async fn submit_login(
        &self,
        state: &FormState,
        token: &CancellationToken,
    ) -> AppResult<SubmitOutcome> {
        let name = state.value("name").unwrap_or_default().trim();
        let pass = state.value("pass").unwrap_or_default();

        match until_cancelled(token, self.backend.authenticator.authenticate(name, pass)).await {
            Ok(session) => {
                info!(account_id = ?session.account_id(), "login succeeded");
                Ok(self.navigate(self.site.front_page.as_str()))
            }
            Err(AppError::Cancelled(_)) => Ok(SubmitOutcome::Cancelled),
            Err(error) => {
                warn!(%error, "login rejected");
                let message = error.user_message();
                self.notify_alert(&message);
                Ok(SubmitOutcome::Rejected {
                    message: Some(message),
                })
            }
        }
    }
}
