use formwork_domain::{FormState, paths};

use crate::MessageSeverity;

use super::*;

/// Shown when the reset e-mail went out.
pub const RESET_SENT: &str = "Further instructions have been sent to your e-mail address.";
/// Shown when the backend could not send the reset e-mail.
pub const RESET_NOT_SENT: &str = "There was a problem sending an e-mail to your address.";

impl FormSubmitService {
    /// Requests a password reset e-mail for the submitted name or address.
    ///
    /// Always returns to the login form once the backend answers.
    pub async fn submit_password_reset(
        &self,
        state: &FormState,
        token: &CancellationToken,
    ) -> AppResult<SubmitOutcome> {
        let identifier = state.value("name").unwrap_or_default().trim();

        let request = self.backend.reset_requester.request_password_reset(identifier);
        let sent = match until_cancelled(token, request).await {
            Ok(sent) => sent,
            Err(AppError::Cancelled(_)) => return Ok(SubmitOutcome::Cancelled),
            Err(error) => return Err(error),
        };

        if sent {
            self.notifier.show_message(RESET_SENT, MessageSeverity::Status);
        } else {
            self.notifier
                .show_message(RESET_NOT_SENT, MessageSeverity::Warning);
        }

        Ok(self.navigate(paths::LOGIN))
    }
}
