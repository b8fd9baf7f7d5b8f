//! Console email service for development. Logs emails to tracing output.

use std::sync::Mutex;

use async_trait::async_trait;
use formwork_application::EmailService;
use formwork_core::{AppError, AppResult};
use tracing::info;

/// An email captured by [`ConsoleEmailService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Development email service that logs emails to the console and keeps them.
#[derive(Debug, Default)]
pub struct ConsoleEmailService {
    outbox: Mutex<Vec<SentEmail>>,
}

impl ConsoleEmailService {
    /// Creates a new console email service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every email sent so far.
    #[must_use]
    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(&self, to: &str, subject: &str, text_body: &str) -> AppResult<()> {
        info!(
            to = to,
            subject = subject,
            "--- EMAIL (console) ---\nTo: {}\nSubject: {}\n\n{}\n--- END EMAIL ---",
            to,
            subject,
            text_body
        );

        self.outbox
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock outbox: {error}")))?
            .push(SentEmail {
                to: to.to_owned(),
                subject: subject.to_owned(),
                body: text_body.to_owned(),
            });

        Ok(())
    }
}
