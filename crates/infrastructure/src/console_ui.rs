//! Console stand-ins for the UI ports. Every call is logged and kept.

use std::sync::Mutex;

use formwork_application::{MessageSeverity, Navigator, Notifier};
use tracing::{info, warn};

/// A notification shown through [`ConsoleNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking alert.
    Alert(String),
    /// Inline message.
    Message(String, MessageSeverity),
}

/// Navigator that logs destinations.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    history: Mutex<Vec<String>>,
}

impl ConsoleNavigator {
    /// Creates a navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns visited destinations, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, destination: &str) {
        let shown = if destination.is_empty() { "<front>" } else { destination };
        info!(destination = shown, "navigate");
        if let Ok(mut history) = self.history.lock() {
            history.push(destination.to_owned());
        }
    }
}

/// Notifier that logs alerts and messages.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl ConsoleNotifier {
    /// Creates a notifier with no notices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns shown notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn record(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn show_alert(&self, message: &str) {
        info!(message, "alert");
        self.record(Notice::Alert(message.to_owned()));
    }

    fn show_message(&self, message: &str, severity: MessageSeverity) {
        match severity {
            MessageSeverity::Status => info!(message, severity = severity.as_str(), "message"),
            MessageSeverity::Warning | MessageSeverity::Error => {
                warn!(message, severity = severity.as_str(), "message");
            }
        }
        self.record(Notice::Message(message.to_owned(), severity));
    }
}
