//! Fire-and-forget ports into the UI layer.

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    /// Informational confirmation.
    Status,
    /// Something did not work as expected but the user can continue.
    Warning,
    /// The action failed.
    Error,
}

impl MessageSeverity {
    /// Returns stable renderer value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Moves the UI to another page.
pub trait Navigator: Send + Sync {
    /// Navigates to an application path.
    fn navigate(&self, destination: &str);
}

/// Shows user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Shows a blocking alert.
    fn show_alert(&self, message: &str);

    /// Shows an inline message with a severity.
    fn show_message(&self, message: &str, severity: MessageSeverity);
}
