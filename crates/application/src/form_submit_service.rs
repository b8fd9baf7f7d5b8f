//! Submit dispatch for the account forms.
//!
//! Each operation awaits one backend action through a port and decides the
//! follow-up navigation and messaging. Pending actions race the form's
//! cancellation token: once the form is discarded the action is dropped, and
//! a result that lands after cancellation is ignored.

mod login;
mod password_reset;
mod profile;
mod registration;


pub use password_reset::{RESET_NOT_SENT, RESET_SENT};

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use formwork_core::{AppError, AppResult};
use formwork_domain::{Account, SiteConfig};

use crate::{
    AccountRegistrar, Authenticator, EntityFormSubmitter, Navigator, Notifier,
    PasswordResetRequester,
};

/// Backend ports the dispatcher calls into.
#[derive(Clone)]
pub struct BackendPorts {
    /// Signs accounts in.
    pub authenticator: Arc<dyn Authenticator>,
    /// Creates accounts.
    pub registrar: Arc<dyn AccountRegistrar>,
    /// Starts password resets.
    pub reset_requester: Arc<dyn PasswordResetRequester>,
    /// Saves edited entities.
    pub entity_submitter: Arc<dyn EntityFormSubmitter>,
}

/// How a submission resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The UI was sent to another page.
    Navigated {
        /// Destination path.
        destination: String,
    },
    /// The entity was handed to the generic entity submission.
    Delegated {
        /// Saved account.
        account: Account,
    },
    /// The backend refused; errors or an alert were shown and the form stays.
    Rejected {
        /// Alert shown to the user, if any.
        message: Option<String>,
    },
    /// Local validation failed; errors are recorded on the form state.
    Invalid,
    /// The form was discarded before the action resolved.
    Cancelled,
    /// Something unexpected happened; the form stays displayed unchanged.
    NoOp,
}

/// Application service dispatching validated account forms.
#[derive(Clone)]
pub struct FormSubmitService {
    backend: BackendPorts,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    site: SiteConfig,
}

impl FormSubmitService {
    /// Creates a new submit service.
    #[must_use]
    pub fn new(
        backend: BackendPorts,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        site: SiteConfig,
    ) -> Self {
        Self {
            backend,
            navigator,
            notifier,
            site,
        }
    }

    /// Returns the site settings the service dispatches with.
    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    fn navigate(&self, destination: &str) -> SubmitOutcome {
        debug!(destination, "navigating after submit");
        self.navigator.navigate(destination);
        SubmitOutcome::Navigated {
            destination: destination.to_owned(),
        }
    }

    /// Shows an alert through the notifier port.
    pub fn notify_alert(&self, message: &str) {
        self.notifier.show_alert(message);
    }
}

/// Awaits a backend action unless the form is discarded first.
async fn until_cancelled<T>(
    token: &CancellationToken,
    action: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    let result = tokio::select! {
        biased;
        () = token.cancelled() => return Err(discarded()),
        result = action => result,
    };

    if token.is_cancelled() {
        return Err(discarded());
    }

    result
}

fn discarded() -> AppError {
    AppError::Cancelled("the form was discarded before the action resolved".to_owned())
}
