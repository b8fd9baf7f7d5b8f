//! Port fakes shared by the application service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use formwork_core::{AccountId, AppError, AppResult, CurrentSession};
use formwork_domain::{Account, AccountEntity, AccountStatus, FormSchema, FormState, SiteConfig};

use crate::{
    AccountRegistrar, Authenticator, BackendPorts, EntityFormSubmitter, FormSubmitService,
    MessageSeverity, Navigator, Notifier, PasswordResetRequester,
};

fn snapshot<T: Clone>(items: &Mutex<Vec<T>>) -> Vec<T> {
    items.lock().map(|guard| guard.clone()).unwrap_or_default()
}

fn push<T>(items: &Mutex<Vec<T>>, item: T) -> AppResult<()> {
    items
        .lock()
        .map_err(|error| AppError::Internal(format!("failed to lock fake state: {error}")))?
        .push(item);
    Ok(())
}

pub(crate) fn account(uid: u64, name: &str) -> Account {
    Account {
        uid: AccountId::new(uid),
        name: name.to_owned(),
        mail: format!("{name}@example.com"),
        status: AccountStatus::Active,
        created: Utc::now(),
    }
}

/// How the fake backend answers.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) login_rejection: Option<String>,
    pub(crate) register_rejection: Mutex<Option<AppError>>,
    pub(crate) profile_rejection: Mutex<Option<AppError>>,
    pub(crate) reset_sent: bool,
    pub(crate) hang_login: bool,
    pub(crate) cancel_during_login: Option<CancellationToken>,
    pub(crate) logins: Mutex<Vec<(String, String)>>,
    pub(crate) registrations: Mutex<Vec<AccountEntity>>,
    pub(crate) profile_saves: Mutex<Vec<AccountEntity>>,
    pub(crate) resets: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn logins(&self) -> Vec<(String, String)> {
        snapshot(&self.logins)
    }

    pub(crate) fn registrations(&self) -> Vec<AccountEntity> {
        snapshot(&self.registrations)
    }

    pub(crate) fn profile_saves(&self) -> Vec<AccountEntity> {
        snapshot(&self.profile_saves)
    }

    pub(crate) fn resets(&self) -> Vec<String> {
        snapshot(&self.resets)
    }

    fn take(slot: &Mutex<Option<AppError>>) -> Option<AppError> {
        slot.lock().ok().and_then(|mut guard| guard.take())
    }
}

#[async_trait]
impl Authenticator for FakeBackend {
    async fn authenticate(&self, name: &str, pass: &str) -> AppResult<CurrentSession> {
        push(&self.logins, (name.to_owned(), pass.to_owned()))?;
        if self.hang_login {
            std::future::pending::<()>().await;
        }
        if let Some(token) = &self.cancel_during_login {
            token.cancel();
        }
        match &self.login_rejection {
            Some(message) => Err(AppError::Unauthorized(message.clone())),
            None => Ok(CurrentSession::authenticated(AccountId::new(42), name)),
        }
    }
}

#[async_trait]
impl AccountRegistrar for FakeBackend {
    async fn register_account(&self, entity: &AccountEntity) -> AppResult<Account> {
        push(&self.registrations, entity.clone())?;
        if let Some(error) = Self::take(&self.register_rejection) {
            return Err(error);
        }
        Ok(account(42, entity.name.as_deref().unwrap_or("new")))
    }
}

#[async_trait]
impl PasswordResetRequester for FakeBackend {
    async fn request_password_reset(&self, identifier: &str) -> AppResult<bool> {
        push(&self.resets, identifier.to_owned())?;
        Ok(self.reset_sent)
    }
}

#[async_trait]
impl EntityFormSubmitter for FakeBackend {
    async fn submit_entity_form(
        &self,
        _schema: &FormSchema,
        _state: &FormState,
        entity: &AccountEntity,
    ) -> AppResult<Account> {
        push(&self.profile_saves, entity.clone())?;
        if let Some(error) = Self::take(&self.profile_rejection) {
            return Err(error);
        }
        let uid = entity.uid.map(|uid| uid.value()).unwrap_or_default();
        Ok(account(uid, entity.name.as_deref().unwrap_or("unknown")))
    }
}

/// Records every UI call.
#[derive(Default)]
pub(crate) struct RecordingUi {
    navigations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
    messages: Mutex<Vec<(String, MessageSeverity)>>,
}

impl RecordingUi {
    pub(crate) fn navigations(&self) -> Vec<String> {
        snapshot(&self.navigations)
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        snapshot(&self.alerts)
    }

    pub(crate) fn messages(&self) -> Vec<(String, MessageSeverity)> {
        snapshot(&self.messages)
    }
}

impl Navigator for RecordingUi {
    fn navigate(&self, destination: &str) {
        let _ = push(&self.navigations, destination.to_owned());
    }
}

impl Notifier for RecordingUi {
    fn show_alert(&self, message: &str) {
        let _ = push(&self.alerts, message.to_owned());
    }

    fn show_message(&self, message: &str, severity: MessageSeverity) {
        let _ = push(&self.messages, (message.to_owned(), severity));
    }
}

pub(crate) fn service(
    backend: &Arc<FakeBackend>,
    ui: &Arc<RecordingUi>,
    site: SiteConfig,
) -> FormSubmitService {
    FormSubmitService::new(
        BackendPorts {
            authenticator: backend.clone(),
            registrar: backend.clone(),
            reset_requester: backend.clone(),
            entity_submitter: backend.clone(),
        },
        ui.clone(),
        ui.clone(),
        site,
    )
}
