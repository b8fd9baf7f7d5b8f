//! Ports to the remote account backend.
//!
//! Every backend action is asynchronous and resolves to an [`AppResult`].
//! Field-attributable rejections are reported as
//! [`formwork_core::AppError::FieldValidation`].

use async_trait::async_trait;

use formwork_core::{AppResult, CurrentSession};
use formwork_domain::{Account, AccountEntity, FormSchema, FormState};

/// Signs accounts in.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates a user name (or e-mail) and password.
    async fn authenticate(&self, name: &str, pass: &str) -> AppResult<CurrentSession>;
}

/// Creates accounts.
#[async_trait]
pub trait AccountRegistrar: Send + Sync {
    /// Registers a new account from a form-built entity.
    async fn register_account(&self, entity: &AccountEntity) -> AppResult<Account>;
}

/// Starts the password reset flow.
#[async_trait]
pub trait PasswordResetRequester: Send + Sync {
    /// Requests a reset e-mail for a user name or e-mail address.
    ///
    /// Resolves to whether an e-mail was actually sent.
    async fn request_password_reset(&self, identifier: &str) -> AppResult<bool>;
}

/// Generic entity form submission used by the profile form.
#[async_trait]
pub trait EntityFormSubmitter: Send + Sync {
    /// Saves an entity built from a submitted form.
    async fn submit_entity_form(
        &self,
        schema: &FormSchema,
        state: &FormState,
        entity: &AccountEntity,
    ) -> AppResult<Account>;
}

/// Port for password hashing operations. Keeps backend adapters free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Port for sending emails. Infrastructure provides console implementations.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a plain-text email.
    async fn send_email(&self, to: &str, subject: &str, text_body: &str) -> AppResult<()>;
}
