//! Application services and ports.

#![forbid(unsafe_code)]

mod account_ports;
mod entity_builder;
mod form_builder;
mod form_controller;
mod form_submit_service;
mod form_validation;
#[cfg(test)]
mod test_support;
mod ui_ports;

pub use account_ports::{
    AccountRegistrar, Authenticator, EmailService, EntityFormSubmitter, PasswordHasher,
    PasswordResetRequester,
};
pub use entity_builder::build_account_entity;
pub use form_builder::{FormContext, build_form, can_register};
pub use form_controller::FormController;
pub use form_submit_service::{
    BackendPorts, FormSubmitService, RESET_NOT_SENT, RESET_SENT, SubmitOutcome,
};
pub use form_validation::{
    MAILS_MISMATCH, NEW_PASSWORDS_MISMATCH, PASSWORDS_MISMATCH, ValidationResult, validate,
};
pub use ui_ports::{MessageSeverity, Navigator, Notifier};
