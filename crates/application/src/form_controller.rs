//! One open form instance and the failure boundary around it.
//!
//! The controller owns the schema and state of a single form. `submit`
//! borrows it mutably, so one instance can only have one submit in flight.
//! Discarding the form cancels its token; a pending backend action is then
//! dropped and its result never touches the UI.

#[cfg(test)]
mod tests;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use formwork_core::{AppError, AppResult};
use formwork_domain::{FormKind, FormSchema, FormState};

use crate::{FormContext, FormSubmitService, SubmitOutcome, ValidationResult, build_form, validate};

/// An open account form bound to the submit service.
pub struct FormController {
    instance_id: Uuid,
    context: FormContext,
    schema: FormSchema,
    state: FormState,
    service: FormSubmitService,
    token: CancellationToken,
}

impl FormController {
    /// Builds the schema for `kind` and opens an empty, prefilled form.
    pub fn open(
        kind: FormKind,
        context: FormContext,
        service: FormSubmitService,
    ) -> AppResult<Self> {
        let schema = build_form(kind, &context)?;
        let state = FormState::from_defaults(&schema);
        let instance_id = Uuid::new_v4();

        info!(form_id = schema.id(), %instance_id, "form opened");

        Ok(Self {
            instance_id,
            context,
            schema,
            state,
            service,
            token: CancellationToken::new(),
        })
    }

    /// Returns the per-instance identifier used in logs.
    #[must_use]
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Returns the schema the UI renders.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns submitted values and recorded errors.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Sets a submitted value.
    pub fn set_value(&mut self, field: impl Into<String>, value: Option<String>) {
        self.state.set_value(field, value);
    }

    /// Returns a token the UI cancels when it navigates away from the form.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Returns whether the form was discarded.
    #[must_use]
    pub fn is_discarded(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Discards the form; pending and future submits resolve as cancelled.
    pub fn discard(&self) {
        self.token.cancel();
    }

    /// Validates and dispatches the current state.
    ///
    /// Never fails: field errors land on the state, backend refusals are
    /// alerted, and unexpected errors are logged and leave the form as it
    /// was.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.is_discarded() {
            return SubmitOutcome::Cancelled;
        }

        self.state.clear_errors();
        if let ValidationResult::Invalid(errors) = validate(&self.schema, &self.state) {
            info!(form_id = self.schema.id(), %errors, "form failed validation");
            self.state.merge_errors(&errors);
            return SubmitOutcome::Invalid;
        }

        match self.dispatch().await {
            Ok(outcome) => outcome,
            Err(error) => self.recover(error),
        }
    }

    async fn dispatch(&mut self) -> AppResult<SubmitOutcome> {
        match self.schema.kind() {
            FormKind::Login => self.service.submit_login(&self.state, &self.token).await,
            FormKind::Register => {
                self.service
                    .submit_register(&self.schema, &mut self.state, &self.token)
                    .await
            }
            FormKind::Profile => {
                let existing = self.context.account.as_ref().ok_or_else(|| {
                    AppError::Internal("profile form opened without an account".to_owned())
                })?;
                self.service
                    .submit_profile(&self.schema, &self.state, existing, &self.token)
                    .await
            }
            FormKind::PasswordReset => {
                self.service
                    .submit_password_reset(&self.state, &self.token)
                    .await
            }
        }
    }

    fn recover(&mut self, error: AppError) -> SubmitOutcome {
        let form_id = self.schema.id();
        match error {
            AppError::Cancelled(_) => SubmitOutcome::Cancelled,
            AppError::FieldValidation { errors, message } => {
                warn!(form_id, %errors, "backend rejected form fields");
                self.state.merge_errors(&errors);
                if let Some(message) = message.as_deref() {
                    self.service.notify_alert(message);
                }
                SubmitOutcome::Rejected { message }
            }
            AppError::Server(_)
            | AppError::Unauthorized(_)
            | AppError::NotFound(_)
            | AppError::Conflict(_) => {
                warn!(form_id, %error, "backend refused form submission");
                let message = error.user_message();
                self.service.notify_alert(&message);
                SubmitOutcome::Rejected {
                    message: Some(message),
                }
            }
            AppError::Validation(_) | AppError::Internal(_) => {
                error!(form_id, instance_id = %self.instance_id, %error, "form submit failed unexpectedly");
                SubmitOutcome::NoOp
            }
        }
    }
}
