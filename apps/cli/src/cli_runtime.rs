use std::collections::BTreeMap;
use std::sync::Arc;

use formwork_application::{
    BackendPorts, FormContext, FormController, FormSubmitService, SubmitOutcome, build_form,
};
use formwork_core::{AppError, AppResult, CurrentSession};
use formwork_domain::FormKind;
use formwork_infrastructure::{
    Argon2PasswordHasher, ConsoleEmailService, ConsoleNavigator, ConsoleNotifier,
    InMemoryAccountDirectory, Notice,
};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::cli_config::CliConfig;
use crate::dev_seed::{self, DEV_SEED_ADMIN_NAME, DEV_SEED_ADMIN_PASSWORD};

pub struct CliRuntime {
    config: CliConfig,
    accounts: Arc<InMemoryAccountDirectory>,
    email: Arc<ConsoleEmailService>,
}

/// A form opened against the runtime with its own UI recorders.
struct OpenForm {
    controller: FormController,
    navigator: Arc<ConsoleNavigator>,
    notifier: Arc<ConsoleNotifier>,
}

impl CliRuntime {
    pub async fn start(config: CliConfig) -> AppResult<Self> {
        let email = Arc::new(ConsoleEmailService::new());
        let accounts = Arc::new(InMemoryAccountDirectory::new(
            Arc::new(Argon2PasswordHasher::new()),
            email.clone(),
            config.site.clone(),
            config.reset_requests_per_hour,
        ));
        dev_seed::run(&accounts).await?;

        Ok(Self {
            config,
            accounts,
            email,
        })
    }

    pub async fn schema(&self, kind: FormKind, acting_as: Option<&str>) -> AppResult<Value> {
        let context = self.context(acting_as).await?;
        let schema = build_form(kind, &context)?;
        serde_json::to_value(&schema)
            .map_err(|error| AppError::Internal(format!("failed to serialize schema: {error}")))
    }

    pub async fn submit(
        &self,
        kind: FormKind,
        values: BTreeMap<String, Option<String>>,
        acting_as: Option<&str>,
    ) -> AppResult<Value> {
        let context = self.context(acting_as).await?;
        let mut form = self.open(kind, context)?;
        for (field, value) in values {
            if !form.controller.schema().has_field(&field) {
                warn!(
                    form_id = form.controller.schema().id(),
                    field = %field,
                    "ignoring undeclared value"
                );
            }
            form.controller.set_value(field, value);
        }

        let token = form.controller.cancellation_token();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, discarding form");
                token.cancel();
            }
        });
        let outcome = form.controller.submit().await;
        interrupt.abort();

        Ok(report(&form, &outcome))
    }

    /// Walks through every form against the seeded directory.
    pub async fn demo(&self) -> AppResult<Vec<Value>> {
        let mut reports = Vec::new();

        let steps: [(FormKind, &[(&str, &str)], Option<&str>); 5] = [
            (
                FormKind::Login,
                &[("name", DEV_SEED_ADMIN_NAME), ("pass", "wrong")],
                None,
            ),
            (
                FormKind::Login,
                &[("name", DEV_SEED_ADMIN_NAME), ("pass", DEV_SEED_ADMIN_PASSWORD)],
                None,
            ),
            (
                FormKind::Register,
                &[
                    ("name", "demo"),
                    ("mail", "demo@formwork.local"),
                    ("conf_mail", "demo@formwork.local"),
                    ("pass", "demo"),
                    ("pass2", "demo"),
                ],
                None,
            ),
            (
                FormKind::PasswordReset,
                &[("name", "demo@formwork.local")],
                None,
            ),
            (
                FormKind::Profile,
                &[
                    ("mail", "admin@example.com"),
                    ("current_pass", DEV_SEED_ADMIN_PASSWORD),
                ],
                Some(DEV_SEED_ADMIN_NAME),
            ),
        ];

        for (kind, values, acting_as) in steps {
            let values = values
                .iter()
                .map(|(field, value)| ((*field).to_owned(), Some((*value).to_owned())))
                .collect();
            reports.push(self.submit(kind, values, acting_as).await?);
        }

        info!(sent = self.email.outbox().len(), "demo finished");
        Ok(reports)
    }

    async fn context(&self, acting_as: Option<&str>) -> AppResult<FormContext> {
        let Some(identifier) = acting_as else {
            return Ok(FormContext::new(
                self.config.site.clone(),
                CurrentSession::anonymous(),
            ));
        };

        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await
            .ok_or_else(|| AppError::NotFound(format!("account '{identifier}' does not exist")))?;
        let session = CurrentSession::authenticated(account.uid, account.name.as_str());
        Ok(FormContext::new(self.config.site.clone(), session).editing(account))
    }

    fn open(&self, kind: FormKind, context: FormContext) -> AppResult<OpenForm> {
        let navigator = Arc::new(ConsoleNavigator::new());
        let notifier = Arc::new(ConsoleNotifier::new());
        let backend = BackendPorts {
            authenticator: self.accounts.clone(),
            registrar: self.accounts.clone(),
            reset_requester: self.accounts.clone(),
            entity_submitter: self.accounts.clone(),
        };
        let service = FormSubmitService::new(
            backend,
            navigator.clone(),
            notifier.clone(),
            self.config.site.clone(),
        );

        Ok(OpenForm {
            controller: FormController::open(kind, context, service)?,
            navigator,
            notifier,
        })
    }
}

fn report(form: &OpenForm, outcome: &SubmitOutcome) -> Value {
    let notices: Vec<Value> = form
        .notifier
        .notices()
        .into_iter()
        .map(|notice| match notice {
            Notice::Alert(message) => json!({ "alert": message }),
            Notice::Message(message, severity) => {
                json!({ "message": message, "severity": severity.as_str() })
            }
        })
        .collect();

    json!({
        "form_id": form.controller.schema().id(),
        "outcome": outcome_json(outcome),
        "errors": form.controller.state().errors(),
        "navigations": form.navigator.history(),
        "notices": notices,
    })
}

fn outcome_json(outcome: &SubmitOutcome) -> Value {
    match outcome {
        SubmitOutcome::Navigated { destination } => {
            json!({ "navigated": destination })
        }
        SubmitOutcome::Delegated { account } => json!({ "saved": account }),
        SubmitOutcome::Rejected { message } => json!({ "rejected": message }),
        SubmitOutcome::Invalid => json!("invalid"),
        SubmitOutcome::Cancelled => json!("cancelled"),
        SubmitOutcome::NoOp => json!("no_op"),
    }
}
