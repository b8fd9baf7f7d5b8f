use std::sync::{Arc, Mutex};

use formwork_core::{AccountId, AppError, AppResult, CurrentSession};
use formwork_domain::{FormKind, RegistrationMode, SiteConfig};

use super::FormController;
use crate::test_support::{FakeBackend, RecordingUi, account, service};
use crate::{FormContext, PASSWORDS_MISMATCH, SubmitOutcome};

fn open(
    kind: FormKind,
    context: FormContext,
    backend: &Arc<FakeBackend>,
    ui: &Arc<RecordingUi>,
) -> AppResult<FormController> {
    let service = service(backend, ui, context.site.clone());
    FormController::open(kind, context, service)
}

fn anonymous() -> FormContext {
    FormContext::new(SiteConfig::default(), CurrentSession::anonymous())
}

fn own_profile() -> FormContext {
    FormContext::new(
        SiteConfig::default(),
        CurrentSession::authenticated(AccountId::new(3), "alice"),
    )
    .editing(account(3, "alice"))
}

#[tokio::test]
async fn invalid_submission_never_reaches_the_backend() -> AppResult<()> {
    let backend = Arc::new(FakeBackend::default());
    let ui = Arc::new(RecordingUi::default());
    let mut form = open(FormKind::Register, anonymous(), &backend, &ui)?;
    for (field, value) in [
        ("name", "alice"),
        ("mail", "alice@example.com"),
        ("conf_mail", "alice@example.com"),
        ("pass", "one"),
        ("pass2", "two"),
    ] {
        form.set_value(field, Some(value.to_owned()));
    }

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.state().errors().get("pass"), Some(PASSWORDS_MISMATCH));
    assert!(backend.registrations().is_empty());
    Ok(())
}

#[tokio::test]
async fn resubmitting_clears_stale_errors() -> AppResult<()> {
    let backend = Arc::new(FakeBackend::default());
    let ui = Arc::new(RecordingUi::default());
    let mut form = open(FormKind::Login, anonymous(), &backend, &ui)?;

    assert_eq!(form.submit().await, SubmitOutcome::Invalid);
    assert!(form.state().errors().contains("name"));

    form.set_value("name", Some("alice".to_owned()));
    form.set_value("pass", Some("secret".to_owned()));
    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Navigated {
            destination: "dashboard".to_owned()
        }
    );
    assert!(!form.state().has_errors());
    Ok(())
}

#[tokio::test]
async fn discarded_form_does_not_submit() -> AppResult<()> {
    let backend = Arc::new(FakeBackend::default());
    let ui = Arc::new(RecordingUi::default());
    let mut form = open(FormKind::PasswordReset, anonymous(), &backend, &ui)?;
    form.set_value("name", Some("alice".to_owned()));

    form.cancellation_token().cancel();

    assert!(form.is_discarded());
    assert_eq!(form.submit().await, SubmitOutcome::Cancelled);
    assert!(backend.resets().is_empty());
    assert!(ui.navigations().is_empty());
    Ok(())
}

#[tokio::test]
async fn profile_field_rejection_is_merged_and_alerted() -> AppResult<()> {
    let backend = Arc::new(FakeBackend {
        profile_rejection: Mutex::new(Some(AppError::FieldValidation {
            errors: [("current_pass", "Your current password is missing or incorrect.")]
                .into_iter()
                .collect(),
            message: None,
        })),
        ..FakeBackend::default()
    });
    let ui = Arc::new(RecordingUi::default());
    let mut form = open(FormKind::Profile, own_profile(), &backend, &ui)?;
    form.set_value("pass_pass1", Some("new-secret".to_owned()));
    form.set_value("pass_pass2", Some("new-secret".to_owned()));

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Rejected { message: None });
    assert_eq!(
        form.state().errors().get("current_pass"),
        Some("Your current password is missing or incorrect.")
    );
    assert!(ui.alerts().is_empty());
    Ok(())
}

#[tokio::test]
async fn unexpected_profile_failure_degrades_to_no_op() -> AppResult<()> {
    let backend = Arc::new(FakeBackend {
        profile_rejection: Mutex::new(Some(AppError::Internal("broken pipe".to_owned()))),
        ..FakeBackend::default()
    });
    let ui = Arc::new(RecordingUi::default());
    let mut form = open(FormKind::Profile, own_profile(), &backend, &ui)?;
    let before = form.state().clone();

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::NoOp);
    assert_eq!(form.state(), &before);
    assert!(ui.navigations().is_empty());
    assert!(ui.alerts().is_empty());
    Ok(())
}

#[tokio::test]
async fn verified_site_registration_goes_home_without_login() -> AppResult<()> {
    let backend = Arc::new(FakeBackend::default());
    let ui = Arc::new(RecordingUi::default());
    let context = FormContext::new(
        SiteConfig {
            requires_email_verification: true,
            registration_mode: RegistrationMode::Open,
            front_page: "dashboard".to_owned(),
        },
        CurrentSession::anonymous(),
    );
    let mut form = open(FormKind::Register, context, &backend, &ui)?;
    form.set_value("name", Some("alice".to_owned()));
    form.set_value("mail", Some("alice@example.com".to_owned()));

    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Navigated {
            destination: String::new()
        }
    );
    assert!(backend.logins().is_empty());
    assert_eq!(backend.registrations().len(), 1);
    Ok(())
}
