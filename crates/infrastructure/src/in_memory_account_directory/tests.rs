use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use formwork_application::{
    AccountRegistrar, Authenticator, BackendPorts, EmailService, EntityFormSubmitter,
    FormContext, FormController, FormSubmitService, PasswordResetRequester, SubmitOutcome,
    build_account_entity, build_form,
};
use formwork_core::{AppError, AppResult, CurrentSession};
use formwork_domain::{
    AccountEntity, AccountStatus, FormKind, FormState, RegistrationMode, SiteConfig,
};

use super::{InMemoryAccountDirectory, WRONG_CREDENTIALS};
use crate::{Argon2PasswordHasher, ConsoleEmailService, ConsoleNavigator, ConsoleNotifier, Notice};

struct FailingEmailService;

#[async_trait]
impl EmailService for FailingEmailService {
    async fn send_email(&self, _to: &str, _subject: &str, _text_body: &str) -> AppResult<()> {
        Err(AppError::Server("mail transport unavailable".to_owned()))
    }
}

fn directory(site: SiteConfig, email: Arc<dyn EmailService>) -> InMemoryAccountDirectory {
    InMemoryAccountDirectory::new(Arc::new(Argon2PasswordHasher::fast()), email, site, 3)
}

fn new_account(name: &str, mail: &str, pass: Option<&str>) -> AccountEntity {
    AccountEntity {
        name: Some(name.to_owned()),
        mail: Some(mail.to_owned()),
        pass: pass.map(str::to_owned),
        ..AccountEntity::default()
    }
}

#[tokio::test]
async fn authenticates_by_name_or_mail() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    let alice = accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    let by_name = accounts.authenticate("Alice", "secret").await?;
    let by_mail = accounts.authenticate("ALICE@example.com", "secret").await?;

    assert!(by_name.is_account(alice.uid));
    assert_eq!(by_mail.name(), Some("alice"));
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_name_share_one_message() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    for (name, pass) in [("alice", "wrong"), ("nobody", "secret")] {
        let error = accounts.authenticate(name, pass).await;
        assert!(
            matches!(&error, Err(AppError::Unauthorized(message)) if message == WRONG_CREDENTIALS),
            "unexpected result for {name}: {error:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn blocked_account_cannot_sign_in() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts
        .seed_account("bob", "bob@example.com", "secret", AccountStatus::Blocked)
        .await?;

    let error = accounts.authenticate("bob", "secret").await;
    assert!(
        matches!(&error, Err(AppError::Unauthorized(message)) if message.contains("blocked"))
    );
    Ok(())
}

#[tokio::test]
async fn seeding_a_taken_name_is_a_conflict() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    let duplicate = accounts
        .seed_account("ALICE", "other@example.com", "secret", AccountStatus::Active)
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn registration_reports_taken_fields() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    let result = accounts
        .register_account(&new_account("alice", "alice@example.com", Some("pw")))
        .await;

    let Err(AppError::FieldValidation { errors, .. }) = result else {
        panic!("expected field errors, got {result:?}");
    };
    assert_eq!(errors.get("name"), Some("The name alice is already taken."));
    assert_eq!(
        errors.get("mail"),
        Some("The e-mail address alice@example.com is already taken.")
    );
    Ok(())
}

#[tokio::test]
async fn registration_requires_password_without_verification() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));

    let result = accounts
        .register_account(&new_account("carol", "carol@example.com", None))
        .await;

    assert!(matches!(
        result,
        Err(AppError::FieldValidation { ref errors, .. }) if errors.contains("pass")
    ));
    Ok(())
}

#[tokio::test]
async fn approval_mode_registers_blocked_accounts() -> AppResult<()> {
    let site = SiteConfig {
        registration_mode: RegistrationMode::ApprovalRequired,
        ..SiteConfig::default()
    };
    let accounts = directory(site, Arc::new(ConsoleEmailService::new()));

    let account = accounts
        .register_account(&new_account("dave", "Dave@Example.com", Some("pw")))
        .await?;

    assert_eq!(account.status, AccountStatus::Blocked);
    assert_eq!(account.mail, "dave@example.com");
    assert!(accounts.authenticate("dave", "pw").await.is_err());

    accounts.activate(account.uid).await?;
    assert!(accounts.authenticate("dave", "pw").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn administrators_only_mode_rejects_visitors() {
    let site = SiteConfig {
        registration_mode: RegistrationMode::AdministratorsOnly,
        ..SiteConfig::default()
    };
    let accounts = directory(site, Arc::new(ConsoleEmailService::new()));

    let result = accounts
        .register_account(&new_account("erin", "erin@example.com", Some("pw")))
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn verification_mode_mails_the_new_account() -> AppResult<()> {
    let site = SiteConfig {
        requires_email_verification: true,
        ..SiteConfig::default()
    };
    let email = Arc::new(ConsoleEmailService::new());
    let accounts = directory(site, email.clone());

    let account = accounts
        .register_account(&new_account("frank", "frank@example.com", None))
        .await?;

    let outbox = email.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, account.mail);
    assert!(accounts.authenticate("frank", "anything").await.is_err());
    Ok(())
}

#[tokio::test]
async fn password_reset_sends_mail_to_known_accounts() -> AppResult<()> {
    let email = Arc::new(ConsoleEmailService::new());
    let accounts = directory(SiteConfig::default(), email.clone());
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    assert!(accounts.request_password_reset("alice@example.com").await?);
    assert!(!accounts.request_password_reset("nobody").await?);

    let outbox = email.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].subject, "Replacement login information");
    Ok(())
}

#[tokio::test]
async fn password_reset_is_rate_limited_per_identifier() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    for _ in 0..3 {
        assert!(accounts.request_password_reset("alice").await?);
    }
    assert!(!accounts.request_password_reset("ALICE").await?);
    assert!(accounts.request_password_reset("alice@example.com").await?);
    Ok(())
}

#[tokio::test]
async fn password_reset_forgets_identifiers_older_than_an_hour() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    accounts.reset_requests.write().await.insert(
        "stale".to_owned(),
        vec![Utc::now() - chrono::Duration::hours(2)],
    );

    assert!(!accounts.request_password_reset("nobody").await?);

    let requests = accounts.reset_requests.read().await;
    assert!(!requests.contains_key("stale"));
    assert_eq!(requests.get("nobody").map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn password_reset_reports_mail_failure_as_not_sent() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(FailingEmailService));
    accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;

    assert!(!accounts.request_password_reset("alice").await?);
    Ok(())
}

fn profile_state(name: &str, mail: &str, current: Option<&str>, pass: Option<&str>) -> FormState {
    let mut state = FormState::new()
        .with_value("name", name)
        .with_value("mail", mail);
    state.set_value("current_pass", current.map(str::to_owned));
    state.set_value("pass_pass1", pass.map(str::to_owned));
    state.set_value("pass_pass2", pass.map(str::to_owned));
    state
}

#[tokio::test]
async fn profile_mail_change_needs_current_password() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    let alice = accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;
    let context = FormContext::new(
        SiteConfig::default(),
        CurrentSession::authenticated(alice.uid, "alice"),
    )
    .editing(alice.clone());
    let schema = build_form(FormKind::Profile, &context)?;

    let missing = profile_state("alice", "new@example.com", None, None);
    let entity = build_account_entity(&schema, &missing, Some(&alice));
    let result = accounts.submit_entity_form(&schema, &missing, &entity).await;
    assert!(matches!(
        result,
        Err(AppError::FieldValidation { ref errors, .. }) if errors.contains("current_pass")
    ));

    let confirmed = profile_state("alice", "new@example.com", Some("secret"), Some("fresh"));
    let entity = build_account_entity(&schema, &confirmed, Some(&alice));
    let saved = accounts.submit_entity_form(&schema, &confirmed, &entity).await?;

    assert_eq!(saved.mail, "new@example.com");
    assert!(accounts.authenticate("alice", "fresh").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn profile_rename_to_taken_name_is_rejected() -> AppResult<()> {
    let accounts = directory(SiteConfig::default(), Arc::new(ConsoleEmailService::new()));
    let alice = accounts
        .seed_account("alice", "alice@example.com", "secret", AccountStatus::Active)
        .await?;
    accounts
        .seed_account("bob", "bob@example.com", "secret", AccountStatus::Active)
        .await?;
    let context = FormContext::new(
        SiteConfig::default(),
        CurrentSession::authenticated(alice.uid, "alice"),
    )
    .editing(alice.clone());
    let schema = build_form(FormKind::Profile, &context)?;

    let state = profile_state("bob", "alice@example.com", None, None);
    let entity = build_account_entity(&schema, &state, Some(&alice));
    let result = accounts.submit_entity_form(&schema, &state, &entity).await;

    assert!(matches!(
        result,
        Err(AppError::FieldValidation { ref errors, .. }) if errors.contains("name")
    ));
    assert_eq!(accounts.find(alice.uid).await.map(|account| account.name), Some("alice".to_owned()));
    Ok(())
}

struct Harness {
    accounts: Arc<InMemoryAccountDirectory>,
    navigator: Arc<ConsoleNavigator>,
    notifier: Arc<ConsoleNotifier>,
}

impl Harness {
    fn new(site: SiteConfig) -> Self {
        Self {
            accounts: Arc::new(directory(site, Arc::new(ConsoleEmailService::new()))),
            navigator: Arc::new(ConsoleNavigator::new()),
            notifier: Arc::new(ConsoleNotifier::new()),
        }
    }

    fn open(&self, kind: FormKind, context: FormContext) -> AppResult<FormController> {
        let backend = BackendPorts {
            authenticator: self.accounts.clone(),
            registrar: self.accounts.clone(),
            reset_requester: self.accounts.clone(),
            entity_submitter: self.accounts.clone(),
        };
        let service = FormSubmitService::new(
            backend,
            self.navigator.clone(),
            self.notifier.clone(),
            context.site.clone(),
        );
        FormController::open(kind, context, service)
    }
}

#[tokio::test]
async fn registration_form_signs_the_new_account_in() -> AppResult<()> {
    let harness = Harness::new(SiteConfig::default());
    let mut form = harness.open(
        FormKind::Register,
        FormContext::new(SiteConfig::default(), CurrentSession::anonymous()),
    )?;
    for (field, value) in [
        ("name", "grace"),
        ("mail", "grace@example.com"),
        ("conf_mail", "grace@example.com"),
        ("pass", "pw"),
        ("pass2", "pw"),
    ] {
        form.set_value(field, Some(value.to_owned()));
    }

    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Navigated {
            destination: String::new()
        }
    );
    assert_eq!(
        harness.notifier.notices(),
        vec![Notice::Alert("Registration complete!".to_owned())]
    );
    assert!(harness.accounts.find_by_identifier("grace").await.is_some());
    Ok(())
}

#[tokio::test]
async fn login_form_alerts_backend_rejection() -> AppResult<()> {
    let harness = Harness::new(SiteConfig::default());
    let mut form = harness.open(
        FormKind::Login,
        FormContext::new(SiteConfig::default(), CurrentSession::anonymous()),
    )?;
    form.set_value("name", Some("nobody".to_owned()));
    form.set_value("pass", Some("pw".to_owned()));

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
    assert_eq!(
        harness.notifier.notices(),
        vec![Notice::Alert(WRONG_CREDENTIALS.to_owned())]
    );
    assert!(harness.navigator.history().is_empty());
    Ok(())
}
