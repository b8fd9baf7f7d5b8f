//! Pure construction of the account form schemas.
//!
//! Every builder is a function of the form kind and an explicit
//! [`FormContext`]; nothing is read from ambient state, so building twice
//! with the same context yields equal schemas.

mod login;
mod password_reset;
mod profile;
mod register;


use formwork_core::{AppResult, CurrentSession};
use formwork_domain::{Account, ButtonSchema, FormKind, FormSchema, SiteConfig, UiAction, paths};

/// Inputs the form builders depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormContext {
    /// Site account settings.
    pub site: SiteConfig,
    /// Account signed in on this device.
    pub session: CurrentSession,
    /// Account edited by the profile form.
    pub account: Option<Account>,
}

impl FormContext {
    /// Creates a context without an edited account.
    #[must_use]
    pub fn new(site: SiteConfig, session: CurrentSession) -> Self {
        Self {
            site,
            session,
            account: None,
        }
    }

    /// Sets the account edited by the profile form.
    #[must_use]
    pub fn editing(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }
}

/// Returns whether the registration entry point should be offered.
///
/// Visitors can only register when nobody is signed in and the site lets
/// visitors create accounts.
#[must_use]
pub fn can_register(context: &FormContext) -> bool {
    !context.session.is_authenticated() && context.site.registration_mode.allows_visitors()
}

/// Builds the schema for a form kind.
pub fn build_form(kind: FormKind, context: &FormContext) -> AppResult<FormSchema> {
    match kind {
        FormKind::Login => login::build(context),
        FormKind::Register => register::build(context),
        FormKind::Profile => profile::build(context),
        FormKind::PasswordReset => password_reset::build(context),
    }
}

fn create_account_button() -> AppResult<ButtonSchema> {
    ButtonSchema::new(
        "create_new_account",
        "Create new account",
        UiAction::Navigate {
            path: paths::REGISTER.to_owned(),
        },
    )
}

fn submit_on_enter(kind: FormKind) -> UiAction {
    UiAction::SubmitOnEnter {
        form_id: kind.form_id().to_owned(),
    }
}
