use formwork_core::AppError;
use formwork_domain::{FieldKind, FieldSchema};

use super::*;

pub(super) fn build(context: &FormContext) -> AppResult<FormSchema> {
    let account = context.account.as_ref().ok_or_else(|| {
        AppError::Validation("the profile form needs the account being edited".to_owned())
    })?;

    let mut builder = FormSchema::builder(FormKind::Profile)
        .entity("user", None)
        .field(
            FieldSchema::new("name", FieldKind::Text, "Username")?
                .required()
                .with_default_value(account.name.as_str()),
        )
        .field(
            FieldSchema::new("mail", FieldKind::Email, "E-mail address")?
                .required()
                .with_default_value(account.mail.as_str()),
        );

    if context.session.is_account(account.uid) {
        builder = builder.field(
            FieldSchema::new("current_pass", FieldKind::Password, "Current password")?
                .with_description(
                    "Enter your current password to change the E-mail address or Password.",
                ),
        );
    }

    builder
        .field(FieldSchema::new("pass_pass1", FieldKind::Password, "Password")?)
        .field(
            FieldSchema::new("pass_pass2", FieldKind::Password, "Confirm password")?
                .with_description(
                    "To change the current user password, enter the new password in both fields.",
                ),
        )
        .field(FieldSchema::submit("Save")?)
        .button(ButtonSchema::new("cancel", "Cancel", UiAction::Back)?)
        .build()
}
