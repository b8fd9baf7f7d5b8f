use formwork_domain::{FieldKind, FieldSchema, UiEvent};

use super::*;

pub(super) fn build(context: &FormContext) -> AppResult<FormSchema> {
    let mut builder = FormSchema::builder(FormKind::Login)
        .entity("user", None)
        .field(
            FieldSchema::new("name", FieldKind::Text, "Username")?
                .title_placeholder()
                .required(),
        )
        .field(
            FieldSchema::new("pass", FieldKind::Password, "Password")?
                .title_placeholder()
                .required()
                .on(UiEvent::KeyPress, submit_on_enter(FormKind::Login)),
        )
        .field(FieldSchema::submit("Login")?);

    if can_register(context) {
        builder = builder.button(create_account_button()?);
    }

    builder
        .button(ButtonSchema::new(
            "forgot_password",
            "Request new password",
            UiAction::Navigate {
                path: paths::PASSWORD.to_owned(),
            },
        )?)
        .build()
}
