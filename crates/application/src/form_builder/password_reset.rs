use formwork_domain::{FieldKind, FieldSchema, UiEvent};

use super::*;

pub(super) fn build(context: &FormContext) -> AppResult<FormSchema> {
    let mut builder = FormSchema::builder(FormKind::PasswordReset)
        .field(
            FieldSchema::new("name", FieldKind::Text, "Username or e-mail address")?
                .required()
                .on(UiEvent::KeyPress, submit_on_enter(FormKind::PasswordReset)),
        )
        .field(FieldSchema::submit("E-mail new password")?);

    if can_register(context) {
        builder = builder.button(create_account_button()?);
    }

    builder.build()
}
