use formwork_domain::{FieldKind, FieldSchema, FormFlags, RegistrationMessages};

use super::*;

pub(super) fn build(context: &FormContext) -> AppResult<FormSchema> {
    let email_verification = context.site.requires_email_verification;

    let mut builder = FormSchema::builder(FormKind::Register)
        .entity("user", None)
        .field(
            FieldSchema::new("name", FieldKind::Text, "Username")?
                .title_placeholder()
                .required()
                .with_description(
                    "Spaces are allowed; punctuation is not allowed except for periods, \
                     hyphens, apostrophes, and underscores.",
                ),
        )
        .field(
            FieldSchema::new("mail", FieldKind::Email, "E-mail address")?
                .title_placeholder()
                .required(),
        );

    // Verified sites e-mail a one-time login link instead of asking for a password.
    if !email_verification {
        builder = builder
            .field(
                FieldSchema::new("conf_mail", FieldKind::Email, "Confirm e-mail address")?
                    .title_placeholder()
                    .required(),
            )
            .field(
                FieldSchema::new("pass", FieldKind::Password, "Password")?
                    .title_placeholder()
                    .required(),
            )
            .field(
                FieldSchema::new("pass2", FieldKind::Password, "Confirm password")?
                    .title_placeholder()
                    .required(),
            );
    }

    builder
        .registration_messages(RegistrationMessages::default())
        .flags(FormFlags {
            auto_user_login: true,
            email_verification,
        })
        .field(FieldSchema::submit("Create new account")?)
        .build()
}
