//! Schema-driven validation of submitted form values.
//!
//! Rules run in three passes: the structural required check, the base rule
//! of the field kind, then the rules of the form itself. A field that already
//! failed keeps its first error and is skipped by later passes, but every
//! field is visited so the result carries all errors found in one pass.


use formwork_core::FieldErrors;
use formwork_domain::{EmailAddress, FieldKind, FormKind, FormSchema, FormState};

/// Shown when the two registration passwords differ.
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match!";
/// Shown when the two e-mail addresses differ.
pub const MAILS_MISMATCH: &str = "E-mail addresses do not match!";
/// Shown when the two new profile passwords differ.
pub const NEW_PASSWORDS_MISMATCH: &str = "The specified passwords do not match.";

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every rule passed.
    Valid,
    /// At least one field failed.
    Invalid(FieldErrors),
}

impl ValidationResult {
    /// Returns whether every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the field errors, empty when valid.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }
}

/// Validates a submission against its schema. Pure and synchronous.
#[must_use]
pub fn validate(schema: &FormSchema, state: &FormState) -> ValidationResult {
    let mut errors = FieldErrors::new();

    for field in schema.fields() {
        if field.kind().is_control() {
            continue;
        }
        if field.is_required() && state.is_blank(field.name()) {
            errors.record(field.name(), format!("{} field is required.", field.label()));
        }
    }

    for field in schema.fields() {
        if errors.contains(field.name()) || field.kind() != FieldKind::Email {
            continue;
        }
        if let Some(value) = state.non_blank(field.name())
            && EmailAddress::new(value).is_err()
        {
            errors.record(
                field.name(),
                format!("The e-mail address {} is not valid.", value.trim()),
            );
        }
    }

    apply_form_rules(schema, state, &mut errors);

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(errors)
    }
}

fn apply_form_rules(schema: &FormSchema, state: &FormState, errors: &mut FieldErrors) {
    if schema.kind() == FormKind::Register
        && !schema.flags().email_verification
        && !errors.contains("pass")
        && state.value("pass") != state.value("pass2")
    {
        errors.record("pass", PASSWORDS_MISMATCH);
    }

    if !errors.contains("mail")
        && let (Some(mail), Some(conf_mail)) = (state.non_blank("mail"), state.non_blank("conf_mail"))
        && mail != conf_mail
    {
        errors.record("mail", MAILS_MISMATCH);
    }

    if schema.kind() == FormKind::Profile && !errors.contains("pass_pass1") {
        let first = state.non_blank("pass_pass1");
        let second = state.non_blank("pass_pass2");
        if (first.is_some() || second.is_some()) && first != second {
            errors.record("pass_pass1", NEW_PASSWORDS_MISMATCH);
        }
    }
}
