use std::collections::HashSet;
use std::str::FromStr;

use formwork_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, FieldSchema, UiAction};

/// Supported account form kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Sign in with name and password.
    Login,
    /// Create a new account.
    Register,
    /// Edit an existing account.
    Profile,
    /// Request a new password by e-mail.
    PasswordReset,
}

impl FormKind {
    /// Every form kind, in menu order.
    pub const ALL: [FormKind; 4] = [
        Self::Login,
        Self::Register,
        Self::Profile,
        Self::PasswordReset,
    ];

    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Profile => "profile",
            Self::PasswordReset => "password_reset",
        }
    }

    /// Returns the stable form identifier used by the renderer.
    #[must_use]
    pub fn form_id(&self) -> &'static str {
        match self {
            Self::Login => "user_login_form",
            Self::Register => "user_register_form",
            Self::Profile => "user_profile_form",
            Self::PasswordReset => "user_pass_form",
        }
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "profile" => Ok(Self::Profile),
            "password_reset" | "pass" => Ok(Self::PasswordReset),
            _ => Err(AppError::Validation(format!("unknown form kind '{value}'"))),
        }
    }
}

/// Button rendered below the form body, distinct from submit fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSchema {
    name: NonEmptyString,
    label: NonEmptyString,
    action: UiAction,
}

impl ButtonSchema {
    /// Creates a validated button.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        action: UiAction,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            label: NonEmptyString::new(label)?,
            action,
        })
    }

    /// Returns button name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns button label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns click handler.
    #[must_use]
    pub fn action(&self) -> &UiAction {
        &self.action
    }
}

/// Builder-configured switches read by validation and submit dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFlags {
    /// Sign the new account in right after registration.
    pub auto_user_login: bool,
    /// Site required e-mail verification when the form was built.
    pub email_verification: bool,
}

/// Messages shown after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationMessages {
    /// Account is active right away.
    pub no_approval_required: String,
    /// Account waits for an administrator.
    pub pending_approval: String,
    /// Account must be verified through an e-mailed link.
    pub email_verification: String,
}

impl Default for RegistrationMessages {
    fn default() -> Self {
        Self {
            no_approval_required: "Registration complete!".to_owned(),
            pending_approval: "Registration complete, waiting for administrator approval."
                .to_owned(),
            email_verification:
                "Registration complete, check your e-mail inbox to verify the account."
                    .to_owned(),
        }
    }
}

/// Declarative form: ordered fields, buttons and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    id: NonEmptyString,
    kind: FormKind,
    entity_type: Option<String>,
    bundle: Option<String>,
    fields: Vec<FieldSchema>,
    buttons: Vec<ButtonSchema>,
    flags: FormFlags,
    registration_messages: Option<RegistrationMessages>,
}

impl FormSchema {
    /// Starts a schema for the given form kind using its stable identifier.
    #[must_use]
    pub fn builder(kind: FormKind) -> FormSchemaBuilder {
        FormSchemaBuilder {
            id: kind.form_id().to_owned(),
            kind,
            entity_type: None,
            bundle: None,
            fields: Vec::new(),
            buttons: Vec::new(),
            flags: FormFlags::default(),
            registration_messages: None,
        }
    }

    /// Returns form identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns form kind.
    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Returns the entity type the form edits.
    #[must_use]
    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    /// Returns the entity bundle the form edits.
    #[must_use]
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    /// Returns fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns whether a field with this name exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns field names in display order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::name)
    }

    /// Returns buttons in display order.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonSchema] {
        &self.buttons
    }

    /// Returns a button by name.
    #[must_use]
    pub fn button(&self, name: &str) -> Option<&ButtonSchema> {
        self.buttons.iter().find(|button| button.name() == name)
    }

    /// Returns form flags.
    #[must_use]
    pub fn flags(&self) -> FormFlags {
        self.flags
    }

    /// Returns the schema with its flags replaced, for form alter hooks.
    #[must_use]
    pub fn with_flags(mut self, flags: FormFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns registration messages, present on registration forms.
    #[must_use]
    pub fn registration_messages(&self) -> Option<&RegistrationMessages> {
        self.registration_messages.as_ref()
    }
}

/// Incremental constructor for [`FormSchema`] that checks invariants on build.
#[derive(Debug, Clone)]
pub struct FormSchemaBuilder {
    id: String,
    kind: FormKind,
    entity_type: Option<String>,
    bundle: Option<String>,
    fields: Vec<FieldSchema>,
    buttons: Vec<ButtonSchema>,
    flags: FormFlags,
    registration_messages: Option<RegistrationMessages>,
}

impl FormSchemaBuilder {
    /// Sets the edited entity type and bundle.
    #[must_use]
    pub fn entity(mut self, entity_type: impl Into<String>, bundle: Option<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.bundle = bundle;
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a button.
    #[must_use]
    pub fn button(mut self, button: ButtonSchema) -> Self {
        self.buttons.push(button);
        self
    }

    /// Replaces form flags.
    #[must_use]
    pub fn flags(mut self, flags: FormFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Attaches registration messages.
    #[must_use]
    pub fn registration_messages(mut self, messages: RegistrationMessages) -> Self {
        self.registration_messages = Some(messages);
        self
    }

    /// Validates invariants and returns the schema.
    pub fn build(self) -> AppResult<FormSchema> {
        let mut seen_fields = HashSet::new();
        for field in &self.fields {
            if !seen_fields.insert(field.name()) {
                return Err(AppError::Validation(format!(
                    "duplicate field '{}' in form '{}'",
                    field.name(),
                    self.id
                )));
            }
        }

        let mut seen_buttons = HashSet::new();
        for button in &self.buttons {
            if !seen_buttons.insert(button.name()) {
                return Err(AppError::Validation(format!(
                    "duplicate button '{}' in form '{}'",
                    button.name(),
                    self.id
                )));
            }
        }

        let submit_count = self
            .fields
            .iter()
            .filter(|field| field.kind() == FieldKind::Submit)
            .count();
        if submit_count > 1 {
            return Err(AppError::Validation(format!(
                "form '{}' must contain at most one submit field",
                self.id
            )));
        }
        if submit_count == 0 && self.buttons.is_empty() {
            return Err(AppError::Validation(format!(
                "form '{}' needs a submit field or buttons",
                self.id
            )));
        }

        Ok(FormSchema {
            id: NonEmptyString::new(self.id)?,
            kind: self.kind,
            entity_type: self.entity_type,
            bundle: self.bundle,
            fields: self.fields,
            buttons: self.buttons,
            flags: self.flags,
            registration_messages: self.registration_messages,
        })
    }
}
