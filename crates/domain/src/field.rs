use std::collections::BTreeMap;
use std::str::FromStr;

use formwork_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Input kinds known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    #[serde(rename = "textfield")]
    Text,
    /// Masked password input.
    Password,
    /// E-mail address input.
    Email,
    /// Submit button rendered inside the form body.
    Submit,
}

impl FieldKind {
    /// Returns stable renderer value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "textfield",
            Self::Password => "password",
            Self::Email => "email",
            Self::Submit => "submit",
        }
    }

    /// Returns whether the kind is a control rather than a data input.
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Submit)
    }
}

impl FromStr for FieldKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "textfield" => Ok(Self::Text),
            "password" => Ok(Self::Password),
            "email" => Ok(Self::Email),
            "submit" => Ok(Self::Submit),
            _ => Err(AppError::Validation(format!("unknown field kind '{value}'"))),
        }
    }
}

/// UI events a field or button can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiEvent {
    /// Key pressed while the input has focus.
    KeyPress,
    /// Element clicked or tapped.
    Click,
}

/// Handler reference bound to a UI event. Opaque to validation and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub enum UiAction {
    /// Submit the named form when the enter key is pressed.
    SubmitOnEnter {
        /// Form to submit.
        form_id: String,
    },
    /// Navigate to an application path.
    Navigate {
        /// Destination path.
        path: String,
    },
    /// Return to the previous page.
    Back,
}

/// Declarative description of one form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    name: NonEmptyString,
    kind: FieldKind,
    label: String,
    required: bool,
    title_placeholder: bool,
    description: Option<String>,
    default_value: Option<String>,
    event_bindings: BTreeMap<UiEvent, UiAction>,
}

impl FieldSchema {
    /// Creates a validated field with no optional settings.
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        if name.as_str().trim() != name.as_str() {
            return Err(AppError::Validation(format!(
                "field name '{}' must not contain surrounding whitespace",
                name.as_str()
            )));
        }

        Ok(Self {
            name,
            kind,
            label: label.into(),
            required: false,
            title_placeholder: false,
            description: None,
            default_value: None,
            event_bindings: BTreeMap::new(),
        })
    }

    /// Creates the submit button field.
    pub fn submit(label: impl Into<String>) -> AppResult<Self> {
        Self::new("submit", FieldKind::Submit, label)
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Renders the label as the input placeholder.
    #[must_use]
    pub fn title_placeholder(mut self) -> Self {
        self.title_placeholder = true;
        self
    }

    /// Sets helper text shown below the input.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    /// Sets the value a freshly opened form starts with.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Binds a UI event to a handler, replacing any previous binding.
    #[must_use]
    pub fn on(mut self, event: UiEvent, action: UiAction) -> Self {
        self.event_bindings.insert(event, action);
        self
    }

    /// Returns field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns field kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns whether a blank value is a validation error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether the label doubles as placeholder.
    #[must_use]
    pub fn uses_title_placeholder(&self) -> bool {
        self.title_placeholder
    }

    /// Returns helper text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the prefill value.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns event bindings.
    #[must_use]
    pub fn event_bindings(&self) -> &BTreeMap<UiEvent, UiAction> {
        &self.event_bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_must_not_be_blank() {
        assert!(FieldSchema::new(" ", FieldKind::Text, "Name").is_err());
    }

    #[test]
    fn field_name_must_be_trimmed() {
        assert!(FieldSchema::new("name ", FieldKind::Text, "Name").is_err());
    }

    #[test]
    fn blank_description_is_dropped() -> AppResult<()> {
        let field = FieldSchema::new("name", FieldKind::Text, "Name")?.with_description("  ");
        assert_eq!(field.description(), None);
        Ok(())
    }

    #[test]
    fn kind_round_trips_through_renderer_value() -> AppResult<()> {
        for kind in [FieldKind::Text, FieldKind::Password, FieldKind::Email, FieldKind::Submit] {
            assert_eq!(kind.as_str().parse::<FieldKind>()?, kind);
        }
        assert!("checkbox".parse::<FieldKind>().is_err());
        Ok(())
    }

    #[test]
    fn kind_serializes_as_renderer_value() -> Result<(), serde_json::Error> {
        for kind in [FieldKind::Text, FieldKind::Password, FieldKind::Email, FieldKind::Submit] {
            let json = serde_json::to_string(&kind)?;
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(serde_json::from_str::<FieldKind>(&json)?, kind);
        }
        assert!(serde_json::from_str::<FieldKind>("\"text\"").is_err());
        Ok(())
    }

    #[test]
    fn binding_serializes_with_handler_tag() -> AppResult<()> {
        let field = FieldSchema::new("pass", FieldKind::Password, "Password")?.on(
            UiEvent::KeyPress,
            UiAction::SubmitOnEnter {
                form_id: "user_login_form".to_owned(),
            },
        );
        let json = serde_json::to_value(&field)
            .map_err(|error| formwork_core::AppError::Internal(error.to_string()))?;
        assert_eq!(
            json["event_bindings"]["key_press"]["handler"],
            serde_json::json!("submit_on_enter")
        );
        Ok(())
    }
}
