use std::collections::BTreeMap;

use formwork_core::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::form::FormSchema;

/// Submitted values and recorded errors for one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    values: BTreeMap<String, Option<String>>,
    #[serde(default)]
    errors: FieldErrors,
}

impl FormState {
    /// Creates an empty state for a freshly opened form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the state of a freshly opened form, prefilled from field defaults.
    #[must_use]
    pub fn from_defaults(schema: &FormSchema) -> Self {
        let mut state = Self::new();
        for field in schema.fields() {
            if let Some(value) = field.default_value() {
                state.set_value(field.name(), Some(value.to_owned()));
            }
        }
        state
    }

    /// Sets a value and returns the state, for building submissions.
    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_value(field, Some(value.into()));
        self
    }

    /// Sets or clears the raw value of a field.
    pub fn set_value(&mut self, field: impl Into<String>, value: Option<String>) {
        self.values.insert(field.into(), value);
    }

    /// Returns the raw value of a field; `None` when absent or null.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|value| value.as_deref())
    }

    /// Returns the value when it holds more than whitespace.
    #[must_use]
    pub fn non_blank(&self, field: &str) -> Option<&str> {
        self.value(field).filter(|value| !value.trim().is_empty())
    }

    /// Returns whether the field is absent, null or whitespace only.
    #[must_use]
    pub fn is_blank(&self, field: &str) -> bool {
        self.non_blank(field).is_none()
    }

    /// Iterates submitted `(field, value)` pairs in field-name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_deref()))
    }

    /// Returns recorded errors.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Records an error for a field unless one is already present.
    pub fn set_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> bool {
        self.errors.record(field, message)
    }

    /// Merges errors reported by validation or by the backend.
    pub fn merge_errors(&mut self, errors: &FieldErrors) {
        self.errors.merge(errors);
    }

    /// Clears errors before a new submit attempt.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Returns whether any error is recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
