//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod field;
mod form;
mod form_state;
mod site;
mod user;

pub use field::{FieldKind, FieldSchema, UiAction, UiEvent};
pub use form::{
    ButtonSchema, FormFlags, FormKind, FormSchema, FormSchemaBuilder, RegistrationMessages,
};
pub use form_state::FormState;
pub use site::{SiteConfig, paths};
pub use user::{
    Account, AccountEntity, AccountStatus, Credentials, EmailAddress, RegistrationMode,
};
