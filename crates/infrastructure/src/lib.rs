//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod console_email_service;
mod console_ui;
mod in_memory_account_directory;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use console_email_service::{ConsoleEmailService, SentEmail};
pub use console_ui::{ConsoleNavigator, ConsoleNotifier, Notice};
pub use in_memory_account_directory::InMemoryAccountDirectory;
