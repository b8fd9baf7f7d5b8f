use std::env;

use formwork_core::{AppError, AppResult};
use formwork_domain::{RegistrationMode, SiteConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESET_REQUESTS_PER_HOUR: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub site: SiteConfig,
    pub reset_requests_per_hour: usize,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let requires_email_verification = present("SITE_EMAIL_VERIFICATION")
            .map(|value| parse_bool("SITE_EMAIL_VERIFICATION", value.as_str()))
            .transpose()?
            .unwrap_or(false);

        let registration_mode = present("SITE_REGISTRATION_MODE")
            .map(|value| {
                value.parse::<RegistrationMode>().map_err(|error| {
                    AppError::Validation(format!("invalid SITE_REGISTRATION_MODE: {error}"))
                })
            })
            .transpose()?
            .unwrap_or_default();

        let front_page = present("SITE_FRONT_PAGE")
            .map(|value| value.trim().trim_matches('/').to_owned())
            .unwrap_or_else(|| SiteConfig::default().front_page);

        let reset_requests_per_hour = present("RESET_REQUESTS_PER_HOUR")
            .map(|value| {
                value.trim().parse::<usize>().map_err(|error| {
                    AppError::Validation(format!("invalid RESET_REQUESTS_PER_HOUR: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_RESET_REQUESTS_PER_HOUR);

        Ok(Self {
            site: SiteConfig {
                requires_email_verification,
                registration_mode,
                front_page,
            },
            reset_requests_per_hour,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn parse_bool(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}
