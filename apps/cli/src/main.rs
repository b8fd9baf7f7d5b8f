//! Formwork command-line composition root.

#![forbid(unsafe_code)]

mod cli_command;
mod cli_config;
mod cli_runtime;
mod dev_seed;

use std::env;

use formwork_core::AppError;
use serde_json::Value;
use tracing::info;

use crate::cli_command::{CliCommand, USAGE};
use crate::cli_config::{CliConfig, init_tracing};
use crate::cli_runtime::CliRuntime;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = CliCommand::parse(&args)?;
    let config = CliConfig::load()?;

    info!(
        registration_mode = config.site.registration_mode.as_str(),
        email_verification = config.site.requires_email_verification,
        front_page = %config.site.front_page,
        "formwork-cli started"
    );

    let runtime = CliRuntime::start(config).await?;

    match command {
        CliCommand::Help => println!("{USAGE}"),
        CliCommand::Schema { kind, acting_as } => {
            print_json(&runtime.schema(kind, acting_as.as_deref()).await?)?;
        }
        CliCommand::Submit {
            kind,
            values,
            acting_as,
        } => {
            print_json(&runtime.submit(kind, values, acting_as.as_deref()).await?)?;
        }
        CliCommand::Demo => {
            for report in runtime.demo().await? {
                print_json(&report)?;
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))?;
    println!("{rendered}");
    Ok(())
}
