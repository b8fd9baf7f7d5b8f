use std::collections::BTreeMap;

use formwork_core::{AppError, AppResult};
use formwork_domain::FormKind;

pub const USAGE: &str = "usage:
  formwork-cli schema <login|register|profile|password_reset> [--as <name>]
  formwork-cli submit <login|register|profile|password_reset> '<json object>' [--as <name>]
  formwork-cli demo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Schema {
        kind: FormKind,
        acting_as: Option<String>,
    },
    Submit {
        kind: FormKind,
        values: BTreeMap<String, Option<String>>,
        acting_as: Option<String>,
    },
    Demo,
    Help,
}

impl CliCommand {
    pub fn parse(args: &[String]) -> AppResult<Self> {
        let (positional, acting_as) = split_acting_as(args)?;

        match positional.as_slice() {
            [] | ["help"] => Ok(Self::Help),
            ["demo"] => Ok(Self::Demo),
            ["schema", kind] => Ok(Self::Schema {
                kind: kind.parse()?,
                acting_as,
            }),
            ["submit", kind, values] => Ok(Self::Submit {
                kind: kind.parse()?,
                values: parse_values(values)?,
                acting_as,
            }),
            _ => Err(AppError::Validation(format!(
                "unrecognised arguments\n{USAGE}"
            ))),
        }
    }
}

fn split_acting_as(args: &[String]) -> AppResult<(Vec<&str>, Option<String>)> {
    let mut positional = Vec::new();
    let mut acting_as = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--as" {
            let name = iter
                .next()
                .ok_or_else(|| AppError::Validation("--as requires an account name".to_owned()))?;
            acting_as = Some(name.clone());
        } else {
            positional.push(arg.as_str());
        }
    }

    Ok((positional, acting_as))
}

/// Accepts a JSON object whose values are strings or null.
fn parse_values(raw: &str) -> AppResult<BTreeMap<String, Option<String>>> {
    serde_json::from_str(raw).map_err(|error| {
        AppError::Validation(format!(
            "form values must be a JSON object of strings: {error}"
        ))
    })
}
