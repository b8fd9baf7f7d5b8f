//! Assembles account entities from submitted form state.

use formwork_domain::{Account, AccountEntity, FormSchema, FormState};

/// Fields that only confirm another field and never reach the backend.
const CONFIRMATION_FIELDS: [&str; 3] = ["conf_mail", "pass2", "pass_pass2"];

/// Builds an account entity from the values of the schema's data fields.
///
/// The edited account, when given, supplies the `uid` and the name and
/// e-mail defaults. Values for names the schema does not declare are ignored.
#[must_use]
pub fn build_account_entity(
    schema: &FormSchema,
    state: &FormState,
    existing: Option<&Account>,
) -> AccountEntity {
    let mut entity = AccountEntity {
        uid: existing.map(|account| account.uid),
        name: existing.map(|account| account.name.clone()),
        mail: existing.map(|account| account.mail.clone()),
        ..AccountEntity::default()
    };

    for field in schema.fields() {
        let name = field.name();
        if field.kind().is_control() || CONFIRMATION_FIELDS.contains(&name) {
            continue;
        }

        let value = state.non_blank(name).map(str::to_owned);
        match name {
            "name" => entity.name = value,
            "mail" => entity.mail = value.map(|mail| mail.trim().to_owned()),
            "pass" | "pass_pass1" => entity.pass = value,
            "current_pass" => entity.current_pass = value,
            _ => {
                if let Some(value) = value {
                    entity.extra.insert(name.to_owned(), value);
                }
            }
        }
    }

    entity
}
