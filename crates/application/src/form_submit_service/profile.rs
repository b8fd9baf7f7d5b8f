use formwork_domain::{FormSchema, FormState};

use crate::build_account_entity;

use super::*;

impl FormSubmitService {
    /// Saves the edited account through the generic entity form submission.
    ///
    /// The entity keeps the identity of `existing`. Success and failure
    /// handling belong to the entity submitter.
    pub async fn submit_profile(
        &self,
        schema: &FormSchema,
        state: &FormState,
        existing: &Account,
        token: &CancellationToken,
    ) -> AppResult<SubmitOutcome> {
        let entity = build_account_entity(schema, state, Some(existing));
        let submit = self
            .backend
            .entity_submitter
            .submit_entity_form(schema, state, &entity);

        match until_cancelled(token, submit).await {
            Ok(account) => Ok(SubmitOutcome::Delegated { account }),
            Err(AppError::Cancelled(_)) => Ok(SubmitOutcome::Cancelled),
            Err(error) => Err(error),
        }
    }
}
