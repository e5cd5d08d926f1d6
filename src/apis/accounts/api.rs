use crate::{
    apis::{
        accounts::{Account, CreateAccountRequest},
        auth::Scope,
    },
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};
use urlencoding::encode;

/// Moov accounts APIs client.
#[derive(Clone, Debug)]
pub struct AccountsApi {
    dispatcher: RequestDispatcher,
}

impl AccountsApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Creates a new account connected to the facilitator account.
    #[tracing::instrument(
        name = "Create Account",
        skip(self, create_account_request),
        fields(account_type = ?create_account_request.account_type)
    )]
    pub async fn create(
        &self,
        create_account_request: &CreateAccountRequest,
    ) -> Result<Account, Error> {
        create_account_request.validate()?;

        self.dispatcher
            .execute_as(
                RequestSpec::post("accounts", Scope::AccountsCreate)
                    .json(create_account_request)?,
            )
            .await
    }

    /// Gets the details of an existing account.
    ///
    /// If there's no account with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Account by ID", skip(self))]
    pub async fn get(&self, account_id: &str) -> Result<Option<Account>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_optional(
                RequestSpec::get(format!("accounts/{}", encode(account_id)), Scope::AccountsRead)
                    .on_account(account_id),
            )
            .await
    }
}
