use crate::{
    apis::{
        auth::Scope,
        capabilities::{model::RequestCapabilitiesRequest, Capability, CapabilityName},
    },
    dispatcher::{RequestDispatcher, RequestSpec},
    error::{require, ValidationError},
    Error,
};
use urlencoding::encode;

/// Moov capabilities APIs client.
#[derive(Clone, Debug)]
pub struct CapabilitiesApi {
    dispatcher: RequestDispatcher,
}

impl CapabilitiesApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Requests one or more capabilities for an account.
    ///
    /// Returns all the capabilities of the account, including the requested ones.
    #[tracing::instrument(name = "Request Capabilities", skip(self))]
    pub async fn request(
        &self,
        account_id: &str,
        capabilities: &[CapabilityName],
    ) -> Result<Vec<Capability>, Error> {
        require("accountID", account_id)?;
        if capabilities.is_empty() {
            return Err(ValidationError::MissingField("capabilities").into());
        }

        self.dispatcher
            .execute_as(
                RequestSpec::post(collection_path(account_id), Scope::CapabilitiesWrite)
                    .on_account(account_id)
                    .json(&RequestCapabilitiesRequest { capabilities })?,
            )
            .await
    }

    /// Gets a capability of an account.
    ///
    /// If the capability was never requested for the account, `None` is returned.
    #[tracing::instrument(name = "Get Capability", skip(self))]
    pub async fn get(
        &self,
        account_id: &str,
        capability: CapabilityName,
    ) -> Result<Option<Capability>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_optional(
                RequestSpec::get(item_path(account_id, capability), Scope::CapabilitiesRead)
                    .on_account(account_id),
            )
            .await
    }

    /// Lists the capabilities of an account.
    #[tracing::instrument(name = "List Capabilities", skip(self))]
    pub async fn list(&self, account_id: &str) -> Result<Vec<Capability>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get(collection_path(account_id), Scope::CapabilitiesRead)
                    .on_account(account_id),
            )
            .await
    }

    /// Disables a capability of an account.
    #[tracing::instrument(name = "Disable Capability", skip(self))]
    pub async fn disable(&self, account_id: &str, capability: CapabilityName) -> Result<(), Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute(
                RequestSpec::delete(item_path(account_id, capability), Scope::CapabilitiesWrite)
                    .on_account(account_id),
            )
            .await?;

        Ok(())
    }
}

fn collection_path(account_id: &str) -> String {
    format!("accounts/{}/capabilities", encode(account_id))
}

fn item_path(account_id: &str, capability: CapabilityName) -> String {
    format!("{}/{}", collection_path(account_id), capability)
}
