use crate::{
    apis::{
        auth::Scope,
        enrichment::{EnrichedAddressCriteria, EnrichedAddressSuggestions, EnrichedProfile},
    },
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};

/// Moov enrichment APIs client.
///
/// Requests are made on behalf of the facilitator account.
#[derive(Clone, Debug)]
pub struct EnrichmentApi {
    dispatcher: RequestDispatcher,
}

impl EnrichmentApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Suggests complete addresses matching a partial one.
    #[tracing::instrument(name = "Get Enriched Address", skip(self))]
    pub async fn get_address(
        &self,
        criteria: &EnrichedAddressCriteria,
    ) -> Result<EnrichedAddressSuggestions, Error> {
        criteria.validate()?;

        self.dispatcher
            .execute_as(
                RequestSpec::get("enrichment/address", Scope::ProfileEnrichmentRead)
                    .query(criteria.query_pairs()),
            )
            .await
    }

    /// Looks up individual or business profile data associated with an email address.
    #[tracing::instrument(name = "Get Enriched Profile", skip(self))]
    pub async fn get_profile(&self, email: &str) -> Result<EnrichedProfile, Error> {
        require("email", email)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get("enrichment/profile", Scope::ProfileEnrichmentRead)
                    .query([("email", email)]),
            )
            .await
    }
}
