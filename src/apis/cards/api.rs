use crate::{
    apis::{
        auth::Scope,
        cards::{Card, CardUpdate, LinkCard},
    },
    common::WAIT_FOR_HEADER,
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};
use reqwest::header::HeaderName;
use urlencoding::encode;

/// Moov cards APIs client.
#[derive(Clone, Debug)]
pub struct CardsApi {
    dispatcher: RequestDispatcher,
}

impl CardsApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Links a card to a Moov account.
    ///
    /// With `wait_for_payment_methods`, the response is delayed until the payment methods
    /// of the card have been created, and they are included in [`Card::payment_methods`].
    #[tracing::instrument(name = "Link Card", skip(self, link_card))]
    pub async fn link(
        &self,
        account_id: &str,
        link_card: &LinkCard,
        wait_for_payment_methods: bool,
    ) -> Result<Card, Error> {
        require("accountID", account_id)?;
        link_card.validate()?;

        let mut spec = RequestSpec::post(
            format!("accounts/{}/cards", encode(account_id)),
            Scope::CardsWrite,
        )
        .on_account(account_id)
        .json(link_card)?;
        if wait_for_payment_methods {
            spec = spec.header(HeaderName::from_static(WAIT_FOR_HEADER), "payment-method")?;
        }

        self.dispatcher.execute_as(spec).await
    }

    /// Gets the details of a card linked to a Moov account.
    ///
    /// If there's no card with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Card by ID", skip(self))]
    pub async fn get(&self, account_id: &str, card_id: &str) -> Result<Option<Card>, Error> {
        require("accountID", account_id)?;
        require("cardID", card_id)?;

        self.dispatcher
            .execute_optional(
                RequestSpec::get(item_path(account_id, card_id), Scope::CardsRead)
                    .on_account(account_id),
            )
            .await
    }

    /// Lists the cards linked to a Moov account.
    #[tracing::instrument(name = "List Cards", skip(self))]
    pub async fn list(&self, account_id: &str) -> Result<Vec<Card>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get(
                    format!("accounts/{}/cards", encode(account_id)),
                    Scope::CardsRead,
                )
                .on_account(account_id),
            )
            .await
    }

    /// Updates a linked card, for example after it has been reissued.
    #[tracing::instrument(name = "Update Card", skip(self, card_update))]
    pub async fn update(
        &self,
        account_id: &str,
        card_id: &str,
        card_update: &CardUpdate,
    ) -> Result<Card, Error> {
        require("accountID", account_id)?;
        require("cardID", card_id)?;
        card_update.validate()?;

        self.dispatcher
            .execute_as(
                RequestSpec::patch(item_path(account_id, card_id), Scope::CardsWrite)
                    .on_account(account_id)
                    .json(card_update)?,
            )
            .await
    }

    /// Disables a card linked to a Moov account.
    #[tracing::instrument(name = "Disable Card", skip(self))]
    pub async fn disable(&self, account_id: &str, card_id: &str) -> Result<(), Error> {
        require("accountID", account_id)?;
        require("cardID", card_id)?;

        self.dispatcher
            .execute(
                RequestSpec::delete(item_path(account_id, card_id), Scope::CardsWrite)
                    .on_account(account_id),
            )
            .await?;

        Ok(())
    }
}

fn item_path(account_id: &str, card_id: &str) -> String {
    format!("accounts/{}/cards/{}", encode(account_id), encode(card_id))
}
