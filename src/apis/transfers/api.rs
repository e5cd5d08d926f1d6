use crate::{
    apis::{
        auth::Scope,
        transfers::{
            model::UpdateMetadataRequest, AvailableTransferOptions, CreateRefundRequest,
            CreateTransferRequest, CreateTransferResponse, ListTransfersCriteria, Refund, Transfer,
            TransferOptionsCriteria,
        },
    },
    common::IDEMPOTENCY_KEY_HEADER,
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};
use reqwest::header::HeaderName;
use std::collections::HashMap;
use urlencoding::encode;
use uuid::Uuid;

/// Moov transfers APIs client.
#[derive(Clone, Debug)]
pub struct TransfersApi {
    dispatcher: RequestDispatcher,
}

impl TransfersApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Creates a transfer to move money from a source to a destination.
    ///
    /// Reuse the same `idempotency_key` only when retrying an identical request.
    /// If `None`, a new random key is generated.
    #[tracing::instrument(
        name = "Create Transfer",
        skip(self, create_transfer_request),
        fields(
            amount = create_transfer_request.amount.value,
            currency = %create_transfer_request.amount.currency,
        )
    )]
    pub async fn create(
        &self,
        create_transfer_request: &CreateTransferRequest,
        idempotency_key: Option<&str>,
    ) -> Result<CreateTransferResponse, Error> {
        create_transfer_request.validate()?;
        let idempotency_key = idempotency_key_or_new(idempotency_key)?;

        self.dispatcher
            .execute_as(
                RequestSpec::post("transfers", Scope::TransfersWrite)
                    .header(
                        HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
                        &idempotency_key,
                    )?
                    .json(create_transfer_request)?,
            )
            .await
    }

    /// Lists the transfers matching the given criteria.
    #[tracing::instrument(name = "List Transfers", skip(self))]
    pub async fn list(&self, criteria: &ListTransfersCriteria) -> Result<Vec<Transfer>, Error> {
        self.dispatcher
            .execute_as(
                RequestSpec::get("transfers", Scope::TransfersRead).query(criteria.query_pairs()),
            )
            .await
    }

    /// Gets the details of an existing transfer.
    ///
    /// If there's no transfer with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Transfer by ID", skip(self))]
    pub async fn get(&self, transfer_id: &str) -> Result<Option<Transfer>, Error> {
        require("transferID", transfer_id)?;

        self.dispatcher
            .execute_optional(RequestSpec::get(
                transfer_path(transfer_id),
                Scope::TransfersRead,
            ))
            .await
    }

    /// Replaces the metadata of a transfer.
    #[tracing::instrument(name = "Update Transfer Metadata", skip(self, metadata))]
    pub async fn update_metadata(
        &self,
        transfer_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<Transfer, Error> {
        require("transferID", transfer_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::patch(transfer_path(transfer_id), Scope::TransfersWrite)
                    .json(&UpdateMetadataRequest { metadata })?,
            )
            .await
    }

    /// Gets the payment methods which can be used as source and destination of a transfer.
    #[tracing::instrument(name = "Get Transfer Options", skip(self))]
    pub async fn get_transfer_options(
        &self,
        criteria: &TransferOptionsCriteria,
    ) -> Result<AvailableTransferOptions, Error> {
        criteria.validate()?;

        self.dispatcher
            .execute_as(RequestSpec::post("transfer-options", Scope::TransfersRead).json(criteria)?)
            .await
    }

    /// Refunds a card transfer, fully or partially.
    ///
    /// The idempotency key follows the same rules as in [`create`](Self::create).
    #[tracing::instrument(name = "Refund Transfer", skip(self))]
    pub async fn refund(
        &self,
        transfer_id: &str,
        idempotency_key: Option<&str>,
        create_refund_request: &CreateRefundRequest,
    ) -> Result<Refund, Error> {
        require("transferID", transfer_id)?;
        let idempotency_key = idempotency_key_or_new(idempotency_key)?;

        self.dispatcher
            .execute_as(
                RequestSpec::post(refunds_path(transfer_id), Scope::TransfersWrite)
                    .header(
                        HeaderName::from_static(IDEMPOTENCY_KEY_HEADER),
                        &idempotency_key,
                    )?
                    .json(create_refund_request)?,
            )
            .await
    }

    /// Lists the refunds of a card transfer.
    #[tracing::instrument(name = "List Refunds", skip(self))]
    pub async fn list_refunds(&self, transfer_id: &str) -> Result<Vec<Refund>, Error> {
        require("transferID", transfer_id)?;

        self.dispatcher
            .execute_as(RequestSpec::get(
                refunds_path(transfer_id),
                Scope::TransfersRead,
            ))
            .await
    }

    /// Gets the details of a refund.
    ///
    /// If there's no refund with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Refund by ID", skip(self))]
    pub async fn get_refund(
        &self,
        transfer_id: &str,
        refund_id: &str,
    ) -> Result<Option<Refund>, Error> {
        require("transferID", transfer_id)?;
        require("refundID", refund_id)?;

        self.dispatcher
            .execute_optional(RequestSpec::get(
                format!("{}/{}", refunds_path(transfer_id), encode(refund_id)),
                Scope::TransfersRead,
            ))
            .await
    }
}

fn idempotency_key_or_new(idempotency_key: Option<&str>) -> Result<String, Error> {
    match idempotency_key {
        Some(key) => {
            require("idempotencyKey", key)?;
            Ok(key.to_string())
        }
        None => Ok(Uuid::new_v4().to_string()),
    }
}

fn transfer_path(transfer_id: &str) -> String {
    format!("transfers/{}", encode(transfer_id))
}

fn refunds_path(transfer_id: &str) -> String {
    format!("{}/refunds", transfer_path(transfer_id))
}
