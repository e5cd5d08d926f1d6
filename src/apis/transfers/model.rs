use crate::{
    apis::{bank_accounts::BankAccount, cards::Card, wallets::Wallet},
    error::{require, ValidationError},
};
use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Quantity of money in the smallest unit of its currency.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Amount {
    /// 3-letter ISO 4217 currency code.
    pub currency: String,
    /// In USD this is cents, so $12.04 is 1204.
    pub value: i64,
}

impl Amount {
    /// Amount in US cents.
    pub fn usd(value: i64) -> Self {
        Self {
            currency: "USD".to_string(),
            value,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("amount.currency", &self.currency)?;
        if self.value < 0 {
            return Err(ValidationError::InvalidField {
                field: "amount.value",
                reason: "must not be negative",
            });
        }

        Ok(())
    }
}

/// Source or destination of a new transfer.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct TransferParty {
    #[serde(rename = "paymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    /// Only valid for sources: the new transfer is funded by an existing transfer.
    #[serde(rename = "transferID", skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<String>,
}

impl TransferParty {
    pub fn payment_method(payment_method_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: Some(payment_method_id.into()),
            transfer_id: None,
        }
    }

    pub fn transfer(transfer_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: None,
            transfer_id: Some(transfer_id.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FacilitatorFee {
    /// Total fee charged by the facilitator, in cents.
    Total(i64),
    /// Markup on top of the Moov fee, in cents.
    Markup(i64),
}

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    pub source: TransferParty,
    pub destination: TransferParty,
    pub amount: Amount,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilitator_fee: Option<FacilitatorFee>,
    /// At most 128 characters.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl CreateTransferRequest {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match (&self.source.payment_method_id, &self.source.transfer_id) {
            (Some(id), None) => require("source.paymentMethodID", id)?,
            (None, Some(id)) => require("source.transferID", id)?,
            (None, None) => return Err(ValidationError::MissingField("source")),
            (Some(_), Some(_)) => {
                return Err(ValidationError::InvalidField {
                    field: "source",
                    reason: "either a payment method or a transfer must be set, not both",
                })
            }
        }
        match &self.destination {
            TransferParty {
                payment_method_id: Some(id),
                transfer_id: None,
            } => require("destination.paymentMethodID", id)?,
            _ => return Err(ValidationError::MissingField("destination.paymentMethodID")),
        }
        self.amount.validate()?;
        if self
            .description
            .as_ref()
            .map_or(false, |d| d.chars().count() > 128)
        {
            return Err(ValidationError::InvalidField {
                field: "description",
                reason: "must be at most 128 characters",
            });
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferResponse {
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Created,
    Pending,
    Completed,
    Failed,
    Reversed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Created => "created",
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
            TransferStatus::Reversed => "reversed",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethodType {
    MoovWallet,
    AchDebitFund,
    AchDebitCollect,
    AchCreditStandard,
    AchCreditSameDay,
    RtpCredit,
    CardPayment,
    ApplePay,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodAccount {
    #[serde(rename = "accountID")]
    pub account_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Payment method on either side of an existing transfer.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransferPaymentMethod {
    #[serde(rename = "paymentMethodID")]
    pub payment_method_id: String,
    pub payment_method_type: PaymentMethodType,
    #[serde(default)]
    pub account: Option<PaymentMethodAccount>,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub wallet: Option<TransferWallet>,
    /// ACH rail status, trace number and return or correction codes.
    #[serde(default)]
    pub ach_details: Option<Value>,
    #[serde(default)]
    pub card_details: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct TransferWallet {
    #[serde(rename = "walletID")]
    pub wallet_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    pub status: TransferStatus,
    #[serde(default)]
    pub source: Option<TransferPaymentMethod>,
    #[serde(default)]
    pub destination: Option<TransferPaymentMethod>,
    pub amount: Amount,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub refunded_amount: Option<Amount>,
    #[serde(default)]
    pub refunds: Vec<Refund>,
    #[serde(default)]
    pub facilitator_fee: Option<Value>,
    /// Moov fee in US cents.
    #[serde(default)]
    pub moov_fee: Option<i64>,
}

/// Filters for listing transfers. Unset fields are not sent.
#[derive(Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default)]
pub struct ListTransfersCriteria {
    /// Only transfers whose source or destination belongs to one of these accounts.
    pub account_ids: Vec<String>,
    pub status: Option<TransferStatus>,
    /// Inclusive.
    pub start_date_time: Option<DateTime<Utc>>,
    /// Exclusive.
    pub end_date_time: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub count: Option<u32>,
    /// Number of results to skip, for pagination.
    pub skip: Option<u32>,
}

impl ListTransfersCriteria {
    /// Query string parameters for these criteria.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.account_ids.is_empty() {
            pairs.push(("accountIDs", self.account_ids.join(",")));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(start) = self.start_date_time {
            pairs.push((
                "startDateTime",
                start.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }
        if let Some(end) = self.end_date_time {
            pairs.push((
                "endDateTime",
                end.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }

        pairs
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct TransferOptionsTarget {
    #[serde(rename = "accountID", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(rename = "paymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
pub struct TransferOptionsCriteria {
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TransferOptionsTarget>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<TransferOptionsTarget>,
    pub amount: Amount,
}

impl TransferOptionsCriteria {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        let is_empty =
            |t: &TransferOptionsTarget| t.account_id.is_none() && t.payment_method_id.is_none();

        if self.source.as_ref().map_or(true, is_empty)
            && self.destination.as_ref().map_or(true, is_empty)
        {
            return Err(ValidationError::MissingField("source"));
        }

        self.amount.validate()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransferOption {
    #[serde(rename = "paymentMethodID")]
    pub payment_method_id: String,
    pub payment_method_type: PaymentMethodType,
    #[serde(default)]
    pub wallet: Option<Wallet>,
    #[serde(default)]
    pub bank_account: Option<BankAccount>,
    #[serde(default)]
    pub card: Option<Card>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTransferOptions {
    #[serde(default)]
    pub source_options: Vec<TransferOption>,
    #[serde(default)]
    pub destination_options: Vec<TransferOption>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct CreateRefundRequest {
    /// Amount to refund, in cents. The full amount of the transfer is refunded if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Created,
    Pending,
    Completed,
    Failed,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(rename = "refundID")]
    pub refund_id: String,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
    pub status: RefundStatus,
    pub amount: Amount,
}

#[derive(Serialize, Debug)]
pub(crate) struct UpdateMetadataRequest<'a> {
    pub metadata: &'a HashMap<String, String>,
}
