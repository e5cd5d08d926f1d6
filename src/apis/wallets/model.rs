use crate::apis::transfers::Amount;
use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    pub available_balance: Amount,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum WalletTransactionStatus {
    Pending,
    Completed,
    Failed,
    Canceled,
}

impl WalletTransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletTransactionStatus::Pending => "pending",
            WalletTransactionStatus::Completed => "completed",
            WalletTransactionStatus::Failed => "failed",
            WalletTransactionStatus::Canceled => "canceled",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum WalletTransactionType {
    AchReversal,
    CardPayment,
    CashOut,
    Dispute,
    DisputeReversal,
    FacilitatorFee,
    MoovFee,
    Payment,
    Payout,
    Refund,
    RefundFailure,
    RtpFailure,
    TopUp,
    WalletTransfer,
}

impl WalletTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletTransactionType::AchReversal => "ach-reversal",
            WalletTransactionType::CardPayment => "card-payment",
            WalletTransactionType::CashOut => "cash-out",
            WalletTransactionType::Dispute => "dispute",
            WalletTransactionType::DisputeReversal => "dispute-reversal",
            WalletTransactionType::FacilitatorFee => "facilitator-fee",
            WalletTransactionType::MoovFee => "moov-fee",
            WalletTransactionType::Payment => "payment",
            WalletTransactionType::Payout => "payout",
            WalletTransactionType::Refund => "refund",
            WalletTransactionType::RefundFailure => "refund-failure",
            WalletTransactionType::RtpFailure => "rtp-failure",
            WalletTransactionType::TopUp => "top-up",
            WalletTransactionType::WalletTransfer => "wallet-transfer",
        }
    }
}

/// Movement of funds in or out of a wallet.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    pub transaction_type: WalletTransactionType,
    pub status: WalletTransactionStatus,
    /// Kind of resource which caused the transaction, such as `transfer`.
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default, rename = "sourceID")]
    pub source_id: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,
    pub currency: String,
    /// In the smallest unit of `currency`. Negative for debits.
    pub gross_amount: i64,
    #[serde(default)]
    pub fee: Option<i64>,
    #[serde(default)]
    pub net_amount: Option<i64>,
    /// Balance of the wallet once the transaction completed.
    #[serde(default)]
    pub available_balance: Option<i64>,
}

/// Filters for listing wallet transactions. Unset fields are not sent.
#[derive(Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default)]
pub struct WalletTransactionsCriteria {
    pub status: Option<WalletTransactionStatus>,
    pub transaction_type: Option<WalletTransactionType>,
    /// Only transactions caused by this resource, such as a transfer id.
    pub source_id: Option<String>,
    /// Inclusive.
    pub created_start_date_time: Option<DateTime<Utc>>,
    /// Exclusive.
    pub created_end_date_time: Option<DateTime<Utc>>,
    pub count: Option<u32>,
    pub skip: Option<u32>,
}

impl WalletTransactionsCriteria {
    /// Query string parameters for these criteria.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(transaction_type) = self.transaction_type {
            pairs.push(("transactionType", transaction_type.as_str().to_string()));
        }
        if let Some(source_id) = &self.source_id {
            pairs.push(("sourceID", source_id.clone()));
        }
        if let Some(start) = self.created_start_date_time {
            pairs.push((
                "createdStartDateTime",
                start.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }
        if let Some(end) = self.created_end_date_time {
            pairs.push((
                "createdEndDateTime",
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
