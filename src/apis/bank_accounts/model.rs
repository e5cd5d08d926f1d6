use crate::error::{require, ValidationError};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Source of the bank account details when linking a bank account.
#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LinkBankAccount {
    /// Bank account details provided directly.
    Account(BankAccountDetails),
    /// Plaid processor token.
    Plaid { token: String },
    /// MX authorization code.
    Mx {
        #[serde(rename = "authorizationCode")]
        authorization_code: String,
    },
}

impl LinkBankAccount {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            LinkBankAccount::Account(details) => {
                require("accountNumber", &details.account_number)?;
                require("routingNumber", &details.routing_number)?;
                if details.routing_number.len() != 9
                    || !details.routing_number.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(ValidationError::InvalidField {
                        field: "routingNumber",
                        reason: "must be exactly 9 digits",
                    });
                }
                require("holderName", &details.holder_name)
            }
            LinkBankAccount::Plaid { token } => require("plaid.token", token),
            LinkBankAccount::Mx { authorization_code } => {
                require("mx.authorizationCode", authorization_code)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountDetails {
    pub holder_name: String,
    pub holder_type: HolderType,
    pub routing_number: String,
    pub account_number: String,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HolderType {
    Individual,
    Business,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BankAccountStatus {
    New,
    Verified,
    VerificationFailed,
    Pending,
    Errored,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(rename = "bankAccountID")]
    pub bank_account_id: String,
    pub fingerprint: String,
    pub status: BankAccountStatus,
    pub holder_name: String,
    pub holder_type: HolderType,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub bank_account_type: BankAccountType,
    pub routing_number: String,
    pub last_four_account_number: String,
}

/// Amounts, in cents, of the two micro-deposits received on the bank account.
#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
pub(crate) struct CompleteMicroDepositsRequest<'a> {
    pub amounts: &'a [u64],
}
