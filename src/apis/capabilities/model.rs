use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capabilities which can be requested for an account.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityName {
    /// Account contains minimum requirements to participate in a transfer.
    Transfers,
    /// Account can be source of a payout transfer.
    SendFunds,
    /// Account can be destination of an ACH debit transfer.
    CollectFunds,
    /// Account can top up balance or use as a source for another transfer.
    Wallet,
    /// Account has necessary information for 1099-NEC reporting.
    #[serde(rename = "1099")]
    Form1099,
}

impl CapabilityName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityName::Transfers => "transfers",
            CapabilityName::SendFunds => "send-funds",
            CapabilityName::CollectFunds => "collect-funds",
            CapabilityName::Wallet => "wallet",
            CapabilityName::Form1099 => "1099",
        }
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityStatus {
    Enabled,
    Disabled,
    Pending,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub capability: CapabilityName,
    #[serde(rename = "accountID")]
    pub account_id: String,
    pub status: CapabilityStatus,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub disabled_reason: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disabled_on: Option<DateTime<Utc>>,
}

/// Data still needed before the capability can be enabled.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// Requirement identifiers, such as `account.tos-acceptance` or `individual.ssn`.
    #[serde(default)]
    pub currently_due: Vec<String>,
    #[serde(default)]
    pub errors: Vec<RequirementError>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequirementError {
    pub requirement: String,
    pub error_code: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct RequestCapabilitiesRequest<'a> {
    pub capabilities: &'a [CapabilityName],
}
