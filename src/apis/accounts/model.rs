use crate::error::{require, ValidationError};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Individual,
    Business,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AccountMode {
    Production,
    Sandbox,
}

#[derive(Serialize, Deserialize, Debug, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_type: AccountType,
    pub profile: Profile,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<TermsOfService>,
    #[builder(default)]
    #[serde(rename = "foreignID", skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
}

impl CreateAccountRequest {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match (self.account_type, &self.profile) {
            (
                AccountType::Individual,
                Profile {
                    individual: Some(individual),
                    ..
                },
            ) => {
                require("profile.individual.name.firstName", &individual.name.first_name)?;
                require("profile.individual.name.lastName", &individual.name.last_name)
            }
            (
                AccountType::Business,
                Profile {
                    business: Some(business),
                    ..
                },
            ) => require(
                "profile.business.legalBusinessName",
                &business.legal_business_name,
            ),
            (AccountType::Individual, _) => {
                Err(ValidationError::MissingField("profile.individual"))
            }
            (AccountType::Business, _) => Err(ValidationError::MissingField("profile.business")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<IndividualProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessProfile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct IndividualProfile {
    pub name: Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<BirthDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct BusinessProfile {
    pub legal_business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doing_business_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_codes: Option<IndustryCodes>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum BusinessType {
    SoleProprietorship,
    UnincorporatedAssociation,
    Trust,
    PublicCorporation,
    PrivateCorporation,
    Llc,
    Partnership,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    #[serde(default)]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub number: String,
    pub country_code: String,
}

/// Postal address, shared by account profiles and card billing addresses.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub struct BirthDate {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct IndustryCodes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcc: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct TermsOfService {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "accountID")]
    pub account_id: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub mode: Option<AccountMode>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(rename = "foreignID", default)]
    pub foreign_id: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}
