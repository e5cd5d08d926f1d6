use crate::{
    apis::accounts::Address,
    error::{require, ValidationError},
};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct LinkCard {
    pub card_number: String,
    pub expiration: CardExpiration,
    pub card_cvv: String,
    pub holder_name: String,
    pub billing_address: Address,
    /// Cardholder authorized the card to be stored for future payments.
    #[builder(default)]
    pub card_on_file: bool,
}

impl LinkCard {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require("cardNumber", &self.card_number)?;
        self.expiration.validate()?;
        require("cardCvv", &self.card_cvv)?;
        require("holderName", &self.holder_name)
    }
}

/// Fields of a linked card which can be updated. Unset fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct CardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CardExpiration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_cvv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_on_file: Option<bool>,
}

impl CardUpdate {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self == &CardUpdate::default() {
            return Err(ValidationError::MissingField("card"));
        }
        match &self.expiration {
            Some(expiration) => expiration.validate(),
            None => Ok(()),
        }
    }
}

/// Two digit month and year.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct CardExpiration {
    pub month: String,
    pub year: String,
}

impl CardExpiration {
    fn validate(&self) -> Result<(), ValidationError> {
        let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());

        if !two_digits(&self.month) {
            return Err(ValidationError::InvalidField {
                field: "expiration.month",
                reason: "must be 2 digits",
            });
        }
        if !two_digits(&self.year) {
            return Err(ValidationError::InvalidField {
                field: "expiration.year",
                reason: "must be 2 digits",
            });
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub enum CardBrand {
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
    MasterCard,
    Visa,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Debit,
    Credit,
    Prepaid,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CardVerificationStatus {
    NoMatch,
    Match,
    NotChecked,
    Unavailable,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardVerification {
    pub cvv: CardVerificationStatus,
    pub address_line1: CardVerificationStatus,
    pub postal_code: CardVerificationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "cardID")]
    pub card_id: String,
    pub fingerprint: String,
    pub brand: CardBrand,
    pub card_type: CardType,
    pub last_four_card_number: String,
    #[serde(default)]
    pub bin: Option<String>,
    pub expiration: CardExpiration,
    pub holder_name: String,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub card_verification: Option<CardVerification>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub issuer_country: Option<String>,
    #[serde(default)]
    pub card_on_file: bool,
    /// Populated when the card was linked waiting for its payment methods.
    #[serde(default)]
    pub payment_methods: Vec<Value>,
}
