use crate::{
    apis::accounts::{Address, IndustryCodes, Name, Phone},
    error::{require, ValidationError},
};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Parameters of an address autocompletion search. Unset fields are not sent.
#[derive(Debug, Clone, Default, Eq, PartialEq, Builder)]
#[builder(default)]
pub struct EnrichedAddressCriteria {
    /// Partial or complete address to search.
    pub search: String,
    pub max_results: Option<u32>,
    /// Only results in these cities.
    pub include_cities: Vec<String>,
    pub include_states: Vec<String>,
    pub include_zipcodes: Vec<String>,
    /// Cannot be combined with the include filters.
    pub exclude_states: Vec<String>,
    /// Results in these cities are listed first.
    pub prefer_cities: Vec<String>,
    pub prefer_states: Vec<String>,
    pub prefer_zipcodes: Vec<String>,
    /// Percentage of results which should come from the preferred locations.
    pub prefer_ratio: Option<u32>,
    pub prefer_geolocation: Option<PreferGeolocation>,
    /// Narrows results with secondary address suggestions, such as `Apt`.
    pub selected: Option<String>,
    pub source: Option<AddressSource>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PreferGeolocation {
    /// Prefer results near the city of the caller IP address.
    City,
    None,
    /// Prefer results near the given coordinates or address, as documented by Moov.
    Custom(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AddressSource {
    /// Include non-postal addresses.
    All,
    /// Postal addresses only.
    Postal,
}

impl EnrichedAddressCriteria {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        require("search", &self.search)?;

        let has_includes = !self.include_cities.is_empty()
            || !self.include_states.is_empty()
            || !self.include_zipcodes.is_empty();
        if has_includes && !self.exclude_states.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "excludeStates",
                reason: "cannot be combined with include filters",
            });
        }
        if self.prefer_ratio.map_or(false, |ratio| ratio > 100) {
            return Err(ValidationError::InvalidField {
                field: "preferRatio",
                reason: "must be a percentage",
            });
        }

        Ok(())
    }

    /// Query string parameters for these criteria.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("search", self.search.clone())];

        if let Some(max_results) = self.max_results {
            pairs.push(("maxResults", max_results.to_string()));
        }
        for (name, values) in [
            ("includeCities", &self.include_cities),
            ("includeStates", &self.include_states),
            ("includeZipcodes", &self.include_zipcodes),
            ("excludeStates", &self.exclude_states),
            ("preferCities", &self.prefer_cities),
            ("preferStates", &self.prefer_states),
            ("preferZipcodes", &self.prefer_zipcodes),
        ] {
            if !values.is_empty() {
                pairs.push((name, values.join(";")));
            }
        }
        if let Some(prefer_ratio) = self.prefer_ratio {
            pairs.push(("preferRatio", prefer_ratio.to_string()));
        }
        if let Some(geolocation) = &self.prefer_geolocation {
            let value = match geolocation {
                PreferGeolocation::City => "city".to_string(),
                PreferGeolocation::None => "none".to_string(),
                PreferGeolocation::Custom(value) => value.clone(),
            };
            pairs.push(("preferGeolocation", value));
        }
        if let Some(selected) = &self.selected {
            pairs.push(("selected", selected.clone()));
        }
        if let Some(source) = self.source {
            let value = match source {
                AddressSource::All => "all",
                AddressSource::Postal => "postal",
            };
            pairs.push(("source", value.to_string()));
        }

        pairs
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAddressSuggestions {
    #[serde(default, alias = "suggestions")]
    pub enriched_addresses: Vec<EnrichedAddress>,
    #[serde(default)]
    pub entries: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAddress {
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_or_province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Number of secondary addresses, like apartments, under this address.
    #[serde(default)]
    pub entries: Option<u32>,
}

/// Profile data Moov could find for an email address.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct EnrichedProfile {
    #[serde(default)]
    pub individual: Option<EnrichedIndividualProfile>,
    #[serde(default)]
    pub business: Option<EnrichedBusinessProfile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct EnrichedIndividualProfile {
    #[serde(default)]
    pub name: Option<Name>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBusinessProfile {
    #[serde(default)]
    pub legal_business_name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<Phone>,
    #[serde(default)]
    pub industry_codes: Option<IndustryCodes>,
    #[serde(default)]
    pub website: Option<String>,
}
