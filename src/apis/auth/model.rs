use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// API key pair and facilitator identity used to authenticate against Moov.
///
/// Field names follow the layout of the credentials file generated by the Moov dashboard,
/// so a `Credentials` can be deserialized straight from it:
///
/// ```rust
/// # use moov_rust::apis::auth::Credentials;
/// let credentials: Credentials = serde_json::from_str(r#"{
///     "publicKey": "pk",
///     "secretKey": "sk",
///     "accountID": "acct-1",
///     "domain": "https://example.com"
/// }"#).unwrap();
///
/// assert_eq!(credentials.account_id, "acct-1");
/// assert!(!format!("{:?}", credentials).contains("\"sk\""));
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Public half of the API key, sent as `client_id`.
    pub public_key: String,
    /// Secret half of the API key, sent as `client_secret`.
    pub secret_key: Token,
    /// Identifier of the facilitator account the API key belongs to.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// Domain registered for the API key. Sent as `origin` and `referer`.
    pub domain: String,
}

impl Credentials {
    pub fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<Token>,
        account_id: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            account_id: account_id.into(),
            domain: domain.into(),
        }
    }
}

/// OAuth2 scopes recognized by the Moov authorization server.
///
/// Most scopes are bound to a single account and contain an `{accountID}` placeholder,
/// which is filled in by [`render`](Scope::render) when the token is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    AccountsCreate,
    AccountsRead,
    BankAccountsRead,
    BankAccountsWrite,
    CapabilitiesRead,
    CapabilitiesWrite,
    CardsRead,
    CardsWrite,
    FedRead,
    PaymentMethodsRead,
    Ping,
    ProfileEnrichmentRead,
    TransfersRead,
    TransfersWrite,
    WalletsRead,
    /// Any other scope string. It may contain the `{accountID}` placeholder.
    Custom(String),
}

impl Scope {
    /// Scope string as documented by Moov, before the account id is filled in.
    pub fn template(&self) -> &str {
        match self {
            Scope::AccountsCreate => "/accounts.write",
            Scope::AccountsRead => "/accounts/{accountID}/profile.read",
            Scope::BankAccountsRead => "/accounts/{accountID}/bank-accounts.read",
            Scope::BankAccountsWrite => "/accounts/{accountID}/bank-accounts.write",
            Scope::CapabilitiesRead => "/accounts/{accountID}/capabilities.read",
            Scope::CapabilitiesWrite => "/accounts/{accountID}/capabilities.write",
            Scope::CardsRead => "/accounts/{accountID}/cards.read",
            Scope::CardsWrite => "/accounts/{accountID}/cards.write",
            Scope::FedRead => "/fed.read",
            Scope::PaymentMethodsRead => "/accounts/{accountID}/payment-methods.read",
            Scope::Ping => "/ping.read",
            Scope::ProfileEnrichmentRead => "/profile-enrichment.read",
            Scope::TransfersRead => "/accounts/{accountID}/transfers.read",
            Scope::TransfersWrite => "/accounts/{accountID}/transfers.write",
            Scope::WalletsRead => "/accounts/{accountID}/wallets.read",
            Scope::Custom(scope) => scope,
        }
    }

    /// Returns the scope string to request for the given account.
    pub fn render(&self, account_id: &str) -> String {
        self.template().replace("{accountID}", account_id)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// Whether access tokens are reused across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCaching {
    /// A fresh token is requested for every API call.
    #[default]
    Disabled,
    /// Tokens are cached per account and scope until shortly before they expire,
    /// or until the API rejects them with `401 Unauthorized`.
    Enabled,
}

/// Bearer token issued for exactly one account and scope.
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub(crate) token: Token,
    pub(crate) account_id: String,
    pub(crate) scope: String,
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Actual token contents held by this `AccessToken` instance.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Account the token was requested for.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Rendered scope the token is valid for.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Expiration date of the token.
    ///
    /// Returns `None` if the authorization server did not report one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl Deref for AccessToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        self.token()
    }
}

/// Wrapper for a secret string that makes it harder to accidentally expose secrets
/// and ensures the backing memory is wiped on drop.
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret).
///
/// ```rust
/// # use moov_rust::apis::auth::Token;
/// let token = Token::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", token).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`...
/// assert_eq!(token.expose_secret(), "supersecret");
///
/// // ... Or if serialized with Serde
/// let serialized = serde_json::to_string(&token).unwrap();
/// assert!(serialized.contains("supersecret"));
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Token(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl Token {
    /// Wraps a secret string in a new `Token`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for Token
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Token::new(s)
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}
