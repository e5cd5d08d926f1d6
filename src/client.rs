//! Module containing the main Moov API client.

use crate::{
    apis::{
        accounts::AccountsApi,
        auth::{AuthApi, Credentials, TokenCaching},
        avatars::AvatarsApi,
        bank_accounts::BankAccountsApi,
        capabilities::CapabilitiesApi,
        cards::CardsApi,
        enrichment::EnrichmentApi,
        transfers::TransfersApi,
        wallets::WalletsApi,
        MoovClientInner,
    },
    authenticator::Authenticator,
    common::{DEFAULT_PRODUCTION_URL, DEFAULT_STAGING_URL},
    dispatcher::RequestDispatcher,
    middlewares::{error_handling::ErrorHandlingMiddleware, inject_headers::InjectHeadersMiddleware},
    Error,
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use std::{sync::Arc, time::Duration};

/// Client for Moov public APIs.
///
/// The client is cheap to clone: all clones share the same credentials, HTTP connection pool
/// and token cache. Credentials cannot be changed after the client has been built;
/// to use a different API key, build a new client.
#[derive(Debug, Clone)]
pub struct MoovClient {
    /// Authentication APIs client.
    pub auth: AuthApi,
    /// Avatars APIs client.
    pub avatars: AvatarsApi,
    /// Accounts APIs client.
    pub accounts: AccountsApi,
    /// Bank accounts APIs client.
    pub bank_accounts: BankAccountsApi,
    /// Capabilities APIs client.
    pub capabilities: CapabilitiesApi,
    /// Cards APIs client.
    pub cards: CardsApi,
    /// Address and profile enrichment APIs client.
    pub enrichment: EnrichmentApi,
    /// Transfers and refunds APIs client.
    pub transfers: TransfersApi,
    /// Wallets APIs client.
    pub wallets: WalletsApi,
    /// Low level access to any Moov endpoint.
    pub dispatcher: RequestDispatcher,
}

impl MoovClient {
    /// Builds a new [`MoovClient`](crate::client::MoovClient) with the default configuration.
    pub fn new(credentials: Credentials) -> MoovClient {
        MoovClientBuilder::new(credentials).build()
    }

    /// Returns a new builder to configure a new [`MoovClient`](crate::client::MoovClient).
    pub fn builder(credentials: Credentials) -> MoovClientBuilder {
        MoovClientBuilder::new(credentials)
    }
}

/// Builder for a [`MoovClient`](crate::client::MoovClient).
#[derive(Debug)]
pub struct MoovClientBuilder {
    client: reqwest::Client,
    environment: Environment,
    credentials: Credentials,
    token_caching: TokenCaching,
    timeout: Option<Duration>,
}

impl MoovClientBuilder {
    /// Creates a new builder to configure a [`MoovClient`](crate::client::MoovClient).
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            environment: Environment::Production,
            credentials,
            token_caching: TokenCaching::default(),
            timeout: None,
        }
    }

    /// Consumes the builder and builds a new [`MoovClient`](crate::client::MoovClient).
    pub fn build(self) -> MoovClient {
        let credentials = Arc::new(self.credentials);

        // Token requests must see the raw error body, so they skip the error handling middleware
        let authenticator = Authenticator::new(
            build_client_with_middleware(self.client.clone(), &credentials.domain, false),
            self.environment.clone(),
            credentials.clone(),
            self.token_caching,
            self.timeout,
        );

        let inner = Arc::new(MoovClientInner {
            client: build_client_with_middleware(self.client, &credentials.domain, true),
            authenticator,
            environment: self.environment,
            credentials,
            timeout: self.timeout,
        });
        let dispatcher = RequestDispatcher::new(inner.clone());

        MoovClient {
            auth: AuthApi::new(inner),
            accounts: AccountsApi::new(dispatcher.clone()),
            avatars: AvatarsApi::new(dispatcher.clone()),
            bank_accounts: BankAccountsApi::new(dispatcher.clone()),
            capabilities: CapabilitiesApi::new(dispatcher.clone()),
            cards: CardsApi::new(dispatcher.clone()),
            enrichment: EnrichmentApi::new(dispatcher.clone()),
            transfers: TransfersApi::new(dispatcher.clone()),
            wallets: WalletsApi::new(dispatcher.clone()),
            dispatcher,
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the environment to which this client should connect
    ///
    /// Defaults to: [`Environment::Production`]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Enables or disables caching of access tokens.
    ///
    /// Defaults to [`TokenCaching::Disabled`]: a new token is requested for every API call.
    pub fn with_token_caching(mut self, token_caching: TokenCaching) -> Self {
        self.token_caching = token_caching;
        self
    }

    /// Sets a timeout applied to every request, including token requests.
    ///
    /// A timeout set on a single [`RequestSpec`](crate::dispatcher::RequestSpec) takes precedence.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Moov environment to which a [`MoovClient`](crate::client::MoovClient) connects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Moov Production environment (`https://api.moov.io/`).
    Production,
    /// Moov Staging environment (`https://api.moov-staging.io/`).
    Staging,
    /// Custom environment, useful for tests and proxies.
    Custom { base_url: Url },
}

impl Environment {
    /// Builds a custom environment where all the requests are sent under `url`.
    ///
    /// ```rust
    /// # use moov_rust::client::Environment;
    /// # use reqwest::Url;
    /// let environment = Environment::from_single_url(&Url::parse("http://localhost:8080/moov").unwrap());
    /// assert_eq!(
    ///     environment.url("accounts").unwrap().as_str(),
    ///     "http://localhost:8080/moov/accounts"
    /// );
    /// ```
    pub fn from_single_url(url: &Url) -> Environment {
        let mut base_url = url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Environment::Custom { base_url }
    }

    /// Resolves an endpoint `path` against the base URL of this environment.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base_url = match self {
            Environment::Production => Url::parse(DEFAULT_PRODUCTION_URL),
            Environment::Staging => Url::parse(DEFAULT_STAGING_URL),
            Environment::Custom { base_url } => Ok(base_url.clone()),
        };

        base_url
            .and_then(|base_url| base_url.join(path.trim_start_matches('/')))
            .map_err(|e| Error::Other(e.into()))
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    domain: &str,
    error_handling: bool,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectHeadersMiddleware::new(domain));

    if error_handling {
        builder = builder.with(ErrorHandlingMiddleware);
    }

    builder.build()
}
