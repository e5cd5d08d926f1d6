use crate::common::mock_server::MoovMockServer;
use moov_rust::{
    apis::auth::{Credentials, TokenCaching},
    client::Environment,
    MoovClient,
};
use serde_json::Value;

pub const MOCK_PUBLIC_KEY: &str = "pk";
pub const MOCK_SECRET_KEY: &str = "sk";
pub const MOCK_ACCOUNT_ID: &str = "acct-1";
pub const MOCK_DOMAIN: &str = "https://sandbox.example";

pub struct TestContext {
    pub client: MoovClient,
    /// Facilitator account the credentials belong to.
    pub account_id: String,
    mock_server: MoovMockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        Self::start_with(TokenCaching::Disabled).await
    }

    pub async fn start_with(token_caching: TokenCaching) -> Self {
        let credentials = Self::credentials();

        // Setup a new mock server
        let mock_server = MoovMockServer::start(&credentials).await;

        // Configure a new MoovClient to point to the mock server
        let client = MoovClient::builder(credentials)
            .with_environment(Environment::from_single_url(mock_server.url()))
            .with_token_caching(token_caching)
            .build();

        Self {
            client,
            account_id: MOCK_ACCOUNT_ID.to_string(),
            mock_server,
        }
    }

    pub fn credentials() -> Credentials {
        Credentials::new(MOCK_PUBLIC_KEY, MOCK_SECRET_KEY, MOCK_ACCOUNT_ID, MOCK_DOMAIN)
    }

    pub fn moov_environment(&self) -> Environment {
        Environment::from_single_url(self.mock_server.url())
    }

    /// Scopes of all the token requests the mock server received.
    pub fn token_requests(&self) -> Vec<String> {
        self.mock_server.token_requests()
    }

    /// `METHOD /path` of all the API requests the mock server received.
    pub fn api_requests(&self) -> Vec<String> {
        self.mock_server.api_requests()
    }

    /// Raw capabilities stored by the mock server for `account_id`.
    pub fn stored_capabilities(&self, account_id: &str) -> Value {
        self.mock_server.capabilities(account_id)
    }
}
