use crate::common::test_context::TestContext;
use moov_rust::{
    apis::auth::{Credentials, Scope},
    Error, MoovClient,
};

#[tokio::test]
async fn get_access_token() {
    let ctx = TestContext::start().await;

    let access_token = ctx
        .client
        .auth
        .get_token(&ctx.account_id, &Scope::CapabilitiesRead)
        .await
        .unwrap();

    assert!(!access_token.expose_secret().is_empty());
    assert_eq!(access_token.account_id(), ctx.account_id);
    assert_eq!(
        access_token.scope(),
        format!("/accounts/{}/capabilities.read", ctx.account_id)
    );
}

#[tokio::test]
async fn invalid_credentials() {
    let ctx = TestContext::start().await;

    // Create a new client with a set of invalid credentials pointing to the same environment
    let credentials = TestContext::credentials();
    let client = MoovClient::builder(Credentials::new(
        "invalid",
        "invalid",
        credentials.account_id,
        credentials.domain,
    ))
    .with_environment(ctx.moov_environment())
    .build();

    // Make the request and assert that we got an error
    let err = client
        .capabilities
        .list(&ctx.account_id)
        .await
        .expect_err("Expected error");
    assert!(matches!(err, Error::AuthenticationError(ref e) if e == "invalid_client"));
}

#[cfg(not(feature = "acceptance-tests"))]
mod local {
    use super::*;
    use moov_rust::apis::{auth::TokenCaching, capabilities::CapabilityName};
    use test_case::test_case;

    #[test_case(TokenCaching::Disabled, 2 ; "disabled")]
    #[test_case(TokenCaching::Enabled, 1 ; "enabled")]
    #[tokio::test]
    async fn token_caching(token_caching: TokenCaching, expected_token_requests: usize) {
        let ctx = TestContext::start_with(token_caching).await;

        ctx.client.capabilities.list(&ctx.account_id).await.unwrap();
        ctx.client.capabilities.list(&ctx.account_id).await.unwrap();

        assert_eq!(ctx.token_requests().len(), expected_token_requests);
        assert_eq!(ctx.api_requests().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_calls_share_one_token_request() {
        let ctx = TestContext::start_with(TokenCaching::Enabled).await;

        let results = futures::future::join_all(
            (0..5).map(|_| ctx.client.capabilities.list(&ctx.account_id)),
        )
        .await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(ctx.token_requests().len(), 1);
        assert_eq!(ctx.api_requests().len(), 5);
    }

    #[tokio::test]
    async fn cached_tokens_are_scoped_per_operation() {
        let ctx = TestContext::start_with(TokenCaching::Enabled).await;

        ctx.client.capabilities.list(&ctx.account_id).await.unwrap();
        ctx.client
            .capabilities
            .request(&ctx.account_id, &[CapabilityName::Wallet])
            .await
            .unwrap();
        ctx.client.capabilities.list(&ctx.account_id).await.unwrap();

        assert_eq!(
            ctx.token_requests(),
            vec![
                "/accounts/acct-1/capabilities.read",
                "/accounts/acct-1/capabilities.write"
            ]
        );
    }

    #[tokio::test]
    async fn rejected_credentials_make_no_api_call() {
        let ctx = TestContext::start().await;
        let client = MoovClient::builder(Credentials::new(
            "pk",
            "wrong-secret",
            "acct-1",
            "https://sandbox.example",
        ))
        .with_environment(ctx.moov_environment())
        .build();

        client
            .transfers
            .get("transfer-1")
            .await
            .expect_err("Expected error");

        assert_eq!(ctx.token_requests(), vec!["/accounts/acct-1/transfers.read"]);
        assert!(ctx.api_requests().is_empty());
    }
}
