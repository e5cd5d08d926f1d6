use crate::common::test_context::TestContext;

#[tokio::test]
async fn list_capabilities() {
    let ctx = TestContext::start().await;

    let capabilities = ctx.client.capabilities.list(&ctx.account_id).await.unwrap();

    assert!(capabilities
        .iter()
        .all(|capability| capability.account_id == ctx.account_id));
}

#[cfg(not(feature = "acceptance-tests"))]
mod local {
    use super::*;
    use moov_rust::{
        apis::{
            auth::Scope,
            capabilities::{CapabilityName, CapabilityStatus},
        },
        dispatcher::RequestSpec,
    };

    #[tokio::test]
    async fn capabilities_are_returned_unmodified() {
        let ctx = TestContext::start().await;

        let capabilities = ctx
            .client
            .dispatcher
            .execute(
                RequestSpec::get("accounts/acct-1/capabilities", Scope::CapabilitiesRead)
                    .on_account("acct-1"),
            )
            .await
            .unwrap();

        assert_eq!(capabilities, ctx.stored_capabilities("acct-1"));
        assert_eq!(
            ctx.token_requests(),
            vec!["/accounts/acct-1/capabilities.read"]
        );
        assert_eq!(ctx.api_requests(), vec!["GET /accounts/acct-1/capabilities"]);
    }

    #[tokio::test]
    async fn typed_list_matches_stored_capabilities() {
        let ctx = TestContext::start().await;

        let capabilities = ctx.client.capabilities.list("acct-1").await.unwrap();

        assert_eq!(capabilities.len(), 1);
        assert_eq!(capabilities[0].capability, CapabilityName::Transfers);
        assert_eq!(capabilities[0].status, CapabilityStatus::Enabled);
        assert!(capabilities[0].requirements.currently_due.is_empty());
        assert_eq!(ctx.token_requests().len(), 1);
        assert_eq!(ctx.api_requests().len(), 1);
    }

    #[tokio::test]
    async fn request_get_and_disable_capability() {
        let ctx = TestContext::start().await;

        // Request a new capability
        let capabilities = ctx
            .client
            .capabilities
            .request(&ctx.account_id, &[CapabilityName::Wallet])
            .await
            .unwrap();
        let wallet = capabilities
            .iter()
            .find(|c| c.capability == CapabilityName::Wallet)
            .unwrap();
        assert_eq!(wallet.status, CapabilityStatus::Pending);
        assert_eq!(
            wallet.requirements.currently_due,
            vec!["account.tos-acceptance"]
        );

        // Disable it and read it back
        ctx.client
            .capabilities
            .disable(&ctx.account_id, CapabilityName::Wallet)
            .await
            .unwrap();
        let wallet = ctx
            .client
            .capabilities
            .get(&ctx.account_id, CapabilityName::Wallet)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(wallet.status, CapabilityStatus::Disabled);
        assert!(wallet.disabled_on.is_some());

        assert_eq!(
            ctx.api_requests(),
            vec![
                "POST /accounts/acct-1/capabilities",
                "DELETE /accounts/acct-1/capabilities/wallet",
                "GET /accounts/acct-1/capabilities/wallet",
            ]
        );
    }

    #[tokio::test]
    async fn get_capability_never_requested() {
        let ctx = TestContext::start().await;

        let capability = ctx
            .client
            .capabilities
            .get(&ctx.account_id, CapabilityName::Form1099)
            .await
            .unwrap();

        assert!(capability.is_none());
        assert_eq!(
            ctx.api_requests(),
            vec!["GET /accounts/acct-1/capabilities/1099"]
        );
    }
}
