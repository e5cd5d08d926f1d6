use crate::common::test_context::TestContext;
use moov_rust::{
    apis::{
        accounts::{AccountType, CreateAccountRequestBuilder, Profile},
        transfers::{Amount, CreateTransferRequestBuilder, TransferParty},
    },
    Error,
};
use test_case::test_case;

fn assert_invalid_field<T: std::fmt::Debug>(result: Result<T, Error>, expected_field: &str) {
    match result {
        Err(Error::ValidationError(e)) => assert_eq!(e.field(), expected_field),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test_case(
    TransferParty::payment_method(""), TransferParty::payment_method("dest"), Amount::usd(100), None,
    "source.paymentMethodID" ; "empty source"
)]
#[test_case(
    TransferParty::payment_method("src"), TransferParty::transfer("transfer-1"), Amount::usd(100), None,
    "destination.paymentMethodID" ; "destination is not a payment method"
)]
#[test_case(
    TransferParty::payment_method("src"), TransferParty::payment_method("dest"), Amount::usd(-1), None,
    "amount.value" ; "negative amount"
)]
#[test_case(
    TransferParty::payment_method("src"), TransferParty::payment_method("dest"), Amount::usd(100), Some("x".repeat(129)),
    "description" ; "description too long"
)]
#[tokio::test]
async fn invalid_transfer(
    source: TransferParty,
    destination: TransferParty,
    amount: Amount,
    description: Option<String>,
    expected_field: &str,
) {
    let ctx = TestContext::start().await;
    let req = CreateTransferRequestBuilder::default()
        .source(source)
        .destination(destination)
        .amount(amount)
        .description(description)
        .build()
        .unwrap();

    let result = ctx.client.transfers.create(&req, None).await;

    assert_invalid_field(result, expected_field);
    assert!(ctx.token_requests().is_empty());
    assert!(ctx.api_requests().is_empty());
}

#[test_case(Some("") ; "empty key")]
#[test_case(Some("   ") ; "blank key")]
#[tokio::test]
async fn blank_idempotency_key(idempotency_key: Option<&str>) {
    let ctx = TestContext::start().await;
    let req = CreateTransferRequestBuilder::default()
        .source(TransferParty::payment_method("src"))
        .destination(TransferParty::payment_method("dest"))
        .amount(Amount::usd(100))
        .build()
        .unwrap();

    let result = ctx.client.transfers.create(&req, idempotency_key).await;

    assert_invalid_field(result, "idempotencyKey");
    assert!(ctx.token_requests().is_empty());
}

#[test_case("" ; "empty")]
#[test_case(" " ; "blank")]
#[tokio::test]
async fn missing_account_id(account_id: &str) {
    let ctx = TestContext::start().await;

    assert_invalid_field(ctx.client.capabilities.list(account_id).await, "accountID");
    assert_invalid_field(ctx.client.wallets.list(account_id).await, "accountID");
    assert_invalid_field(ctx.client.cards.list(account_id).await, "accountID");
    assert_invalid_field(ctx.client.bank_accounts.list(account_id).await, "accountID");
    assert!(ctx.token_requests().is_empty());
    assert!(ctx.api_requests().is_empty());
}

#[tokio::test]
async fn empty_capabilities_request() {
    let ctx = TestContext::start().await;

    let result = ctx.client.capabilities.request(&ctx.account_id, &[]).await;

    assert_invalid_field(result, "capabilities");
    assert!(ctx.token_requests().is_empty());
}

#[tokio::test]
async fn individual_account_without_profile() {
    let ctx = TestContext::start().await;
    let req = CreateAccountRequestBuilder::default()
        .account_type(AccountType::Individual)
        .profile(Profile::default())
        .build()
        .unwrap();

    let result = ctx.client.accounts.create(&req).await;

    assert_invalid_field(result, "profile.individual");
    assert!(ctx.token_requests().is_empty());
}
