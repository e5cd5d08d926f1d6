use crate::common::test_context::TestContext;
use moov_rust::{
    apis::transfers::{
        Amount, CreateTransferRequest, CreateTransferRequestBuilder, TransferParty, TransferStatus,
    },
    error::ApiError,
    Error,
};
use uuid::Uuid;

fn transfer_request(value: i64) -> CreateTransferRequest {
    CreateTransferRequestBuilder::default()
        .source(TransferParty::payment_method("source-payment-method"))
        .destination(TransferParty::payment_method("destination-payment-method"))
        .amount(Amount::usd(value))
        .description(Some("Pay invoice #1234".into()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn same_idempotency_key_returns_same_transfer() {
    let ctx = TestContext::start().await;
    let idempotency_key = Uuid::new_v4().to_string();
    let req = transfer_request(1000);

    let first = ctx
        .client
        .transfers
        .create(&req, Some(&idempotency_key))
        .await
        .unwrap();
    let second = ctx
        .client
        .transfers
        .create(&req, Some(&idempotency_key))
        .await
        .unwrap();

    assert_eq!(first.transfer_id, second.transfer_id);
    assert_eq!(
        ctx.token_requests(),
        vec![
            "/accounts/acct-1/transfers.write",
            "/accounts/acct-1/transfers.write"
        ]
    );
}

#[tokio::test]
async fn generated_idempotency_keys_create_distinct_transfers() {
    let ctx = TestContext::start().await;
    let req = transfer_request(1000);

    let first = ctx.client.transfers.create(&req, None).await.unwrap();
    let second = ctx.client.transfers.create(&req, None).await.unwrap();

    assert_ne!(first.transfer_id, second.transfer_id);
}

#[tokio::test]
async fn reused_idempotency_key_with_different_request() {
    let ctx = TestContext::start().await;
    let idempotency_key = Uuid::new_v4().to_string();

    ctx.client
        .transfers
        .create(&transfer_request(1000), Some(&idempotency_key))
        .await
        .unwrap();
    let err = ctx
        .client
        .transfers
        .create(&transfer_request(2000), Some(&idempotency_key))
        .await
        .expect_err("Expected error");

    assert!(matches!(err, Error::ApiError(ApiError { status: 409, .. })));
}

#[tokio::test]
async fn created_transfer_can_be_retrieved() {
    let ctx = TestContext::start().await;

    let created = ctx
        .client
        .transfers
        .create(&transfer_request(1000), None)
        .await
        .unwrap();
    let transfer = ctx
        .client
        .transfers
        .get(&created.transfer_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(transfer.transfer_id, created.transfer_id);
    assert_eq!(transfer.status, TransferStatus::Created);
    assert_eq!(transfer.amount, Amount::usd(1000));
    assert_eq!(transfer.description.as_deref(), Some("Pay invoice #1234"));
}

#[tokio::test]
async fn get_unknown_transfer() {
    let ctx = TestContext::start().await;

    let transfer = ctx.client.transfers.get("non-existent").await.unwrap();

    assert!(transfer.is_none());
    assert_eq!(ctx.api_requests(), vec!["GET /transfers/non-existent"]);
}
