use crate::{
    apis::{
        auth::Scope,
        wallets::{Wallet, WalletTransaction, WalletTransactionsCriteria},
    },
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};
use urlencoding::encode;

/// Moov wallets APIs client.
#[derive(Clone, Debug)]
pub struct WalletsApi {
    dispatcher: RequestDispatcher,
}

impl WalletsApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Gets a wallet of a Moov account, including its available balance.
    ///
    /// If there's no wallet with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Wallet by ID", skip(self))]
    pub async fn get(&self, account_id: &str, wallet_id: &str) -> Result<Option<Wallet>, Error> {
        require("accountID", account_id)?;
        require("walletID", wallet_id)?;

        self.dispatcher
            .execute_optional(
                RequestSpec::get(
                    format!(
                        "accounts/{}/wallets/{}",
                        encode(account_id),
                        encode(wallet_id)
                    ),
                    Scope::WalletsRead,
                )
                .on_account(account_id),
            )
            .await
    }

    /// Lists the wallets of a Moov account.
    #[tracing::instrument(name = "List Wallets", skip(self))]
    pub async fn list(&self, account_id: &str) -> Result<Vec<Wallet>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get(
                    format!("accounts/{}/wallets", encode(account_id)),
                    Scope::WalletsRead,
                )
                .on_account(account_id),
            )
            .await
    }

    /// Lists the transactions of a wallet matching the given criteria, most recent first.
    #[tracing::instrument(name = "List Wallet Transactions", skip(self))]
    pub async fn list_transactions(
        &self,
        account_id: &str,
        wallet_id: &str,
        criteria: &WalletTransactionsCriteria,
    ) -> Result<Vec<WalletTransaction>, Error> {
        require("accountID", account_id)?;
        require("walletID", wallet_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get(
                    format!(
                        "accounts/{}/wallets/{}/transactions",
                        encode(account_id),
                        encode(wallet_id)
                    ),
                    Scope::WalletsRead,
                )
                .on_account(account_id)
                .query(criteria.query_pairs()),
            )
            .await
    }
}
