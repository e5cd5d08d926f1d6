use crate::{
    apis::{
        auth::Scope,
        bank_accounts::{model::CompleteMicroDepositsRequest, BankAccount, LinkBankAccount},
    },
    dispatcher::{RequestDispatcher, RequestSpec},
    error::{require, ValidationError},
    Error,
};
use urlencoding::encode;

/// Moov bank accounts APIs client.
#[derive(Clone, Debug)]
pub struct BankAccountsApi {
    dispatcher: RequestDispatcher,
}

impl BankAccountsApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Links a bank account to a Moov account, either from its details
    /// or through a Plaid or MX integration.
    #[tracing::instrument(name = "Link Bank Account", skip(self, link_bank_account))]
    pub async fn link(
        &self,
        account_id: &str,
        link_bank_account: &LinkBankAccount,
    ) -> Result<BankAccount, Error> {
        require("accountID", account_id)?;
        link_bank_account.validate()?;

        self.dispatcher
            .execute_as(
                RequestSpec::post(collection_path(account_id), Scope::BankAccountsWrite)
                    .on_account(account_id)
                    .json(link_bank_account)?,
            )
            .await
    }

    /// Gets the details of a bank account linked to a Moov account.
    ///
    /// If there's no bank account with the given id, `None` is returned.
    #[tracing::instrument(name = "Get Bank Account by ID", skip(self))]
    pub async fn get(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<Option<BankAccount>, Error> {
        require("accountID", account_id)?;
        require("bankAccountID", bank_account_id)?;

        self.dispatcher
            .execute_optional(
                RequestSpec::get(item_path(account_id, bank_account_id), Scope::BankAccountsRead)
                    .on_account(account_id),
            )
            .await
    }

    /// Lists the bank accounts linked to a Moov account.
    #[tracing::instrument(name = "List Bank Accounts", skip(self))]
    pub async fn list(&self, account_id: &str) -> Result<Vec<BankAccount>, Error> {
        require("accountID", account_id)?;

        self.dispatcher
            .execute_as(
                RequestSpec::get(collection_path(account_id), Scope::BankAccountsRead)
                    .on_account(account_id),
            )
            .await
    }

    /// Disables a bank account linked to a Moov account.
    #[tracing::instrument(name = "Disable Bank Account", skip(self))]
    pub async fn disable(&self, account_id: &str, bank_account_id: &str) -> Result<(), Error> {
        require("accountID", account_id)?;
        require("bankAccountID", bank_account_id)?;

        self.dispatcher
            .execute(
                RequestSpec::delete(item_path(account_id, bank_account_id), Scope::BankAccountsWrite)
                    .on_account(account_id),
            )
            .await?;

        Ok(())
    }

    /// Sends two small deposits to the bank account to verify its ownership.
    #[tracing::instrument(name = "Initiate Micro-Deposits", skip(self))]
    pub async fn init_micro_deposits(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<(), Error> {
        require("accountID", account_id)?;
        require("bankAccountID", bank_account_id)?;

        self.dispatcher
            .execute(
                RequestSpec::post(
                    micro_deposits_path(account_id, bank_account_id),
                    Scope::BankAccountsWrite,
                )
                .on_account(account_id),
            )
            .await?;

        Ok(())
    }

    /// Completes the verification of a bank account with the amounts, in cents,
    /// of the micro-deposits it received.
    #[tracing::instrument(name = "Complete Micro-Deposits", skip(self))]
    pub async fn complete_micro_deposits(
        &self,
        account_id: &str,
        bank_account_id: &str,
        amounts: &[u64],
    ) -> Result<(), Error> {
        require("accountID", account_id)?;
        require("bankAccountID", bank_account_id)?;
        if amounts.is_empty() {
            return Err(ValidationError::MissingField("amounts").into());
        }

        self.dispatcher
            .execute(
                RequestSpec::put(
                    micro_deposits_path(account_id, bank_account_id),
                    Scope::BankAccountsWrite,
                )
                .on_account(account_id)
                .json(&CompleteMicroDepositsRequest { amounts })?,
            )
            .await?;

        Ok(())
    }
}

fn collection_path(account_id: &str) -> String {
    format!("accounts/{}/bank-accounts", encode(account_id))
}

fn item_path(account_id: &str, bank_account_id: &str) -> String {
    format!(
        "accounts/{}/bank-accounts/{}",
        encode(account_id),
        encode(bank_account_id)
    )
}

fn micro_deposits_path(account_id: &str, bank_account_id: &str) -> String {
    format!("{}/micro-deposits", item_path(account_id, bank_account_id))
}
