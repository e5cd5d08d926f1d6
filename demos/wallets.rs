use anyhow::Context;
use moov_rust::{
    apis::{
        auth::Credentials,
        wallets::{WalletTransactionStatus, WalletTransactionType, WalletTransactionsCriteriaBuilder},
    },
    client::Environment,
    MoovClient,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    /// Path of the credentials file downloaded from the Moov dashboard.
    #[serde(default = "default_credentials_path")]
    credentials_path: String,
    /// Account whose wallets are listed.
    connected_account_id: String,
}

fn default_credentials_path() -> String {
    "secrets/credentials.json".to_string()
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("MOOV"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }

    fn credentials(&self) -> anyhow::Result<Credentials> {
        let contents = std::fs::read_to_string(&self.credentials_path)
            .with_context(|| format!("Failed to read {}", self.credentials_path))?;

        serde_json::from_str(&contents).context("Invalid credentials file")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;
    let account_id = &config.connected_account_id;

    let moov = MoovClient::builder(config.credentials()?)
        .with_environment(Environment::Staging)
        .build();

    // Read back the first wallet of the connected account
    let wallets = moov.wallets.list(account_id).await?;
    let wallet_id = &wallets.first().context("Account has no wallet")?.wallet_id;
    let wallet = moov
        .wallets
        .get(account_id, wallet_id)
        .await?
        .context("Wallet disappeared")?;

    tracing::info!(
        "Wallet {} has a balance of {:.2} {}",
        wallet.wallet_id,
        wallet.available_balance.value as f64 / 100.0,
        wallet.available_balance.currency
    );

    // All transactions, then only the pending top-ups
    let transactions = moov
        .wallets
        .list_transactions(account_id, wallet_id, &Default::default())
        .await?;
    tracing::info!("{} transactions", transactions.len());

    let criteria = WalletTransactionsCriteriaBuilder::default()
        .status(Some(WalletTransactionStatus::Pending))
        .transaction_type(Some(WalletTransactionType::TopUp))
        .build()?;
    for transaction in moov
        .wallets
        .list_transactions(account_id, wallet_id, &criteria)
        .await?
    {
        tracing::info!(
            "Pending top-up {}: {} {}",
            transaction.transaction_id,
            transaction.gross_amount,
            transaction.currency
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
