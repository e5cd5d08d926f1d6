use anyhow::Context;
use moov_rust::{
    apis::{
        auth::{Credentials, TokenCaching},
        capabilities::CapabilityName,
    },
    client::Environment,
    MoovClient,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    /// Path of the credentials file downloaded from the Moov dashboard.
    #[serde(default = "default_credentials_path")]
    credentials_path: String,
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
    let credentials = Config::read()?.credentials()?;
    let account_id = credentials.account_id.clone();

    // Setup Moov client
    let moov = MoovClient::builder(credentials)
        .with_environment(Environment::Staging)
        .with_token_caching(TokenCaching::Enabled)
        .build();

    // Request the capabilities needed to move money
    moov.capabilities
        .request(
            &account_id,
            &[
                CapabilityName::Transfers,
                CapabilityName::SendFunds,
                CapabilityName::Wallet,
            ],
        )
        .await?;

    let send_funds = moov
        .capabilities
        .get(&account_id, CapabilityName::SendFunds)
        .await?
        .context("send-funds was not requested")?;
    tracing::info!("send-funds: {:?}", send_funds.status);

    for capability in moov.capabilities.list(&account_id).await? {
        tracing::info!(
            "Capability {}: {:?}, currently due: {:?}",
            capability.capability,
            capability.status,
            capability.requirements.currently_due
        );
    }

    // Disable a capability and read it back
    moov.capabilities
        .disable(&account_id, CapabilityName::SendFunds)
        .await?;
    let send_funds = moov
        .capabilities
        .get(&account_id, CapabilityName::SendFunds)
        .await?;
    tracing::info!("send-funds after disabling: {:#?}", send_funds);

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
