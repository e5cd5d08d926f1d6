use anyhow::Context;
use moov_rust::{apis::auth::Credentials, client::Environment, MoovClient};

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
    // Any account id or routing number
    let unique_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "031100649".to_string());

    let moov = MoovClient::builder(credentials)
        .with_environment(Environment::Staging)
        .build();

    match moov.avatars.get(&unique_id).await? {
        Some(image) => {
            let file_name = format!("{}.img", unique_id);
            std::fs::write(&file_name, &image)?;
            tracing::info!("Saved {} bytes to {}", image.len(), file_name);
        }
        None => tracing::info!("No avatar for {}", unique_id),
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
