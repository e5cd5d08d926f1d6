use anyhow::Context;
use moov_rust::{
    apis::{
        auth::Credentials,
        enrichment::{AddressSource, EnrichedAddressCriteriaBuilder, PreferGeolocation},
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
    let search = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "123 Main St".to_string());

    let moov = MoovClient::builder(credentials)
        .with_environment(Environment::Staging)
        .build();

    let criteria = EnrichedAddressCriteriaBuilder::default()
        .search(search)
        .include_zipcodes(vec!["60412".into(), "96818".into(), "97209".into()])
        .prefer_cities(vec!["denver".into(), "aurora".into(), "omaha".into()])
        .prefer_states(vec!["CO".into(), "MN".into(), "WI".into()])
        .prefer_geolocation(Some(PreferGeolocation::None))
        .selected(Some("Apt".into()))
        .source(Some(AddressSource::Postal))
        .build()?;

    let suggestions = moov.enrichment.get_address(&criteria).await?;
    for address in &suggestions.enriched_addresses {
        tracing::info!(
            "{} {}, {} {}",
            address.address_line1.as_deref().unwrap_or_default(),
            address.city.as_deref().unwrap_or_default(),
            address.state_or_province.as_deref().unwrap_or_default(),
            address.postal_code.as_deref().unwrap_or_default()
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
