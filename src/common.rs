// Default URLs
pub static DEFAULT_PRODUCTION_URL: &str = "https://api.moov.io/";
pub static DEFAULT_STAGING_URL: &str = "https://api.moov-staging.io/";

// Header names
pub static IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";
pub static ACCOUNT_ID_HEADER: &str = "x-account-id";
pub static WAIT_FOR_HEADER: &str = "x-wait-for";
