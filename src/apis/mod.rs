//! Clients for the various Moov APIs.

use crate::{apis::auth::Credentials, authenticator::Authenticator, client::Environment};
use reqwest_middleware::ClientWithMiddleware;
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
    time::Duration,
};

pub mod accounts;
pub mod auth;
pub mod avatars;
pub mod bank_accounts;
pub mod capabilities;
pub mod cards;
pub mod enrichment;
pub mod transfers;
pub mod wallets;

pub(crate) struct MoovClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) authenticator: Authenticator,
    pub(crate) environment: Environment,
    pub(crate) credentials: Arc<Credentials>,
    pub(crate) timeout: Option<Duration>,
}

impl Debug for MoovClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoovClientInner")
            .field("environment", &self.environment)
            .field("account_id", &self.credentials.account_id)
            .finish_non_exhaustive()
    }
}
