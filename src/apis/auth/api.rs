use crate::{
    apis::{
        auth::{AccessToken, Scope},
        MoovClientInner,
    },
    Error,
};
use std::sync::Arc;

/// Moov authentication API client.
#[derive(Debug, Clone)]
pub struct AuthApi {
    inner: Arc<MoovClientInner>,
}

impl AuthApi {
    pub(crate) fn new(inner: Arc<MoovClientInner>) -> Self {
        Self { inner }
    }

    /// Returns an [`AccessToken`](crate::apis::auth::AccessToken) valid for `scope` on the given account.
    ///
    /// Unless token caching is enabled on the client, every call requests a new token
    /// from the authorization server.
    pub async fn get_token(&self, account_id: &str, scope: &Scope) -> Result<AccessToken, Error> {
        // Just delegate to the authenticator
        self.inner.authenticator.get_token(account_id, scope).await
    }
}
