use crate::{
    apis::auth::{AccessToken, Credentials, Scope, Token, TokenCaching},
    client::Environment,
    error::{require, Error},
};
use chrono::{Duration, Utc};
use reqwest_middleware::ClientWithMiddleware;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    sync::Arc,
    time,
};
use tokio::sync::Mutex;

/// Cached tokens are refreshed this many seconds before they actually expire.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Manager for scoped access tokens.
#[derive(Clone)]
pub struct Authenticator {
    state: Arc<AuthenticatorState>,
}

impl Authenticator {
    /// Creates a new authenticator exchanging `credentials` with the authorization server of `environment`.
    pub fn new(
        client: ClientWithMiddleware,
        environment: Environment,
        credentials: Arc<Credentials>,
        caching: TokenCaching,
        timeout: Option<time::Duration>,
    ) -> Self {
        Self {
            state: Arc::new(AuthenticatorState {
                client,
                environment,
                credentials,
                caching,
                timeout,
                slots: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns an access token for `scope` on the given account.
    ///
    /// With caching disabled a new token is requested on every call.
    /// With caching enabled, a cached token for the same account and scope is returned
    /// if it is not close to expiration, and concurrent calls for the same account and scope
    /// are batched into one single request to the authorization server.
    pub async fn get_token(&self, account_id: &str, scope: &Scope) -> Result<AccessToken, Error> {
        require("accountID", account_id)?;
        let scope = scope.render(account_id);

        if self.state.caching == TokenCaching::Disabled {
            return fetch_token(&self.state, account_id, &scope).await;
        }

        let slot = self
            .slot(TokenKey {
                account_id: account_id.to_string(),
                scope: scope.clone(),
            })
            .await;

        // The slot stays locked during the fetch, other callers for the same key wait for its result
        let mut cached = slot.lock().await;
        if let Some(token) = cached.as_ref() {
            if !should_refresh_token(token) {
                tracing::debug!("Reusing existing access token");
                return Ok(token.clone());
            }
        }

        let token = fetch_token(&self.state, account_id, &scope).await?;
        *cached = Some(token.clone());

        Ok(token)
    }

    /// Drops `token` from the cache, if it is still the cached token for its account and scope.
    ///
    /// Called when the API rejects a request with `401 Unauthorized`.
    pub async fn invalidate(&self, token: &AccessToken) {
        if self.state.caching == TokenCaching::Disabled {
            return;
        }

        let key = TokenKey {
            account_id: token.account_id().to_string(),
            scope: token.scope().to_string(),
        };
        let slot = self.state.slots.lock().await.get(&key).cloned();

        if let Some(slot) = slot {
            let mut cached = slot.lock().await;
            let is_current = cached
                .as_ref()
                .map_or(false, |c| c.expose_secret() == token.expose_secret());

            if is_current {
                *cached = None;
                drop(cached);
                tracing::info!(scope = %key.scope, "Evicted rejected access token");

                // Drop the empty slot too, unless it was replaced in the meantime
                let mut slots = self.state.slots.lock().await;
                if slots.get(&key).map_or(false, |s| Arc::ptr_eq(s, &slot)) {
                    slots.remove(&key);
                }
            }
        }
    }

    async fn slot(&self, key: TokenKey) -> TokenSlot {
        self.state
            .slots
            .lock()
            .await
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}

impl Debug for Authenticator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("environment", &self.state.environment)
            .field("caching", &self.state.caching)
            .finish_non_exhaustive()
    }
}

type TokenSlot = Arc<Mutex<Option<AccessToken>>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TokenKey {
    account_id: String,
    scope: String,
}

/// Internal state of the authenticator.
struct AuthenticatorState {
    client: ClientWithMiddleware,
    environment: Environment,
    credentials: Arc<Credentials>,
    caching: TokenCaching,
    timeout: Option<time::Duration>,
    slots: Mutex<HashMap<TokenKey, TokenSlot>>,
}

#[tracing::instrument(name = "Get Access Token", level = "debug", skip(state))]
async fn fetch_token(
    state: &AuthenticatorState,
    account_id: &str,
    scope: &str,
) -> Result<AccessToken, Error> {
    let mut request = state
        .client
        .post(state.environment.url("oauth2/token")?)
        .json(&TokenRequest {
            grant_type: "client_credentials",
            client_id: &state.credentials.public_key,
            client_secret: state.credentials.secret_key.expose_secret(),
            scope,
        })
        .build()?;
    if let Some(timeout) = state.timeout {
        *request.timeout_mut() = Some(timeout);
    }

    let response = state.client.execute(request).await?;

    // An `error` field always wins. Otherwise a failed status is a transport failure.
    let status_error = response.error_for_status_ref().err();
    let bytes = response.bytes().await?;
    let res = match (
        serde_json::from_slice::<RawTokenResponse>(&bytes),
        status_error,
    ) {
        (Ok(RawTokenResponse::Failure { error }), _) => {
            tracing::warn!(error = %error, "Authorization server refused to issue a token");
            return Err(Error::AuthenticationError(error));
        }
        (_, Some(e)) => return Err(Error::TransportError(e)),
        (Ok(RawTokenResponse::Success(res)), None) => res,
        (Err(e), None) => return Err(Error::MalformedResponseError(e)),
    };

    if let Some(token_type) = &res.token_type {
        if !token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::Other(anyhow::anyhow!(
                "Unsupported access token type: {}. This is a bug in the SDK.",
                token_type,
            )));
        }
    }

    tracing::info!("Got new access token");

    Ok(AccessToken {
        token: Token::new(res.access_token),
        account_id: account_id.to_string(),
        scope: scope.to_string(),
        expires_at: res.expires_in.map(|secs| now() + Duration::seconds(secs)),
    })
}

/// Returns `true` if the token is close to expiration and should be refreshed.
/// If this token does not expire, this function always returns `false`.
fn should_refresh_token(token: &AccessToken) -> bool {
    token.expires_at.map_or(false, |expires_at| {
        now() >= expires_at - Duration::seconds(REFRESH_MARGIN_SECS)
    })
}

// Select an implementation of `now()` depending on whether we are testing or not
#[cfg(not(test))]
fn now() -> chrono::DateTime<Utc> {
    Utc::now()
}
#[cfg(test)]
use tests::mocked_time::now;

/// Body of a client credentials grant request.
#[derive(serde::Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawTokenResponse {
    Failure { error: String },
    Success(RawToken),
}

/// Successful response of a token request.
#[derive(serde::Deserialize)]
struct RawToken {
    access_token: String,
    expires_in: Option<i64>,
    token_type: Option<String>,
}
