//! Execution of authenticated requests against Moov endpoints.
//!
//! Every resource client describes its calls as a [`RequestSpec`] and hands them over to the
//! [`RequestDispatcher`], which obtains a token for the right account and scope, attaches it
//! and translates the response.
//!
//! The dispatcher can also be used directly to reach endpoints without a dedicated client:
//!
//! ```rust,no_run
//! # use moov_rust::{MoovClient, Error, apis::auth::Scope, dispatcher::RequestSpec};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let moov: MoovClient = unreachable!();
//! let methods = moov
//!     .dispatcher
//!     .execute(
//!         RequestSpec::get("accounts/some-account-id/payment-methods", Scope::PaymentMethodsRead)
//!             .on_account("some-account-id"),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    apis::{auth::Scope, MoovClientInner},
    common::ACCOUNT_ID_HEADER,
    error::{Error, ValidationError},
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
    Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

/// Description of a single call to a Moov endpoint.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: String,
    scope: Scope,
    account_id: Option<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl RequestSpec {
    /// Creates a request for `path`, relative to the environment base URL,
    /// which needs a token for `scope`.
    pub fn new(method: Method, path: impl Into<String>, scope: Scope) -> Self {
        Self {
            method,
            path: path.into(),
            scope,
            account_id: None,
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>, scope: Scope) -> Self {
        Self::new(Method::GET, path, scope)
    }

    pub fn post(path: impl Into<String>, scope: Scope) -> Self {
        Self::new(Method::POST, path, scope)
    }

    pub fn put(path: impl Into<String>, scope: Scope) -> Self {
        Self::new(Method::PUT, path, scope)
    }

    pub fn patch(path: impl Into<String>, scope: Scope) -> Self {
        Self::new(Method::PATCH, path, scope)
    }

    pub fn delete(path: impl Into<String>, scope: Scope) -> Self {
        Self::new(Method::DELETE, path, scope)
    }

    /// Acts on behalf of `account_id`.
    ///
    /// The token is requested for this account instead of the facilitator account,
    /// and the facilitator account id is sent in the `x-account-id` header.
    pub fn on_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Appends query string parameters.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the JSON body of the request.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body).map_err(|e| Error::Other(e.into()))?);
        Ok(self)
    }

    /// Adds an extra header to the request.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self, ValidationError> {
        let value = HeaderValue::from_str(value).map_err(|_| ValidationError::InvalidField {
            field: "header",
            reason: "not a valid HTTP header value",
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Overrides the client timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

/// Attaches authentication material to [`RequestSpec`]s and executes them.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    inner: Arc<MoovClientInner>,
}

impl RequestDispatcher {
    pub(crate) fn new(inner: Arc<MoovClientInner>) -> Self {
        Self { inner }
    }

    /// Executes the request and returns the parsed JSON body of the response.
    ///
    /// An empty successful response yields [`Value::Null`].
    #[tracing::instrument(
        name = "Execute Request",
        skip(self, spec),
        fields(method = %spec.method, path = %spec.path)
    )]
    pub async fn execute(&self, spec: RequestSpec) -> Result<Value, Error> {
        let bytes = self.send(spec).await?.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(Error::MalformedResponseError)
    }

    /// Executes the request and returns the raw body of the response, such as an image.
    #[tracing::instrument(
        name = "Execute Request",
        skip(self, spec),
        fields(method = %spec.method, path = %spec.path)
    )]
    pub async fn execute_bytes(&self, spec: RequestSpec) -> Result<Vec<u8>, Error> {
        let bytes = self.send(spec).await?.bytes().await?;

        Ok(bytes.to_vec())
    }

    async fn send(&self, spec: RequestSpec) -> Result<Response, Error> {
        let credentials = &self.inner.credentials;
        let account_id = spec.account_id.as_deref().unwrap_or(&credentials.account_id);

        let token = self
            .inner
            .authenticator
            .get_token(account_id, &spec.scope)
            .await?;

        let scope = spec.scope.render(account_id);
        if token.scope() != scope {
            return Err(Error::Other(anyhow::anyhow!(
                "Access token issued for scope {} cannot be used for scope {}",
                token.scope(),
                scope
            )));
        }

        let mut builder = self
            .inner
            .client
            .request(spec.method, self.inner.environment.url(&spec.path)?);
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }
        let mut request = builder.build()?;

        let headers = request.headers_mut();
        headers.extend(spec.headers);
        if spec.account_id.is_some() {
            let facilitator = HeaderValue::from_str(&credentials.account_id).map_err(|_| {
                ValidationError::InvalidField {
                    field: "accountID",
                    reason: "not a valid HTTP header value",
                }
            })?;
            headers.insert(ACCOUNT_ID_HEADER, facilitator);
        }
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Other(e.into()))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        if let Some(timeout) = spec.timeout.or(self.inner.timeout) {
            *request.timeout_mut() = Some(timeout);
        }

        match self.inner.client.execute(request).await.map_err(Error::from) {
            Ok(response) => Ok(response),
            Err(Error::ApiError(api_error)) if api_error.status == 401 => {
                self.inner.authenticator.invalidate(&token).await;
                Err(Error::ApiError(api_error))
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`execute_bytes`](Self::execute_bytes), but maps a `404 Not Found` to `None`.
    pub(crate) async fn execute_bytes_optional(
        &self,
        spec: RequestSpec,
    ) -> Result<Option<Vec<u8>>, Error> {
        match self.execute_bytes(spec).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(Error::ApiError(api_error)) if api_error.status == 404 => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Executes the request and deserializes the response body into `T`.
    pub async fn execute_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, Error> {
        let value = self.execute(spec).await?;

        serde_json::from_value(value).map_err(Error::MalformedResponseError)
    }

    /// Like [`execute_as`](Self::execute_as), but maps a `404 Not Found` to `None`.
    pub(crate) async fn execute_optional<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
    ) -> Result<Option<T>, Error> {
        match self.execute_as(spec).await {
            Ok(value) => Ok(Some(value)),
            Err(Error::ApiError(api_error)) if api_error.status == 404 => Ok(None),
            Err(e) => Err(e),
        }
    }
}
