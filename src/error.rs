//! Standard errors used by all functions in the crate.

use serde_json::Value;
use std::fmt;

/// Error collecting all possible failures of the Moov client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required input was missing or malformed.
    ///
    /// This is always detected locally, before any network call is made.
    #[error("Invalid request: {0}")]
    ValidationError(#[from] ValidationError),
    /// The authorization server refused to issue a token for the given credentials and scope.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),
    /// Network or protocol level failure while talking to Moov.
    #[error("HTTP error: {0}")]
    TransportError(#[from] reqwest::Error),
    /// Error returned by a Moov API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// A successful response carried a body which could not be parsed.
    #[error("Malformed response body: {0}")]
    MalformedResponseError(#[source] serde_json::Error),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::TransportError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Local validation failure of a request parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A field was present but its value is not acceptable.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) | ValidationError::InvalidField { field, .. } => {
                field
            }
        }
    }
}

/// Fails with [`ValidationError::MissingField`] if `value` is empty or only whitespace.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Moov HTTP APIs error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Body of the error response.
    ///
    /// Non-JSON bodies are kept as a JSON string. `None` if the body was empty.
    pub body: Option<Value>,
}

impl ApiError {
    /// Human readable message extracted from the error body, if any.
    ///
    /// Moov reports errors either as `{"error": "..."}` or `{"message": "..."}`.
    pub fn message(&self) -> Option<&str> {
        match self.body.as_ref()? {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get("error")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moov HTTP error {}", self.status)?;

        match (self.message(), &self.body) {
            (Some(message), _) => write!(f, ": {}", message)?,
            (None, Some(body)) => write!(f, ": {}", body)?,
            (None, None) => {}
        }

        Ok(())
    }
}
