use crate::error::{ApiError, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use serde_json::Value;
use task_local_extensions::Extensions;

/// Reqwest middleware which translates error responses returned from Moov APIs
/// into [`Error::ApiError`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an error if the response is not a success.
        // Try parsing the contents of the error as JSON,
        // but if that doesn't work, keep the entire contents of the response as text.
        if !response.status().is_success() {
            let status = response.status();
            let bytes = response.bytes().await?;

            tracing::debug!("Failed HTTP request. Status code: {}", status);

            let body = if bytes.is_empty() {
                None
            } else {
                Some(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }))
            };

            return Err(Error::ApiError(ApiError {
                status: status.as_u16(),
                body,
            })
            .into());
        }

        Ok(response)
    }
}
