use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Middleware to inject the `User-Agent` header and the facilitator's `origin` and `referer`
/// to all outgoing requests.
pub struct InjectHeadersMiddleware {
    headers: HeaderMap,
}

impl InjectHeadersMiddleware {
    pub fn new(domain: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        match HeaderValue::from_str(domain) {
            Ok(value) if !domain.is_empty() => {
                headers.insert(ORIGIN, value.clone());
                headers.insert(REFERER, value);
            }
            _ => tracing::warn!(
                domain = %domain,
                "Domain is not a valid header value, origin and referer will not be sent"
            ),
        }

        Self { headers }
    }
}

#[async_trait]
impl Middleware for InjectHeadersMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name, value.clone());
        }

        next.run(req, extensions).await
    }
}
