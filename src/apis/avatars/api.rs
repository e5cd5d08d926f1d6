use crate::{
    apis::auth::Scope,
    dispatcher::{RequestDispatcher, RequestSpec},
    error::require,
    Error,
};
use urlencoding::encode;

/// Moov avatars APIs client.
#[derive(Clone, Debug)]
pub struct AvatarsApi {
    dispatcher: RequestDispatcher,
}

impl AvatarsApi {
    pub(crate) fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Gets the image associated with a unique id, such as an account id or a routing number.
    ///
    /// Returns the raw image bytes, or `None` if there's no avatar for `unique_id`.
    #[tracing::instrument(name = "Get Avatar", skip(self))]
    pub async fn get(&self, unique_id: &str) -> Result<Option<Vec<u8>>, Error> {
        require("uniqueID", unique_id)?;

        self.dispatcher
            .execute_bytes_optional(RequestSpec::get(
                format!("avatars/{}", encode(unique_id)),
                Scope::ProfileEnrichmentRead,
            ))
            .await
    }
}
