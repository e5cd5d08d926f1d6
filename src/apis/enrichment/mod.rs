//! APIs and models related to address and profile enrichment.

mod api;
mod model;

pub use api::EnrichmentApi;
pub use model::*;
