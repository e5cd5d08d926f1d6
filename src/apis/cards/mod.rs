//! APIs and models related to cards.

mod api;
mod model;

pub use api::CardsApi;
pub use model::*;
