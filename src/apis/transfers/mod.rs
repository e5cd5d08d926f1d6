//! APIs and models related to transfers and refunds.

mod api;
mod model;

pub use api::TransfersApi;
pub use model::*;
