//! APIs and models related to wallets.

mod api;
mod model;

pub use api::WalletsApi;
pub use model::*;
