//! Credentials, scopes and access tokens.

mod api;
mod model;

pub use api::AuthApi;
pub use model::*;
