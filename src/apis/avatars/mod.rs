//! APIs related to avatars.

mod api;

pub use api::AvatarsApi;
