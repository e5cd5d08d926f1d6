//! Rust client for the [Moov](https://moov.io) payments platform.
//!
//! It provides convenient, typed access to accounts, bank accounts, cards, capabilities,
//! wallets, transfers, enrichment and avatars APIs from applications built with Rust.
//!
//! Check out also the official Moov [API documentation](https://docs.moov.io).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Create an API key from the Moov dashboard. You will need its public and secret keys,
//! the id of your facilitator account and the domain registered for the key.
//!
//! ## Initialize a new `MoovClient`
//!
//! ```rust,no_run
//! # use moov_rust::{MoovClient, apis::auth::*, client::Environment};
//! let moov = MoovClient::builder(Credentials::new(
//!     "public-key",
//!     "secret-key",
//!     "facilitator-account-id",
//!     "https://my.domain",
//! ))
//! .with_environment(Environment::Staging)
//! .with_token_caching(TokenCaching::Enabled)
//! .build();
//! ```
//!
//! By default, a `MoovClient` connects to the Production environment and requests a new
//! access token for every API call. Each token is scoped to the account and operation it is
//! used for.
//!
//! ## Request capabilities for an account
//!
//! ```rust,no_run
//! # use moov_rust::{MoovClient, Error, apis::capabilities::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let moov: MoovClient = unreachable!();
//! #
//! let capabilities = moov
//!     .capabilities
//!     .request(
//!         "some-account-id",
//!         &[CapabilityName::Transfers, CapabilityName::Wallet],
//!     )
//!     .await?;
//!
//! for capability in &capabilities {
//!     println!("{}: {:?}", capability.capability, capability.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Create a transfer
//!
//! ```rust,no_run
//! # use moov_rust::{MoovClient, Error, apis::transfers::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let moov: MoovClient = unreachable!();
//! #
//! let create_transfer_request = CreateTransferRequestBuilder::default()
//!     .source(TransferParty::payment_method("source-payment-method-id"))
//!     .destination(TransferParty::payment_method("destination-payment-method-id"))
//!     .amount(Amount::usd(1204))
//!     .description(Some("Invoice 42".to_string()))
//!     .build()
//!     .unwrap();
//!
//! // Passing `None` generates a new idempotency key
//! let res = moov.transfers.create(&create_transfer_request, None).await?;
//!
//! println!("Created new transfer: {}", res.transfer_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! To run a demo, use `cargo run` like this:
//!
//! ```shell
//! cargo run --example capabilities
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub(crate) mod authenticator;
pub mod client;
mod common;
pub mod dispatcher;
pub mod error;
mod middlewares;

pub use client::MoovClient;
pub use error::Error;
