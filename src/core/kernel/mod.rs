//! Transport kernel shared by the exchange client
//!
//! The kernel only knows how to send a fully-built request and how a signer
//! turns parameters into authenticated headers and a body. Everything
//! exchange-specific (method table, signing schemes, response envelopes)
//! lives under `exchanges`.
//!
//! - `RestClient`: one request in, one raw response or transport error out
//! - `ReqwestRest`: the reqwest-backed implementation, built via
//!   `RestClientBuilder`
//! - `Signer`: pluggable request authentication
//!
//! ```rust,no_run
//! use cryptopia::core::kernel::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rest = RestClientBuilder::new(RestClientConfig::new("cryptopia".to_string()).with_timeout(10))
//!     .build()?;
//! let response = rest
//!     .execute(RestRequest::get("https://www.cryptopia.co.nz/api/GetCurrencies".to_string()))
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```
pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, RestRequest, RestResponse};
pub use signer::{decode_secret, SignatureResult, SignedPayload, Signer};
