pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    types::{Params, SigningScheme, Visibility},
};
pub use exchanges::cryptopia::{build_client, build_public_client, ApiMethod, CryptopiaClient};
