use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::cryptopia::client::CryptopiaClient;

pub const EXCHANGE_NAME: &str = "cryptopia";

/// Create a Cryptopia client backed by reqwest.
///
/// Missing credentials are not an error here; private methods will refuse to
/// dispatch until a config with credentials is used.
pub fn build_client(config: ExchangeConfig) -> Result<CryptopiaClient<ReqwestRest>, ExchangeError> {
    config.validate()?;

    let rest_config =
        RestClientConfig::new(EXCHANGE_NAME.to_string()).with_timeout(config.timeout_seconds);
    let rest = RestClientBuilder::new(rest_config).build()?;

    Ok(CryptopiaClient::new(rest, config))
}

/// Client for public market data only
pub fn build_public_client() -> Result<CryptopiaClient<ReqwestRest>, ExchangeError> {
    build_client(ExchangeConfig::read_only())
}
