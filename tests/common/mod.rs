//! Shared fixtures for the integration tests

use cryptopia::core::config::ExchangeConfig;
use cryptopia::core::kernel::ReqwestRest;
use cryptopia::{build_client, CryptopiaClient, SigningScheme};
use wiremock::MockServer;

pub const API_KEY: &str = "a3b6e5f2c1d04e8f9a7b6c5d4e3f2a1b";
/// base64 of "test-secret-bytes"
pub const API_SECRET: &str = "dGVzdC1zZWNyZXQtYnl0ZXM=";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn public_config(server: &MockServer) -> ExchangeConfig {
    ExchangeConfig::read_only().base_url(server.uri())
}

pub fn private_config(server: &MockServer, scheme: SigningScheme) -> ExchangeConfig {
    ExchangeConfig::new(API_KEY.to_string(), API_SECRET.to_string())
        .base_url(server.uri())
        .signing_scheme(scheme)
}

pub fn client(config: ExchangeConfig) -> CryptopiaClient<ReqwestRest> {
    build_client(config).expect("client should build")
}

/// Wrap a payload in the exchange's success envelope
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "Success": true,
        "Message": null,
        "Data": data,
        "Error": null,
    })
}
