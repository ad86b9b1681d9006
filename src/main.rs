use anyhow::Context;
use cryptopia::core::config::{ConfigError, ExchangeConfig};
use cryptopia::{build_client, ExchangeError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "env-file")]
fn load_config() -> Result<ExchangeConfig, ConfigError> {
    ExchangeConfig::from_env_file("cryptopia")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<ExchangeConfig, ConfigError> {
    ExchangeConfig::from_env("cryptopia")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Falls back to public-only access when CRYPTOPIA_API_KEY / CRYPTOPIA_SECRET_KEY are unset
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "no credentials configured, private calls are disabled");
            ExchangeConfig::read_only()
        }
    };

    let client = build_client(config).context("failed to build Cryptopia client")?;

    info!("Fetching currencies...");
    let currencies = client
        .get_currencies()
        .await
        .context("GetCurrencies failed")?;
    info!(count = currencies.len(), "currencies loaded");
    for currency in currencies.iter().take(5) {
        println!(
            "Currency: {} ({}), Status: {}",
            currency.name,
            currency.symbol,
            currency.status.as_deref().unwrap_or("unknown")
        );
    }

    if client.config().has_credentials() {
        info!("Fetching balances...");
        match client.get_balance(None).await {
            Ok(balances) => {
                for balance in balances.iter().filter(|b| !b.total.is_zero()) {
                    println!(
                        "Balance: {} total={} available={}",
                        balance.symbol, balance.total, balance.available
                    );
                }
            }
            Err(ExchangeError::ApiError { message }) => {
                warn!(message = %message, "exchange rejected GetBalance");
            }
            Err(e) => return Err(e).context("GetBalance failed"),
        }
    }

    Ok(())
}
