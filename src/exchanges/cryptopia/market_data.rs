use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Params;
use crate::exchanges::cryptopia::client::CryptopiaClient;
use crate::exchanges::cryptopia::methods::ApiMethod;
use crate::exchanges::cryptopia::types::{
    CryptopiaCurrency, CryptopiaMarket, CryptopiaMarketOrders, CryptopiaMarketTrade,
    CryptopiaTradePair,
};
use serde_json::Value;
use tracing::instrument;

impl<R: RestClient> CryptopiaClient<R> {
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_currencies(&self) -> Result<Vec<CryptopiaCurrency>, ExchangeError> {
        self.dispatch_json(ApiMethod::GetCurrencies, Params::new())
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_trade_pairs(&self) -> Result<Vec<CryptopiaTradePair>, ExchangeError> {
        self.dispatch_json(ApiMethod::GetTradePairs, Params::new())
            .await
    }

    /// All markets, optionally restricted to one base currency and a
    /// statistics window in hours
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_markets(
        &self,
        base_market: Option<&str>,
        hours: Option<u32>,
    ) -> Result<Vec<CryptopiaMarket>, ExchangeError> {
        let mut params = Params::new();
        if let Some(base_market) = base_market {
            params.insert("baseMarket".to_string(), Value::from(base_market));
        }
        if let Some(hours) = hours {
            params.insert("hours".to_string(), Value::from(hours));
        }
        self.dispatch_json(ApiMethod::GetMarkets, params).await
    }

    /// `market` is a trade pair label such as `DOT_BTC` or a numeric trade pair id
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_market(
        &self,
        market: &str,
        hours: Option<u32>,
    ) -> Result<CryptopiaMarket, ExchangeError> {
        self.dispatch_json(ApiMethod::GetMarket, market_params(market, hours))
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_market_history(
        &self,
        market: &str,
        hours: Option<u32>,
    ) -> Result<Vec<CryptopiaMarketTrade>, ExchangeError> {
        self.dispatch_json(ApiMethod::GetMarketHistory, market_params(market, hours))
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_market_orders(
        &self,
        market: &str,
        order_count: u32,
    ) -> Result<CryptopiaMarketOrders, ExchangeError> {
        let mut params = Params::new();
        params.insert("market".to_string(), Value::from(market));
        params.insert("orderCount".to_string(), Value::from(order_count));
        self.dispatch_json(ApiMethod::GetMarketOrders, params).await
    }
}

fn market_params(market: &str, hours: Option<u32>) -> Params {
    let mut params = Params::new();
    params.insert("market".to_string(), Value::from(market));
    if let Some(hours) = hours {
        params.insert("hours".to_string(), Value::from(hours));
    }
    params
}
