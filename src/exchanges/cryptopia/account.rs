use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Params;
use crate::exchanges::cryptopia::client::CryptopiaClient;
use crate::exchanges::cryptopia::methods::ApiMethod;
use crate::exchanges::cryptopia::types::{
    CryptopiaBalance, CryptopiaDepositAddress, CryptopiaOpenOrder, CryptopiaTrade,
    CryptopiaTransaction, TransactionType,
};
use serde_json::Value;
use tracing::instrument;

impl<R: RestClient> CryptopiaClient<R> {
    /// Balances for every currency, or just `currency` when given
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_balance(
        &self,
        currency: Option<&str>,
    ) -> Result<Vec<CryptopiaBalance>, ExchangeError> {
        let mut params = Params::new();
        if let Some(currency) = currency {
            params.insert("Currency".to_string(), Value::from(currency));
        }
        self.dispatch_json(ApiMethod::GetBalance, params).await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_deposit_address(
        &self,
        currency: &str,
    ) -> Result<CryptopiaDepositAddress, ExchangeError> {
        let mut params = Params::new();
        params.insert("Currency".to_string(), Value::from(currency));
        self.dispatch_json(ApiMethod::GetDepositAddress, params)
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_open_orders(
        &self,
        market: Option<&str>,
        count: Option<u32>,
    ) -> Result<Vec<CryptopiaOpenOrder>, ExchangeError> {
        self.dispatch_json(ApiMethod::GetOpenOrders, market_count(market, count))
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_trade_history(
        &self,
        market: Option<&str>,
        count: Option<u32>,
    ) -> Result<Vec<CryptopiaTrade>, ExchangeError> {
        self.dispatch_json(ApiMethod::GetTradeHistory, market_count(market, count))
            .await
    }

    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn get_transactions(
        &self,
        transaction_type: TransactionType,
        count: Option<u32>,
    ) -> Result<Vec<CryptopiaTransaction>, ExchangeError> {
        let mut params = Params::new();
        params.insert(
            "Type".to_string(),
            Value::from(transaction_type.to_string()),
        );
        if let Some(count) = count {
            params.insert("Count".to_string(), Value::from(count));
        }
        self.dispatch_json(ApiMethod::GetTransactions, params).await
    }
}

fn market_count(market: Option<&str>, count: Option<u32>) -> Params {
    let mut params = Params::new();
    if let Some(market) = market {
        params.insert("Market".to_string(), Value::from(market));
    }
    if let Some(count) = count {
        params.insert("Count".to_string(), Value::from(count));
    }
    params
}
