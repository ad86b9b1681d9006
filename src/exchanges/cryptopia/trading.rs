use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Params;
use crate::exchanges::cryptopia::client::CryptopiaClient;
use crate::exchanges::cryptopia::methods::ApiMethod;
use crate::exchanges::cryptopia::types::{CancelRequest, CryptopiaSubmitTradeResult, OrderSide};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

// Decimals travel as strings so no precision is lost on the way out.
fn decimal(value: Decimal) -> Value {
    Value::from(value.normalize().to_string())
}

pub fn submit_trade_params(market: &str, side: OrderSide, rate: Decimal, amount: Decimal) -> Params {
    let mut params = Params::new();
    params.insert("Market".to_string(), Value::from(market));
    params.insert("Type".to_string(), Value::from(side.to_string()));
    params.insert("Rate".to_string(), decimal(rate));
    params.insert("Amount".to_string(), decimal(amount));
    params
}

pub fn cancel_trade_params(request: CancelRequest) -> Params {
    let mut params = Params::new();
    params.insert("Type".to_string(), Value::from(request.type_name()));
    match request {
        CancelRequest::All => {}
        CancelRequest::Trade { order_id } => {
            params.insert("OrderId".to_string(), Value::from(order_id));
        }
        CancelRequest::TradePair { trade_pair_id } => {
            params.insert("TradePairId".to_string(), Value::from(trade_pair_id));
        }
    }
    params
}

impl<R: RestClient> CryptopiaClient<R> {
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn submit_trade(
        &self,
        market: &str,
        side: OrderSide,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<CryptopiaSubmitTradeResult, ExchangeError> {
        if rate <= Decimal::ZERO || amount <= Decimal::ZERO {
            return Err(ExchangeError::InvalidParameters(format!(
                "rate and amount must be positive, got rate={} amount={}",
                rate, amount
            )));
        }
        self.dispatch_json(
            ApiMethod::SubmitTrade,
            submit_trade_params(market, side, rate, amount),
        )
        .await
    }

    /// Returns the ids of the cancelled orders
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn cancel_trade(&self, request: CancelRequest) -> Result<Vec<u64>, ExchangeError> {
        self.dispatch_json(ApiMethod::CancelTrade, cancel_trade_params(request))
            .await
    }

    /// Tip `amount` of `currency` split across the last `active_users` chat users
    #[instrument(skip(self), fields(exchange = "cryptopia"))]
    pub async fn submit_tip(
        &self,
        currency: &str,
        active_users: u32,
        amount: Decimal,
    ) -> Result<Value, ExchangeError> {
        let mut params = Params::new();
        params.insert("Currency".to_string(), Value::from(currency));
        params.insert("ActiveUsers".to_string(), Value::from(active_users));
        params.insert("Amount".to_string(), decimal(amount));
        self.dispatch(ApiMethod::SubmitTip.name(), params).await
    }
}
