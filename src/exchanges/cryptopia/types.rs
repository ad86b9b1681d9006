use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaCurrency {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub withdraw_fee: Option<Decimal>,
    #[serde(default)]
    pub min_withdraw: Option<Decimal>,
    #[serde(default)]
    pub min_base_trade: Option<Decimal>,
    #[serde(default)]
    pub is_tip_enabled: bool,
    #[serde(default)]
    pub min_tip: Option<Decimal>,
    #[serde(default)]
    pub deposit_confirmations: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub listing_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaTradePair {
    pub id: u64,
    pub label: String,
    pub currency: String,
    pub symbol: String,
    pub base_currency: String,
    pub base_symbol: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub trade_fee: Option<Decimal>,
    #[serde(default)]
    pub minimum_trade: Option<Decimal>,
    #[serde(default)]
    pub maximum_trade: Option<Decimal>,
    #[serde(default)]
    pub minimum_base_trade: Option<Decimal>,
    #[serde(default)]
    pub maximum_base_trade: Option<Decimal>,
    #[serde(default)]
    pub minimum_price: Option<Decimal>,
    #[serde(default)]
    pub maximum_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaMarket {
    pub trade_pair_id: u64,
    pub label: String,
    pub ask_price: Decimal,
    pub bid_price: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub volume: Decimal,
    pub last_price: Decimal,
    #[serde(default)]
    pub buy_volume: Option<Decimal>,
    #[serde(default)]
    pub sell_volume: Option<Decimal>,
    #[serde(default)]
    pub change: Option<Decimal>,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub close: Option<Decimal>,
    #[serde(default)]
    pub base_volume: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaMarketTrade {
    pub trade_pair_id: u64,
    pub label: String,
    #[serde(rename = "Type")]
    pub trade_type: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaOrderBookEntry {
    pub trade_pair_id: u64,
    pub label: String,
    pub price: Decimal,
    pub volume: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaMarketOrders {
    #[serde(default)]
    pub buy: Vec<CryptopiaOrderBookEntry>,
    #[serde(default)]
    pub sell: Vec<CryptopiaOrderBookEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaBalance {
    pub currency_id: u64,
    pub symbol: String,
    pub total: Decimal,
    pub available: Decimal,
    #[serde(default)]
    pub unconfirmed: Option<Decimal>,
    #[serde(default)]
    pub held_for_trades: Option<Decimal>,
    #[serde(default)]
    pub pending_withdraw: Option<Decimal>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub base_address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaDepositAddress {
    pub currency: String,
    pub address: String,
    #[serde(default)]
    pub base_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaOpenOrder {
    pub order_id: u64,
    pub trade_pair_id: u64,
    pub market: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub remaining: Option<Decimal>,
    #[serde(default)]
    pub time_stamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaTrade {
    pub trade_id: u64,
    pub trade_pair_id: u64,
    pub market: String,
    #[serde(rename = "Type")]
    pub trade_type: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub time_stamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaTransaction {
    pub id: u64,
    pub currency: String,
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(rename = "Type")]
    pub transaction_type: String,
    pub amount: Decimal,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub confirmations: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CryptopiaSubmitTradeResult {
    /// `None` when the order was filled immediately
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub filled_orders: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Deposit,
    Withdraw,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// Which orders a `CancelTrade` call removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelRequest {
    /// Every open order on the account
    All,
    /// A single order
    Trade { order_id: u64 },
    /// Every open order in one market
    TradePair { trade_pair_id: u64 },
}

impl CancelRequest {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Trade { .. } => "Trade",
            Self::TradePair { .. } => "TradePair",
        }
    }
}
