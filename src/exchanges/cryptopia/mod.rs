pub mod account;
pub mod builder;
pub mod client;
pub mod codec;
pub mod market_data;
pub mod methods;
pub mod signer;
pub mod trading;
pub mod types;

// Re-export main types for easier importing
pub use builder::{build_client, build_public_client};
pub use client::CryptopiaClient;
pub use codec::decode_response;
pub use methods::ApiMethod;
pub use signer::{create_signer, AmxSigner, MessageSigner};
pub use types::{
    CancelRequest, CryptopiaBalance, CryptopiaCurrency, CryptopiaDepositAddress, CryptopiaMarket,
    CryptopiaMarketOrders, CryptopiaMarketTrade, CryptopiaOpenOrder, CryptopiaOrderBookEntry,
    CryptopiaSubmitTradeResult, CryptopiaTrade, CryptopiaTradePair, CryptopiaTransaction,
    OrderSide, TransactionType,
};
