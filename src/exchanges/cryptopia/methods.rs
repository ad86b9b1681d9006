use crate::core::errors::ExchangeError;
use crate::core::types::Visibility;
use std::fmt;
use std::str::FromStr;

/// Every API method this client knows how to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    GetCurrencies,
    GetTradePairs,
    GetMarkets,
    GetMarket,
    GetMarketHistory,
    GetMarketOrders,
    GetBalance,
    GetDepositAddress,
    GetOpenOrders,
    GetTradeHistory,
    GetTransactions,
    SubmitTrade,
    CancelTrade,
    SubmitTip,
}

impl ApiMethod {
    pub const PUBLIC: [Self; 6] = [
        Self::GetCurrencies,
        Self::GetTradePairs,
        Self::GetMarkets,
        Self::GetMarket,
        Self::GetMarketHistory,
        Self::GetMarketOrders,
    ];

    pub const PRIVATE: [Self; 8] = [
        Self::GetBalance,
        Self::GetDepositAddress,
        Self::GetOpenOrders,
        Self::GetTradeHistory,
        Self::GetTransactions,
        Self::SubmitTrade,
        Self::CancelTrade,
        Self::SubmitTip,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::GetCurrencies => "GetCurrencies",
            Self::GetTradePairs => "GetTradePairs",
            Self::GetMarkets => "GetMarkets",
            Self::GetMarket => "GetMarket",
            Self::GetMarketHistory => "GetMarketHistory",
            Self::GetMarketOrders => "GetMarketOrders",
            Self::GetBalance => "GetBalance",
            Self::GetDepositAddress => "GetDepositAddress",
            Self::GetOpenOrders => "GetOpenOrders",
            Self::GetTradeHistory => "GetTradeHistory",
            Self::GetTransactions => "GetTransactions",
            Self::SubmitTrade => "SubmitTrade",
            Self::CancelTrade => "CancelTrade",
            Self::SubmitTip => "SubmitTip",
        }
    }

    pub const fn visibility(self) -> Visibility {
        match self {
            Self::GetCurrencies
            | Self::GetTradePairs
            | Self::GetMarkets
            | Self::GetMarket
            | Self::GetMarketHistory
            | Self::GetMarketOrders => Visibility::Public,
            Self::GetBalance
            | Self::GetDepositAddress
            | Self::GetOpenOrders
            | Self::GetTradeHistory
            | Self::GetTransactions
            | Self::SubmitTrade
            | Self::CancelTrade
            | Self::SubmitTip => Visibility::Private,
        }
    }

    pub const fn is_private(self) -> bool {
        matches!(self.visibility(), Visibility::Private)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::PUBLIC.into_iter().chain(Self::PRIVATE)
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ApiMethod {
    type Err = ExchangeError;

    /// Exact, case-sensitive lookup against the allow-list
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|method| method.name() == s)
            .ok_or_else(|| ExchangeError::UnsupportedMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_private_partition() {
        for method in ApiMethod::PUBLIC {
            assert_eq!(method.visibility(), Visibility::Public, "{}", method);
        }
        for method in ApiMethod::PRIVATE {
            assert_eq!(method.visibility(), Visibility::Private, "{}", method);
        }
        assert_eq!(ApiMethod::all().count(), 14);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for method in ApiMethod::all() {
            assert_eq!(method.name().parse::<ApiMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = "GetWithdrawals".parse::<ApiMethod>().unwrap_err();
        assert!(matches!(err, ExchangeError::UnsupportedMethod(ref name) if name == "GetWithdrawals"));

        // lookup is case-sensitive
        assert!("getbalance".parse::<ApiMethod>().is_err());
    }
}
