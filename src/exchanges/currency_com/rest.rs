use crate::core::errors::McapError;
use crate::core::kernel::{RestClient, NO_PARAMS};
use crate::exchanges::currency_com::types::{
    Assets, CandlesRequest, CandlesRowData, MarketData, Orderbook, OrderbookRequest, Ticker,
    Trades, TradesRequest,
};

pub const CANDLES_ENDPOINT: &str = "/candles";
pub const ASSETS_ENDPOINT: &str = "/assets";
pub const ORDERBOOK_ENDPOINT: &str = "/orderbook";
pub const SUMMARY_ENDPOINT: &str = "/summary";
pub const TICKER_ENDPOINT: &str = "/ticker";
pub const TRADES_ENDPOINT: &str = "/trades";

/// Thin typed wrapper around `RestClient` for the market-cap API
#[derive(Debug, Clone)]
pub struct CurrencyComRest<R: RestClient> {
    client: R,
}

impl<R: RestClient> CurrencyComRest<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &R {
        &self.client
    }

    /// Get raw candle rows, not yet normalized
    pub async fn get_candles(&self, request: &CandlesRequest) -> Result<CandlesRowData, McapError> {
        self.client.get_json(CANDLES_ENDPOINT, request).await
    }

    pub async fn get_assets(&self) -> Result<Assets, McapError> {
        self.client.get_json(ASSETS_ENDPOINT, NO_PARAMS).await
    }

    pub async fn get_orderbook(&self, request: &OrderbookRequest) -> Result<Orderbook, McapError> {
        self.client.get_json(ORDERBOOK_ENDPOINT, request).await
    }

    pub async fn get_summary(&self) -> Result<MarketData, McapError> {
        self.client.get_json(SUMMARY_ENDPOINT, NO_PARAMS).await
    }

    pub async fn get_ticker(&self) -> Result<Ticker, McapError> {
        self.client.get_json(TICKER_ENDPOINT, NO_PARAMS).await
    }

    pub async fn get_trades(&self, request: &TradesRequest) -> Result<Trades, McapError> {
        self.client.get_json(TRADES_ENDPOINT, request).await
    }
}
