use crate::core::{errors::McapError, types::Candle};
use crate::exchanges::currency_com::types::{
    Assets, CandlesRequest, MarketData, Orderbook, OrderbookRequest, Ticker, Trades,
    TradesRequest,
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Get OHLC candles for a symbol; one malformed row fails the whole call
    async fn get_candles(&self, request: CandlesRequest) -> Result<Vec<Candle>, McapError>;

    /// Get all listed assets keyed by asset code
    async fn get_assets(&self) -> Result<Assets, McapError>;

    /// Get an order book snapshot
    async fn get_orderbook(&self, request: OrderbookRequest) -> Result<Orderbook, McapError>;

    /// Get the 24h market summary keyed by trading pair
    async fn get_summary(&self) -> Result<MarketData, McapError>;

    /// Get last prices and volumes keyed by trading pair
    async fn get_ticker(&self) -> Result<Ticker, McapError>;

    /// Get recent trades for a symbol
    async fn get_trades(&self, request: TradesRequest) -> Result<Trades, McapError>;
}
