use crate::core::{
    errors::McapError,
    kernel::{ReqwestRest, RestClient},
    traits::MarketDataSource,
    types::Candle,
};
use crate::exchanges::currency_com::{
    converters::convert_candle_rows,
    rest::CurrencyComRest,
    types::{
        Assets, CandlesRequest, MarketData, Orderbook, OrderbookRequest, Ticker, Trades,
        TradesRequest,
    },
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Market-cap API client.
///
/// Cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct CurrencyComConnector<R: RestClient = ReqwestRest> {
    rest: CurrencyComRest<R>,
}

impl<R: RestClient> CurrencyComConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            rest: CurrencyComRest::new(rest),
        }
    }

    /// The underlying transport, for endpoints without a typed accessor
    pub fn rest(&self) -> &R {
        self.rest.inner()
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for CurrencyComConnector<R> {
    #[instrument(skip(self), fields(symbol = %request.symbol, interval = %request.interval))]
    async fn get_candles(&self, request: CandlesRequest) -> Result<Vec<Candle>, McapError> {
        let rows = self.rest.get_candles(&request).await?;
        let candles = convert_candle_rows(&rows)?;
        debug!(count = candles.len(), "candles normalized");
        Ok(candles)
    }

    async fn get_assets(&self) -> Result<Assets, McapError> {
        self.rest.get_assets().await
    }

    #[instrument(skip(self), fields(symbol = %request.symbol))]
    async fn get_orderbook(&self, request: OrderbookRequest) -> Result<Orderbook, McapError> {
        self.rest.get_orderbook(&request).await
    }

    async fn get_summary(&self) -> Result<MarketData, McapError> {
        self.rest.get_summary().await
    }

    async fn get_ticker(&self) -> Result<Ticker, McapError> {
        self.rest.get_ticker().await
    }

    #[instrument(skip(self), fields(symbol = %request.symbol))]
    async fn get_trades(&self, request: TradesRequest) -> Result<Trades, McapError> {
        self.rest.get_trades(&request).await
    }
}
