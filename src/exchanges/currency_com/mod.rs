pub mod builder;
pub mod connector;
pub mod converters;
pub mod rest;
pub mod types;

// Re-export main types for easier importing
pub use builder::{build_connector, build_connector_with_client};
pub use connector::CurrencyComConnector;
pub use converters::{convert_candle_row, convert_candle_rows};
pub use types::{
    Asset, Assets, CandlesRequest, CandlesRowData, MarketData, MarketProp, Orderbook,
    OrderbookRequest, PriceChange, Ticker, Trade, Trades, TradesRequest,
};
