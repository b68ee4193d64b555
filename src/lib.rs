pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ClientConfig,
    errors::{McapError, ParseError},
    kernel::{ErrorPayload, ErrorResponse},
    traits::MarketDataSource,
    types::*,
};
pub use exchanges::currency_com::{
    build_connector, build_connector_with_client, CandlesRequest, CurrencyComConnector,
    OrderbookRequest, TradesRequest,
};
