use crate::core::kernel::query::is_zero;
use crate::core::types::{conversion, PriceLevel};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// Request configs. Field order does not matter on the wire; the encoder sorts keys.

/// Query for `GET /candles`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlesRequest {
    pub symbol: String,
    /// Bar size such as `M1`, `H1`, `D1`; unknown values are rejected server-side
    pub interval: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: i64,
    /// Epoch milliseconds
    #[serde(rename = "startTime", default, skip_serializing_if = "is_zero")]
    pub start_time: i64,
    /// Epoch milliseconds
    #[serde(rename = "endTime", default, skip_serializing_if = "is_zero")]
    pub end_time: i64,
}

impl CandlesRequest {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }
}

/// Query for `GET /orderbook`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookRequest {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub depth: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub level: i64,
}

impl OrderbookRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }
}

/// Query for `GET /trades`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradesRequest {
    pub symbol: String,
    /// `buy` or `sell`; empty means both
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub trade_type: String,
}

impl TradesRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            trade_type: String::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, trade_type: impl Into<String>) -> Self {
        self.trade_type = trade_type.into();
        self
    }
}

// Responses

/// Raw `/candles` payload: rows of `[time, open, high, low, close]`
pub type CandlesRowData = Vec<Vec<serde_json::Value>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "conversion::opt_i64_lenient")]
    pub unified_cryptoasset_id: Option<i64>,
    #[serde(default, deserialize_with = "conversion::opt_bool_lenient")]
    pub can_withdraw: Option<bool>,
    #[serde(default, deserialize_with = "conversion::opt_bool_lenient")]
    pub can_deposit: Option<bool>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub min_withdraw: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub max_withdraw: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub maker_fee: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub taker_fee: Option<f64>,
}

/// `/assets` payload keyed by asset code
pub type Assets = BTreeMap<String, Asset>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Orderbook {
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "conversion::i64_lenient")]
    pub timestamp: i64,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
}

impl Orderbook {
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }
}

/// 24h statistics of one trading pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketProp {
    #[serde(default)]
    pub trading_pairs: String,
    #[serde(default)]
    pub base_currency: String,
    #[serde(default)]
    pub quote_currency: String,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub last_price: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub lowest_ask: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub highest_bid: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub base_volume: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub quote_volume: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub price_change_percent_24h: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub highest_price_24h: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub lowest_price_24h: Option<f64>,
}

/// `/summary` payload keyed by trading pair.
///
/// Accepts both a bare map and a map wrapped in a `data` field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub data: BTreeMap<String, MarketProp>,
}

impl<'de> Deserialize<'de> for MarketData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped { data: BTreeMap<String, MarketProp> },
            Bare(BTreeMap<String, MarketProp>),
        }

        let data = match Shape::deserialize(deserializer)? {
            Shape::Wrapped { data } | Shape::Bare(data) => data,
        };
        Ok(Self { data })
    }
}

/// Ticker entry of one trading pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceChange {
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub last_price: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub base_volume: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub quote_volume: Option<f64>,
    #[serde(rename = "isFrozen", default, deserialize_with = "conversion::opt_bool_lenient")]
    pub is_frozen: Option<bool>,
}

/// `/ticker` payload keyed by trading pair
pub type Ticker = BTreeMap<String, PriceChange>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    #[serde(
        rename = "tradeID",
        alias = "trade_id",
        deserialize_with = "conversion::i64_lenient"
    )]
    pub trade_id: i64,
    #[serde(deserialize_with = "conversion::f64_lenient")]
    pub price: f64,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub base_volume: Option<f64>,
    #[serde(default, deserialize_with = "conversion::opt_f64_lenient")]
    pub quote_volume: Option<f64>,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "conversion::i64_lenient")]
    pub trade_timestamp: i64,
    #[serde(rename = "type", default)]
    pub trade_type: String,
}

/// `/trades` payload
pub type Trades = Vec<Trade>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::encode_query;
    use serde_json::json;

    #[test]
    fn test_candles_request_encoding() {
        let request = CandlesRequest::new("BTC/USD", "M1").with_limit(-3);
        assert_eq!(
            encode_query(&request).unwrap(),
            "interval=M1&limit=-3&symbol=BTC%2FUSD"
        );
    }

    #[test]
    fn test_candles_request_round_trip() {
        let request = CandlesRequest::new("ETH/USD", "H1")
            .with_limit(10)
            .with_range(1_596_000_000_000, 1_596_100_000_000);

        let encoded = encode_query(&request).unwrap();
        assert_eq!(
            encoded,
            "endTime=1596100000000&interval=H1&limit=10&startTime=1596000000000&symbol=ETH%2FUSD"
        );

        let decoded: CandlesRequest = serde_urlencoded::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_request_integers_are_64_bit() {
        let request = CandlesRequest::new("BTC/USD", "M1").with_limit(5_000_000_000);
        let encoded = encode_query(&request).unwrap();
        assert_eq!(encoded, "interval=M1&limit=5000000000&symbol=BTC%2FUSD");

        let decoded: CandlesRequest = serde_urlencoded::from_str(&encoded).unwrap();
        assert_eq!(decoded.limit, 5_000_000_000);

        let request = OrderbookRequest::new("BTC/USD").with_depth(i64::from(i32::MAX) + 1);
        assert_eq!(
            encode_query(&request).unwrap(),
            "depth=2147483648&symbol=BTC%2FUSD"
        );
    }

    #[test]
    fn test_orderbook_request_omits_defaults() {
        let request = OrderbookRequest::new("BTC/USD");
        assert_eq!(encode_query(&request).unwrap(), "symbol=BTC%2FUSD");

        let request = request.with_depth(3).with_level(2);
        let encoded = encode_query(&request).unwrap();
        assert_eq!(encoded, "depth=3&level=2&symbol=BTC%2FUSD");

        let decoded: OrderbookRequest = serde_urlencoded::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_trades_request_type_field() {
        assert_eq!(
            encode_query(&TradesRequest::new("BTC/USD")).unwrap(),
            "symbol=BTC%2FUSD"
        );

        let request = TradesRequest::new("BTC/USD").with_type("buy");
        let encoded = encode_query(&request).unwrap();
        assert_eq!(encoded, "symbol=BTC%2FUSD&type=buy");

        let decoded: TradesRequest = serde_urlencoded::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_required_fields_are_sent_even_when_empty() {
        let encoded = encode_query(&CandlesRequest::default()).unwrap();
        assert_eq!(encoded, "interval=&symbol=");
    }

    #[test]
    fn test_summary_accepts_both_shapes() {
        let entry = json!({
            "trading_pairs": "BTC/USD",
            "base_currency": "BTC",
            "quote_currency": "USD",
            "last_price": "9500.5",
            "base_volume": 12.5
        });

        let bare: MarketData = serde_json::from_value(json!({ "BTC/USD": entry })).unwrap();
        let wrapped: MarketData =
            serde_json::from_value(json!({ "data": { "BTC/USD": entry } })).unwrap();

        assert_eq!(bare, wrapped);
        assert_eq!(bare.data["BTC/USD"].last_price, Some(9500.5));
        assert_eq!(bare.data["BTC/USD"].base_volume, Some(12.5));
    }

    #[test]
    fn test_trade_decoding() {
        let trades: Trades = serde_json::from_value(json!([
            {
                "tradeID": 42,
                "price": "9500.5",
                "base_volume": 0.1,
                "quote_volume": "950.05",
                "trade_timestamp": 1_596_000_000_000_i64,
                "type": "buy"
            }
        ]))
        .unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].trade_id, 42);
        assert_eq!(trades[0].price, 9500.5);
        assert_eq!(trades[0].quote_volume, Some(950.05));
        assert_eq!(trades[0].trade_type, "buy");
    }

    #[test]
    fn test_asset_flags_accept_strings() {
        let assets: Assets = serde_json::from_value(json!({
            "BTC": {
                "name": "Bitcoin",
                "unified_cryptoasset_id": 1,
                "can_withdraw": "true",
                "can_deposit": true,
                "min_withdraw": "0.0001",
                "maker_fee": 0.2
            }
        }))
        .unwrap();

        let btc = &assets["BTC"];
        assert_eq!(btc.name, "Bitcoin");
        assert_eq!(btc.can_withdraw, Some(true));
        assert_eq!(btc.can_deposit, Some(true));
        assert_eq!(btc.min_withdraw, Some(0.0001));
        assert_eq!(btc.max_withdraw, None);
    }

    #[test]
    fn test_trade_integers_accept_strings_and_floats() {
        let trades: Trades = serde_json::from_value(json!([
            {
                "tradeID": "7",
                "price": "9500.5",
                "trade_timestamp": "1596000000000",
                "type": "sell"
            },
            {
                "trade_id": 8.0,
                "price": 9501,
                "trade_timestamp": 1_596_000_001_000.0
            }
        ]))
        .unwrap();

        assert_eq!(trades[0].trade_id, 7);
        assert_eq!(trades[0].trade_timestamp, 1_596_000_000_000);
        assert_eq!(trades[1].trade_id, 8);
        assert_eq!(trades[1].trade_timestamp, 1_596_000_001_000);
        assert_eq!(trades[1].trade_type, "");
    }

    #[test]
    fn test_trade_rejects_fractional_id() {
        let result: Result<Trades, _> = serde_json::from_value(json!([
            { "tradeID": 1.5, "price": 1 }
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_orderbook_timestamp_accepts_float_and_string() {
        let book: Orderbook = serde_json::from_value(json!({
            "timestamp": 1_596_000_000_000.0,
            "asks": [[9501, "0.5"]],
            "bids": [["9499", 0.25]]
        }))
        .unwrap();
        assert_eq!(book.timestamp, 1_596_000_000_000);
        assert_eq!(book.best_ask().unwrap().quantity, 0.5);

        let book: Orderbook =
            serde_json::from_value(json!({ "timestamp": "1596000000000" })).unwrap();
        assert_eq!(book.timestamp, 1_596_000_000_000);
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_asset_id_accepts_string() {
        let assets: Assets = serde_json::from_value(json!({
            "ETH": { "name": "Ethereum", "unified_cryptoasset_id": "1027" },
            "USD": { "name": "US Dollar", "unified_cryptoasset_id": null }
        }))
        .unwrap();

        assert_eq!(assets["ETH"].unified_cryptoasset_id, Some(1027));
        assert_eq!(assets["USD"].unified_cryptoasset_id, None);
    }
}
