use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One OHLC price bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, whole seconds
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} O:{} H:{} L:{} C:{}",
            self.time.to_rfc3339(),
            self.open,
            self.high,
            self.low,
            self.close
        )
    }
}

/// One price level of an order book side, sent as `[price, quantity]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
}

impl<'de> Deserialize<'de> for PriceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
        if raw.len() < 2 {
            return Err(D::Error::invalid_length(raw.len(), &"[price, quantity]"));
        }
        let price = conversion::value_to_f64(&raw[0])
            .ok_or_else(|| D::Error::custom(format!("invalid price level price: {}", raw[0])))?;
        let quantity = conversion::value_to_f64(&raw[1]).ok_or_else(|| {
            D::Error::custom(format!("invalid price level quantity: {}", raw[1]))
        })?;

        Ok(Self { price, quantity })
    }
}

/// Coercion helpers for fields the API sends either as numbers or as strings
pub mod conversion {
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    /// Stringify a JSON scalar and parse it as `f64`.
    ///
    /// Numbers and numeric strings are accepted; anything else yields `None`.
    pub fn value_to_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.to_string().parse().ok(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// `deserialize_with` target for required number-or-string fields
    pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_f64(&value).ok_or_else(|| D::Error::custom(format!("expected number, got {}", value)))
    }

    /// `deserialize_with` target for optional number-or-string fields.
    /// `null` and empty strings map to `None`.
    pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            other => value_to_f64(other)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected number, got {}", other))),
        }
    }

    /// Read a JSON scalar as `i64`.
    ///
    /// Integers, integral floats and numeric strings are accepted. Fractional
    /// or out-of-range values yield `None`.
    pub fn value_to_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
            Value::String(s) => s
                .parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64)),
            _ => None,
        }
    }

    #[allow(clippy::float_cmp)]
    fn integral_f64(f: f64) -> Option<i64> {
        // i64::MIN as f64 is exact, i64::MAX as f64 rounds up to 2^63
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
    }

    /// `deserialize_with` target for required integer-or-string fields
    pub fn i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_i64(&value)
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {}", value)))
    }

    /// `deserialize_with` target for optional integer-or-string fields.
    /// `null` and empty strings map to `None`.
    pub fn opt_i64_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            other => value_to_i64(other)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected integer, got {}", other))),
        }
    }

    /// `deserialize_with` target for flags sent as `true`, `"true"` or `1`.
    pub fn opt_bool_lenient<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                "" => Ok(None),
                _ => Err(D::Error::custom(format!("expected boolean, got {}", value))),
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(D::Error::custom(format!("expected boolean, got {}", value))),
            },
            _ => Err(D::Error::custom(format!("expected boolean, got {}", value))),
        }
    }
}
