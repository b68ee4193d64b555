use crate::core::errors::ParseError;
use crate::core::types::{conversion, Candle};
use chrono::{DateTime, Utc};
use serde_json::Value;

const PRICE_FIELDS: [&str; 4] = ["open", "high", "low", "close"];

/// Convert one `/candles` row into a [`Candle`].
///
/// The row is `[time_ms, open, high, low, close, ...]`. The timestamp is
/// truncated to whole milliseconds and then to whole seconds; prices may be
/// numbers or numeric strings. Extra trailing fields are ignored.
pub fn convert_candle_row(row: &[Value]) -> Result<Candle, ParseError> {
    if row.len() < 5 {
        return Err(ParseError::RowTooShort { len: row.len() });
    }

    let time_ms = conversion::value_to_f64(&row[0])
        .filter(|ms| ms.is_finite())
        .ok_or_else(|| ParseError::InvalidTimestamp(row[0].to_string()))?;
    let seconds = (time_ms.trunc() as i64) / 1000;
    let time = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| ParseError::InvalidTimestamp(row[0].to_string()))?;

    let mut prices = [0.0_f64; 4];
    for (i, field) in PRICE_FIELDS.into_iter().enumerate() {
        let value = &row[i + 1];
        prices[i] = conversion::value_to_f64(value).ok_or_else(|| ParseError::InvalidPrice {
            field,
            value: value.to_string(),
        })?;
    }
    let [open, high, low, close] = prices;

    Ok(Candle {
        time,
        open,
        high,
        low,
        close,
    })
}

/// Convert every row, stopping at the first malformed one
pub fn convert_candle_rows(rows: &[Vec<Value>]) -> Result<Vec<Candle>, ParseError> {
    rows.iter().map(|row| convert_candle_row(row)).collect()
}
