use crate::core::errors::McapError;
use serde::Serialize;

/// Parameter list for endpoints that take no query
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// Encode a request config as a form-urlencoded query string.
///
/// Pairs are sorted by key so the output does not depend on field
/// declaration order. Fields marked `skip_serializing_if` on the config are
/// absent; every other field is emitted as-is, negative numbers included.
pub fn encode_query<Q: Serialize + ?Sized>(query: &Q) -> Result<String, McapError> {
    let encoded = serde_urlencoded::to_string(query)?;
    if encoded.is_empty() {
        return Ok(encoded);
    }

    let mut pairs: Vec<&str> = encoded.split('&').collect();
    pairs.sort_by(|a, b| pair_key(a).cmp(pair_key(b)));
    Ok(pairs.join("&"))
}

fn pair_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}

/// `skip_serializing_if` predicate for numeric "omit if zero" fields
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Unordered {
        zeta: &'static str,
        alpha: i32,
        #[serde(skip_serializing_if = "is_zero")]
        middle: i64,
        #[serde(skip_serializing_if = "String::is_empty")]
        tag: String,
    }

    #[test]
    fn test_keys_are_sorted() {
        let query = Unordered {
            zeta: "z",
            alpha: 1,
            middle: 7,
            tag: "t".to_string(),
        };
        assert_eq!(encode_query(&query).unwrap(), "alpha=1&middle=7&tag=t&zeta=z");
    }

    #[test]
    fn test_defaults_are_omitted_but_negatives_kept() {
        let query = Unordered {
            zeta: "z",
            alpha: -3,
            middle: 0,
            tag: String::new(),
        };
        assert_eq!(encode_query(&query).unwrap(), "alpha=-3&zeta=z");
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let query = [("symbol", "BTC/USD"), ("note", "a b&c")];
        assert_eq!(
            encode_query(&query).unwrap(),
            "note=a+b%26c&symbol=BTC%2FUSD"
        );
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(encode_query(NO_PARAMS).unwrap(), "");
    }
}
