/// Transport kernel for the market-cap API
///
/// Everything that touches the wire lives here and nothing in this module
/// knows about individual endpoints.
///
/// # Components
///
/// - `query`: request config → sorted, form-urlencoded query string
/// - `response`: HTTP status classification and the typed `ErrorResponse`
/// - `rest`: the `RestClient` trait and its reqwest implementation
///
/// # Example
///
/// ```rust,no_run
/// use mcap::core::kernel::*;
/// use mcap::core::config::DEFAULT_BASE_URL;
/// use std::collections::BTreeMap;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RestClientConfig::new(DEFAULT_BASE_URL.to_string(), "currency_com".to_string());
/// let rest = RestClientBuilder::new(config).build()?;
///
/// let ticker: BTreeMap<String, serde_json::Value> = rest.get_json("/ticker", NO_PARAMS).await?;
/// println!("{} pairs", ticker.len());
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// Non-2xx responses surface as `McapError::Status`, whose `Display` is
/// `<METHOD> <URL>: [<status>] <message>`:
///
/// ```rust,no_run
/// use mcap::core::errors::McapError;
/// use mcap::core::kernel::{RestClient, ReqwestRest};
///
/// # async fn example(rest: ReqwestRest) {
/// let query = [("symbol", "BTC/USD"), ("interval", "M2")];
/// match rest.get_json::<_, serde_json::Value>("/candles", &query).await {
///     Err(McapError::Status(e)) if e.code() == Some(-1) => eprintln!("rejected: {}", e),
///     Err(e) => eprintln!("failed: {}", e),
///     Ok(rows) => println!("{}", rows),
/// }
/// # }
/// ```
pub mod query;
pub mod response;
pub mod rest;

// Re-export key types for convenience
pub use query::{encode_query, NO_PARAMS};
pub use response::{check_response, ErrorPayload, ErrorResponse};
pub use rest::{PreparedRequest, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
