use mcap::{build_connector, CandlesRequest, ClientConfig, MarketDataSource, OrderbookRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // MCAP_BASE_URL / MCAP_USER_AGENT override the defaults
    #[cfg(feature = "env-file")]
    let config = ClientConfig::from_env_file("MCAP")?;
    #[cfg(not(feature = "env-file"))]
    let config = ClientConfig::from_env("MCAP")?;

    let connector = build_connector(config)?;
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTC/USD".to_string());

    println!("Fetching candles for {}...", symbol);
    match connector
        .get_candles(CandlesRequest::new(symbol.as_str(), "M1").with_limit(5))
        .await
    {
        Ok(candles) => {
            for candle in &candles {
                println!("  {}", candle);
            }
        }
        Err(e) => println!("Error fetching candles: {}", e),
    }

    match connector
        .get_orderbook(OrderbookRequest::new(symbol.as_str()).with_depth(3))
        .await
    {
        Ok(book) => {
            if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
                println!("Best bid {} / best ask {}", bid.price, ask.price);
            }
        }
        Err(e) => println!("Error fetching orderbook: {}", e),
    }

    let summary = connector.get_summary().await?;
    println!("Summary covers {} trading pairs", summary.data.len());

    Ok(())
}
