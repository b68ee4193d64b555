use crate::core::config::ClientConfig;
use crate::core::errors::McapError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::currency_com::connector::CurrencyComConnector;
use reqwest::Client;

pub const SERVICE_NAME: &str = "currency_com";

fn rest_config(config: &ClientConfig) -> RestClientConfig {
    RestClientConfig::new(
        config.resolved_base_url().to_string(),
        SERVICE_NAME.to_string(),
    )
    .with_user_agent(config.resolved_user_agent().to_string())
}

/// Create a connector with a default HTTP client
pub fn build_connector(
    config: ClientConfig,
) -> Result<CurrencyComConnector<ReqwestRest>, McapError> {
    let rest = RestClientBuilder::new(rest_config(&config)).build()?;
    Ok(CurrencyComConnector::new(rest))
}

/// Create a connector on top of a caller-configured HTTP client
///
/// Timeouts, proxies and TLS settings all come from `client`.
pub fn build_connector_with_client(
    config: ClientConfig,
    client: Client,
) -> Result<CurrencyComConnector<ReqwestRest>, McapError> {
    let rest = RestClientBuilder::new(rest_config(&config))
        .with_http_client(client)
        .build()?;
    Ok(CurrencyComConnector::new(rest))
}

impl CurrencyComConnector<ReqwestRest> {
    /// Connector for the production API with default settings
    pub fn production() -> Result<Self, McapError> {
        build_connector(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_BASE_URL;
    use std::time::Duration;

    #[test]
    fn test_build_default_connector() {
        let connector = build_connector(ClientConfig::default()).unwrap();
        assert_eq!(connector.rest().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_build_with_custom_client() {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let config = ClientConfig::new().base_url("http://127.0.0.1:8080/api/v1");

        let connector = build_connector_with_client(config, client).unwrap();
        assert_eq!(connector.rest().base_url(), "http://127.0.0.1:8080/api/v1");
    }

    #[test]
    fn test_invalid_base_url_fails_at_build_time() {
        let config = ClientConfig::new().base_url("::not-a-url::");
        assert!(matches!(
            build_connector(config),
            Err(McapError::Config(_))
        ));
    }
}
