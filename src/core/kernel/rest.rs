use crate::core::config::{ConfigError, DEFAULT_USER_AGENT};
use crate::core::errors::McapError;
use crate::core::kernel::query::encode_query;
use crate::core::kernel::response::check_response;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// Content type every request declares, even though GET carries no body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// REST client trait for making HTTP requests
///
/// Implementations resolve the endpoint against their base URL, encode the
/// query, classify the response status and decode the JSON body.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request with strongly-typed response
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path, e.g. `/candles`
    /// * `query` - Any `Serialize` value encodable as a query string
    async fn get_json<Q, T>(&self, endpoint: &str, query: &Q) -> Result<T, McapError>
    where
        Q: Serialize + Sync + ?Sized,
        T: DeserializeOwned;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, endpoint paths are appended to it
    pub base_url: String,
    /// Service name for logging and tracing
    pub service_name: String,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, service_name: String) -> Self {
        Self {
            base_url,
            service_name,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// A fully resolved request, built before anything goes on the wire
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Length of the encoded query string.
    ///
    /// This is the request's `Content-Length` value. It is recorded and logged
    /// here instead of being put in `headers`, since a GET carries no body.
    pub content_length: usize,
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    client: Option<Client>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Use a caller-configured HTTP client (timeouts, proxy, TLS).
    /// The configured user agent is ignored in that case.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, McapError> {
        let base_url = self.config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                reason: "URL cannot be a base".to_string(),
            }
            .into());
        }

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.config.user_agent)
                .build()?,
        };

        Ok(ReqwestRest {
            client,
            config: RestClientConfig {
                base_url,
                ..self.config
            },
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Immutable after construction; concurrent calls each resolve their own URL.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a new `ReqwestRest` with a default HTTP client
    pub fn new(base_url: String, service_name: String) -> Result<Self, McapError> {
        RestClientBuilder::new(RestClientConfig::new(base_url, service_name)).build()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> Result<Url, McapError> {
        let joined = format!(
            "{}/{}",
            self.config.base_url,
            endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| {
            ConfigError::InvalidBaseUrl {
                url: joined,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Resolve URL, query and fixed headers for a GET request
    pub fn prepare_get<Q>(&self, endpoint: &str, query: &Q) -> Result<PreparedRequest, McapError>
    where
        Q: Serialize + ?Sized,
    {
        let mut url = self.build_url(endpoint)?;
        let query_string = encode_query(query)?;
        if !query_string.is_empty() {
            url.set_query(Some(&query_string));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        Ok(PreparedRequest {
            method: Method::GET,
            url,
            headers,
            content_length: query_string.len(),
        })
    }

    /// Send a prepared request and decode the JSON body
    #[instrument(skip(self, request), fields(service = %self.config.service_name, method = %request.method, url = %request.url))]
    async fn execute<T: DeserializeOwned>(&self, request: PreparedRequest) -> Result<T, McapError> {
        debug!(content_length = request.content_length, "sending request");

        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers)
            .send()
            .await?;

        let response = check_response(&request.method, &request.url, response).await?;
        let body = response.bytes().await?;
        trace!("Response body: {}", String::from_utf8_lossy(&body));

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query), fields(service = %self.config.service_name, endpoint = %endpoint))]
    async fn get_json<Q, T>(&self, endpoint: &str, query: &Q) -> Result<T, McapError>
    where
        Q: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare_get(endpoint, query)?;
        self.execute(request).await
    }
}
