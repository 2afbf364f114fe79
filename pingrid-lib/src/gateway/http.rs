//! Gateway that POSTs fetch requests to a remote endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::DataGateway;
use crate::Response;
use crate::error::GatewayError;
use crate::query::FetchRequest;
use crate::query::Page;

/// Fetches pages over HTTP.
///
/// The request body is the JSON form of [`FetchRequest`]; the response body
/// must be the JSON form of [`Page`]. Non-2xx statuses become
/// [`GatewayError::Http`] with the response body as message.
///
/// # Example
///
/// ```ignore
/// let gateway = HttpGateway::new("http://127.0.0.1:3000/api/users")?
///     .with_timeout(Duration::from_secs(5));
/// let page = gateway.fetch(&FetchRequest::new(0, 10)).await?.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpGateway {
    /// Creates a gateway for `endpoint`.
    pub fn new(endpoint: &str) -> Result<Self, GatewayError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        Ok(Self {
            endpoint,
            http_client: Client::new(),
            timeout: None,
        })
    }

    /// Uses an existing HTTP client (connection pool, proxies, TLS settings).
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport_error(&self, error: reqwest::Error) -> GatewayError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => GatewayError::Timeout(timeout),
            _ => GatewayError::Network(error),
        }
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
        request.validate()?;

        let mut builder = self
            .http_client
            .post(self.endpoint.clone())
            .header("Accept", "application/json")
            .json(request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            log::warn!("fetch from {} failed with HTTP {}", self.endpoint, status.as_u16());
            return Err(GatewayError::http(status.as_u16(), body));
        }

        let page: Page = serde_json::from_str(&body)
            .map_err(|e| GatewayError::parse_with_body(e.to_string(), body))?;
        Ok(Response::new(page))
    }
}
