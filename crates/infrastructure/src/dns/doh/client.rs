use super::request_builder::{RequestBuilder, DNS_JSON_CONTENT_TYPE};
use super::response_parser::ResponseParser;
use async_trait::async_trait;
use madoh_application::ports::DnsBackend;
use madoh_domain::config::{DEFAULT_DOH_TIMEOUT_SECS, DEFAULT_DOH_URL};
use madoh_domain::{DnsQuery, DomainError, HostAddress, RecordType};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Shared HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(DEFAULT_DOH_TIMEOUT_SECS))
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

static DEFAULT_CLIENT: LazyLock<DohQueryClient> = LazyLock::new(|| {
    DohQueryClient::with_default_client(DEFAULT_DOH_URL)
        .expect("DEFAULT_DOH_URL is a valid https URL")
});

/// The preconfigured client for [`DEFAULT_DOH_URL`].
///
/// Built on first use and never mutated afterwards.
pub fn default_doh_client() -> &'static DohQueryClient {
    &DEFAULT_CLIENT
}

/// DNS-over-HTTPS client for the JSON API.
///
/// Holds only the parsed endpoint and an HTTP client handle, so it can be
/// cloned freely and shared between concurrent lookups. Every lookup is a
/// single GET; there is no caching and no retry.
#[derive(Debug, Clone)]
pub struct DohQueryClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl DohQueryClient {
    /// Creates a client for `endpoint`, sending requests through `client`.
    ///
    /// Fails with [`DomainError::InvalidEndpoint`] when the endpoint is not an
    /// absolute http(s) URL.
    pub fn new(endpoint: &str, client: reqwest::Client) -> Result<Self, DomainError> {
        let url = Url::parse(endpoint).map_err(|e| DomainError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self {
            endpoint: url,
            client,
        })
    }

    /// Creates a client for `endpoint` using the shared default HTTP client.
    pub fn with_default_client(endpoint: &str) -> Result<Self, DomainError> {
        Self::new(endpoint, SHARED_CLIENT.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Queries `name` for `record_type` and returns the data of the matching
    /// answers in the order the server sent them.
    pub async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, DomainError> {
        let query = DnsQuery::new(name, record_type);
        let url = RequestBuilder::build_url(&self.endpoint, &query);

        debug!(
            url = %url,
            name = %name,
            record_type = %record_type,
            "Sending DoH query"
        );

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, DNS_JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| DomainError::Transport {
                url: url.to_string(),
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport {
                url: url.to_string(),
                cause: format!("failed to read response body: {}", e),
            })?;

        let parsed = ResponseParser::parse_bytes(&body)?;
        let total = parsed.answers().len();
        let answers = parsed.into_matching(record_type);

        debug!(
            url = %url,
            answers = total,
            matching = answers.len(),
            "DoH response received"
        );

        Ok(answers)
    }
}

#[async_trait]
impl DnsBackend for DohQueryClient {
    async fn lookup_host_addresses(&self, name: &str) -> Result<Vec<HostAddress>, DomainError> {
        let records = self.lookup(name, RecordType::A).await?;
        Ok(records.iter().map(String::as_str).map(HostAddress::parse_lossy).collect())
    }

    async fn lookup_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let records = self.lookup(name, RecordType::TXT).await?;
        Ok(records
            .iter()
            .map(|data| ResponseParser::unquote_txt(data).to_string())
            .collect())
    }
}
