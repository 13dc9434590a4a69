//! DoH Request Builder
//!
//! Turns a `DnsQuery` into the GET URL of the JSON DoH API.

use madoh_domain::DnsQuery;
use url::Url;

/// Media type of DoH JSON responses, sent in the `Accept` header.
pub const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

/// Builds DoH JSON request URLs
pub struct RequestBuilder;

impl RequestBuilder {
    /// Append `name` and `type` to the endpoint's query string.
    ///
    /// Path and existing query pairs of the endpoint are kept as they are;
    /// the name is form-url-encoded.
    pub fn build_url(endpoint: &Url, query: &DnsQuery) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", &query.name)
            .append_pair("type", &query.record_type.code().to_string());
        url
    }
}
