use anyhow::Context;
use madoh_application::ports::DnsBackend;
use madoh_domain::config::DEFAULT_DOH_TIMEOUT_SECS;
use madoh_domain::{BackendSelection, Config};
use madoh_infrastructure::dns::{
    default_doh_client, DohQueryClient, SystemDnsBackend, DEFAULT_DOH_URL,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Wires the DNS backend selected by the configuration.
pub fn build_backend(config: &Config) -> anyhow::Result<Arc<dyn DnsBackend>> {
    match config.doh.backend() {
        BackendSelection::System => {
            info!("Resolving through the system DNS configuration");
            Ok(Arc::new(SystemDnsBackend::new()))
        }
        BackendSelection::DefaultDoh => {
            let client = default_doh(config.doh.timeout_secs)?;
            info!(endpoint = %client.endpoint(), "Resolving through DoH");
            Ok(Arc::new(client))
        }
        BackendSelection::CustomDoh(url) => {
            let client = doh_client(&url, config.doh.timeout_secs)?;
            info!(endpoint = %client.endpoint(), "Resolving through DoH");
            Ok(Arc::new(client))
        }
    }
}

/// The shared default instance when its timeout matches, otherwise a
/// dedicated client for [`DEFAULT_DOH_URL`].
fn default_doh(timeout_secs: u64) -> anyhow::Result<DohQueryClient> {
    if timeout_secs == DEFAULT_DOH_TIMEOUT_SECS {
        return Ok(default_doh_client().clone());
    }
    doh_client(DEFAULT_DOH_URL, timeout_secs)
}

fn doh_client(endpoint: &str, timeout_secs: u64) -> anyhow::Result<DohQueryClient> {
    let http = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    Ok(DohQueryClient::new(endpoint, http)?)
}
