//! DNS backend using the host's resolver configuration.
//!
//! This is what `madns` uses when DoH is not requested.

use async_trait::async_trait;
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, TokioResolver};
use madoh_application::ports::DnsBackend;
use madoh_domain::{DomainError, HostAddress};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SystemDnsBackend {
    resolver: TokioResolver,
}

impl SystemDnsBackend {
    /// Reads the system configuration, falling back to the resolver
    /// defaults when it cannot be read.
    pub fn new() -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => builder,
            Err(e) => {
                warn!(error = %e, "Failed to read system DNS config, using defaults");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        Self {
            resolver: builder.build(),
        }
    }

    pub fn with_resolver(resolver: TokioResolver) -> Self {
        Self { resolver }
    }
}

impl Default for SystemDnsBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup_error(name: &str, e: ResolveError) -> DomainError {
    DomainError::Lookup {
        name: name.to_string(),
        cause: e.to_string(),
    }
}

#[async_trait]
impl DnsBackend for SystemDnsBackend {
    async fn lookup_host_addresses(&self, name: &str) -> Result<Vec<HostAddress>, DomainError> {
        match self.resolver.lookup_ip(name).await {
            Ok(lookup) => {
                let addresses: Vec<HostAddress> = lookup.iter().map(HostAddress::new).collect();
                debug!(name = %name, count = addresses.len(), "System IP lookup complete");
                Ok(addresses)
            }
            Err(e) if e.is_no_records_found() => Ok(Vec::new()),
            Err(e) => Err(lookup_error(name, e)),
        }
    }

    async fn lookup_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        match self.resolver.txt_lookup(name).await {
            Ok(lookup) => {
                let records: Vec<String> = lookup
                    .iter()
                    .map(|txt| {
                        txt.txt_data()
                            .iter()
                            .map(|part| String::from_utf8_lossy(part))
                            .collect::<String>()
                    })
                    .collect();
                debug!(name = %name, count = records.len(), "System TXT lookup complete");
                Ok(records)
            }
            Err(e) if e.is_no_records_found() => Ok(Vec::new()),
            Err(e) => Err(lookup_error(name, e)),
        }
    }
}
