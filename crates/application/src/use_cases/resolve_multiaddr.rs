use crate::ports::DnsBackend;
use async_trait::async_trait;
use madoh_domain::{DomainError, HostAddress};
use multiaddr::{Multiaddr, Protocol};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// TXT records under `_dnsaddr.<host>` carry `dnsaddr=<multiaddr>` entries.
const DNSADDR_TXT_PREFIX: &str = "dnsaddr=";
const DNSADDR_DOMAIN_PREFIX: &str = "_dnsaddr.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IpFamily {
    Any,
    V4,
    V6,
}

impl IpFamily {
    fn admits(self, ip: &IpAddr) -> bool {
        match self {
            IpFamily::Any => true,
            IpFamily::V4 => ip.is_ipv4(),
            IpFamily::V6 => ip.is_ipv6(),
        }
    }
}

enum DnsComponent<'a> {
    Host { name: &'a str, family: IpFamily },
    Dnsaddr(&'a str),
}

fn dns_component<'a>(protocol: &'a Protocol<'_>) -> Option<DnsComponent<'a>> {
    match protocol {
        Protocol::Dns(name) => Some(DnsComponent::Host {
            name: name.as_ref(),
            family: IpFamily::Any,
        }),
        Protocol::Dns4(name) => Some(DnsComponent::Host {
            name: name.as_ref(),
            family: IpFamily::V4,
        }),
        Protocol::Dns6(name) => Some(DnsComponent::Host {
            name: name.as_ref(),
            family: IpFamily::V6,
        }),
        Protocol::Dnsaddr(name) => Some(DnsComponent::Dnsaddr(name.as_ref())),
        _ => None,
    }
}

/// Parses a textual multiaddr, reporting failures as [`DomainError::InvalidMultiaddr`].
pub fn parse_multiaddr(input: &str) -> Result<Multiaddr, DomainError> {
    input
        .parse::<Multiaddr>()
        .map_err(|e| DomainError::InvalidMultiaddr(format!("{input}: {e}")))
}

fn normalize_domain(domain: &str) -> String {
    domain.trim_end_matches('.').to_ascii_lowercase()
}

/// Expands the DNS components of a multiaddr into concrete addresses.
///
/// Lookups go to the default backend unless a domain backend was registered
/// for the queried name (or one of its parent domains); the longest matching
/// domain wins.
pub struct MultiaddrResolver {
    backend: Arc<dyn DnsBackend>,
    domain_backends: Vec<(String, Arc<dyn DnsBackend>)>,
}

impl MultiaddrResolver {
    pub fn new(backend: Arc<dyn DnsBackend>) -> Self {
        Self {
            backend,
            domain_backends: Vec::new(),
        }
    }

    /// Routes lookups for `domain` and all of its subdomains to `backend`.
    ///
    /// The root domain `"."` replaces the default backend.
    pub fn with_domain_backend(mut self, domain: &str, backend: Arc<dyn DnsBackend>) -> Self {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            self.backend = backend;
            return self;
        }
        self.domain_backends.retain(|(d, _)| *d != domain);
        self.domain_backends.push((domain, backend));
        self
    }

    fn backend_for(&self, name: &str) -> &Arc<dyn DnsBackend> {
        let name = normalize_domain(name);
        self.domain_backends
            .iter()
            .filter(|(domain, _)| {
                name == *domain
                    || (name.len() > domain.len()
                        && name.ends_with(domain.as_str())
                        && name.as_bytes()[name.len() - domain.len() - 1] == b'.')
            })
            .max_by_key(|(domain, _)| domain.len())
            .map(|(_, backend)| backend)
            .unwrap_or(&self.backend)
    }

    /// Resolves one level of DNS components in `addr`.
    ///
    /// Returns `addr` unchanged when it has no DNS component, and an empty
    /// list when any DNS component resolves to nothing.
    pub async fn resolve(&self, addr: &Multiaddr) -> Result<Vec<Multiaddr>, DomainError> {
        let components: Vec<Protocol<'_>> = addr.iter().collect();
        let mut rest: &[Protocol<'_>] = &components;
        let mut results: Vec<Multiaddr> = Vec::new();

        loop {
            let split = rest
                .iter()
                .position(|p| dns_component(p).is_some())
                .unwrap_or(rest.len());
            let (keep, tail) = rest.split_at(split);

            if !keep.is_empty() {
                if results.is_empty() {
                    results.push(keep.iter().cloned().collect());
                } else {
                    for result in results.iter_mut() {
                        for protocol in keep {
                            result.push(protocol.clone());
                        }
                    }
                }
            }

            let Some((component, after)) = tail.split_first() else {
                break;
            };
            rest = after;

            let resolved = match dns_component(component) {
                Some(DnsComponent::Host { name, family }) => {
                    self.resolve_host(name, family).await?
                }
                Some(DnsComponent::Dnsaddr(name)) => {
                    // dnsaddr entries are complete addresses and replace the remainder
                    let resolved = self.resolve_dnsaddr(name, rest).await?;
                    rest = &[];
                    resolved
                }
                None => break,
            };

            if resolved.is_empty() {
                debug!(addr = %addr, component = %component, "DNS component resolved to nothing");
                return Ok(Vec::new());
            }

            results = if results.is_empty() {
                resolved
            } else {
                encapsulate(&results, &resolved)
            };
        }

        debug!(addr = %addr, count = results.len(), "Multiaddr resolved");
        Ok(results)
    }

    async fn resolve_host(
        &self,
        name: &str,
        family: IpFamily,
    ) -> Result<Vec<Multiaddr>, DomainError> {
        let addresses = self.backend_for(name).lookup_host_addresses(name).await?;

        let mut resolved = Vec::with_capacity(addresses.len());
        for address in addresses {
            let Some(ip) = address.ip else {
                debug!(name = %name, "Skipping host address without a valid IP");
                continue;
            };
            let ip = match ip {
                IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
                v4 => v4,
            };
            if !family.admits(&ip) {
                continue;
            }
            let protocol = match ip {
                IpAddr::V4(v4) => Protocol::Ip4(v4),
                IpAddr::V6(v6) => Protocol::Ip6(v6),
            };
            resolved.push(Multiaddr::empty().with(protocol));
        }
        Ok(resolved)
    }

    async fn resolve_dnsaddr(
        &self,
        name: &str,
        trailer: &[Protocol<'_>],
    ) -> Result<Vec<Multiaddr>, DomainError> {
        let txt_name = format!("{DNSADDR_DOMAIN_PREFIX}{name}");
        let records = self.backend_for(name).lookup_text_records(&txt_name).await?;

        let mut resolved = Vec::new();
        for record in records {
            let Some(value) = record.strip_prefix(DNSADDR_TXT_PREFIX) else {
                continue;
            };
            let addr = match value.parse::<Multiaddr>() {
                Ok(addr) if !addr.is_empty() => addr,
                Ok(_) => {
                    debug!(record = %record, "Skipping empty dnsaddr record");
                    continue;
                }
                Err(e) => {
                    debug!(record = %record, error = %e, "Skipping unparseable dnsaddr record");
                    continue;
                }
            };
            if ends_with_components(&addr, trailer) {
                resolved.push(addr);
            }
        }
        Ok(resolved)
    }
}

fn ends_with_components(addr: &Multiaddr, trailer: &[Protocol<'_>]) -> bool {
    let parts: Vec<Protocol<'_>> = addr.iter().collect();
    if trailer.len() > parts.len() {
        return false;
    }
    parts[parts.len() - trailer.len()..]
        .iter()
        .zip(trailer)
        .all(|(a, b)| a == b)
}

fn encapsulate(prefixes: &[Multiaddr], suffixes: &[Multiaddr]) -> Vec<Multiaddr> {
    let mut combined = Vec::with_capacity(prefixes.len() * suffixes.len());
    for prefix in prefixes {
        for suffix in suffixes {
            let mut addr = prefix.clone();
            for protocol in suffix.iter() {
                addr.push(protocol);
            }
            combined.push(addr);
        }
    }
    combined
}

#[async_trait]
impl DnsBackend for MultiaddrResolver {
    async fn lookup_host_addresses(&self, name: &str) -> Result<Vec<HostAddress>, DomainError> {
        self.backend_for(name).lookup_host_addresses(name).await
    }

    async fn lookup_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.backend_for(name).lookup_text_records(name).await
    }
}
