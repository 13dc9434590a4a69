use async_trait::async_trait;
use madoh_domain::{DomainError, HostAddress};

/// The two lookups the multiaddr resolver needs from a DNS backend.
///
/// An empty list means "no such record"; a failed lookup is always an `Err`.
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// Resolves `name` to host addresses.
    async fn lookup_host_addresses(&self, name: &str) -> Result<Vec<HostAddress>, DomainError>;

    /// Resolves `name` to the raw text of its TXT records.
    async fn lookup_text_records(&self, name: &str) -> Result<Vec<String>, DomainError>;
}
