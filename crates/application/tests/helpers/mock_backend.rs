#![allow(dead_code)]

use async_trait::async_trait;
use madoh_application::ports::DnsBackend;
use madoh_domain::{DomainError, HostAddress};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsBackend
// ============================================================================

#[derive(Clone, Default)]
pub struct MockDnsBackend {
    hosts: Arc<RwLock<HashMap<String, Vec<HostAddress>>>>,
    texts: Arc<RwLock<HashMap<String, Vec<String>>>>,
    calls: Arc<RwLock<Vec<String>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDnsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers for host lookups of `name`; entries that are not IP literals
    /// become invalid host addresses, like a DoH backend would produce.
    pub async fn set_host_addresses(&self, name: &str, data: &[&str]) {
        self.hosts.write().await.insert(
            name.to_string(),
            data.iter().map(|d| HostAddress::parse_lossy(d)).collect(),
        );
    }

    pub async fn set_text_records(&self, name: &str, records: &[&str]) {
        self.texts.write().await.insert(
            name.to_string(),
            records.iter().map(|r| r.to_string()).collect(),
        );
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    /// Every lookup issued so far, as `"<kind> <name>"`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn record_call(&self, kind: &str, name: &str) -> Result<(), DomainError> {
        self.calls.write().await.push(format!("{kind} {name}"));
        if *self.should_fail.read().await {
            return Err(DomainError::HttpStatus { status: 500 });
        }
        Ok(())
    }
}

#[async_trait]
impl DnsBackend for MockDnsBackend {
    async fn lookup_host_addresses(&self, name: &str) -> Result<Vec<HostAddress>, DomainError> {
        self.record_call("A", name).await?;
        Ok(self.hosts.read().await.get(name).cloned().unwrap_or_default())
    }

    async fn lookup_text_records(&self, name: &str) -> Result<Vec<String>, DomainError> {
        self.record_call("TXT", name).await?;
        Ok(self.texts.read().await.get(name).cloned().unwrap_or_default())
    }
}
