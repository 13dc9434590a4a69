//! madoh Domain Layer
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod host_address;
pub mod record_type;
pub mod validators;

pub use config::{BackendSelection, CliOverrides, Config, ConfigError, DohConfig, LoggingConfig};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use host_address::HostAddress;
pub use record_type::RecordType;
