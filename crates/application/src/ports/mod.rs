pub mod dns_backend;

pub use dns_backend::DnsBackend;
